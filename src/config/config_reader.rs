// ==========================================
// 整机配置推荐系统 - 选配配置读取 Trait
// ==========================================
// 职责: 定义选配引擎所需的配置读取接口（不包含实现）
// 实现者: ConfigManager（从 config_kv 表读取）
// ==========================================

use std::error::Error;

pub trait AssemblyConfigReader: Send + Sync {
    /// 每槽位抽样宽度
    ///
    /// # 默认值
    /// - 5
    fn get_sample_size(&self) -> Result<usize, Box<dyn Error>>;

    /// 最大尝试次数
    ///
    /// # 返回
    /// - None: 不限（配置值为 0 或未配置）
    fn get_max_attempts(&self) -> Result<Option<u32>, Box<dyn Error>>;

    /// 模型文件路径
    ///
    /// # 默认值
    /// - pc_build_model.json
    fn get_model_path(&self) -> Result<String, Box<dyn Error>>;
}
