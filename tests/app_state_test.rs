// ==========================================
// AppState / 配置 / 模型文件集成测试
// ==========================================
// 测试目标: 启动时从 config_kv 读取配置、从磁盘加载模型
// ==========================================


use pc_build_recommender::api::ApiError;
use pc_build_recommender::app::AppState;
use pc_build_recommender::config::{config_keys, DEFAULT_MODEL_PATH};
use pc_build_recommender::model::ModelArtifact;
use pc_build_recommender::{logging, SLOT_ORDER};
use test_helpers::*;

const PRICES: [f64; 5] = [10_000.0, 20_000.0, 30_000.0, 40_000.0, 50_000.0];

#[test]
fn test_app_state_loads_model_next_to_database() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pc_build.db").to_string_lossy().to_string();

    let components = build_catalog(5, &PRICES);
    seed_catalog(&db_path, &components).unwrap();
    build_artifact_file(&components)
        .write_to(dir.path().join(DEFAULT_MODEL_PATH))
        .unwrap();

    let state = AppState::new(db_path).unwrap();
    assert_eq!(state.artifact.version(), "test-file");
    assert_eq!(state.config.max_attempts, None);

    let rec = state.recommend_api.recommend(500_000.0).unwrap();
    assert!(rec.is_complete());
}

#[test]
fn test_seed_into_fresh_db_path_creates_tables() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fresh.db").to_string_lossy().to_string();

    let components = build_catalog(3, &PRICES);
    let repo = seed_catalog(&db_path, &components).unwrap();

    for slot in SLOT_ORDER {
        let ids = repo.sample_ids_by_type(slot, 5).unwrap();
        assert_eq!(ids.len(), 3, "slot {}", slot);
    }
}

#[test]
fn test_app_state_fails_without_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pc_build.db").to_string_lossy().to_string();

    let result = AppState::new(db_path);
    assert!(result.is_err());
}

#[test]
fn test_configured_attempt_ceiling_reaches_api() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pc_build.db").to_string_lossy().to_string();

    let components = build_catalog(5, &PRICES);
    seed_catalog(&db_path, &components).unwrap();
    build_artifact_file(&components)
        .write_to(dir.path().join(DEFAULT_MODEL_PATH))
        .unwrap();

    {
        let state = AppState::new(db_path.clone()).unwrap();
        state
            .config_manager
            .set_global_config_value(config_keys::MAX_ATTEMPTS, "3")
            .unwrap();
        state
            .config_manager
            .set_global_config_value(config_keys::SAMPLE_SIZE, "2")
            .unwrap();
    }

    let state = AppState::new(db_path).unwrap();
    assert_eq!(state.config.max_attempts, Some(3));
    assert_eq!(state.config.sample_size, 2);

    match state.recommend_api.recommend(99.0) {
        Err(ApiError::NoFeasibleBuild { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("Expected NoFeasibleBuild, got {:?}", other),
    }
}

#[test]
fn test_loaded_vocabulary_round_trips_every_catalog_id() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let components = build_catalog(6, &PRICES);
    build_artifact_file(&components).write_to(&model_path).unwrap();

    let artifact = ModelArtifact::load(&model_path).unwrap();
    for slot in SLOT_ORDER {
        assert_eq!(artifact.table(slot).len(), 6);
    }
    for c in &components {
        let table = artifact.table(c.component_type);
        let code = table.encode(&c.component_id).unwrap();
        assert_eq!(table.decode(code).unwrap(), c.component_id);
    }
}
