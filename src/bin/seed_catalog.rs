// Small dev utility: seed a demo component catalog and write a matching model file.
//
// Usage:
//   cargo run --bin seed_catalog -- [db_path]
//
// The model file is written next to the database as pc_build_model.json.

use pc_build_recommender::app::resolve_model_path;
use pc_build_recommender::config::DEFAULT_MODEL_PATH;
use pc_build_recommender::db::{init_schema, open_sqlite_connection};
use pc_build_recommender::model::ArtifactFile;
use pc_build_recommender::repository::ComponentRepository;
use pc_build_recommender::{Component, ComponentType, SLOT_ORDER};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const PER_TYPE: usize = 8;
const MANUFACTURERS: [&str; 4] = ["Acme", "Borealis", "Corsa", "Dynamo"];

fn base_price(slot: ComponentType) -> f64 {
    match slot {
        ComponentType::Cpu => 120.0,
        ComponentType::Gpu => 220.0,
        ComponentType::Ram => 40.0,
        ComponentType::Storage => 45.0,
        ComponentType::Psu => 55.0,
        ComponentType::Case => 50.0,
        ComponentType::Motherboard => 90.0,
    }
}

fn demo_components() -> Vec<Component> {
    let mut components = Vec::with_capacity(PER_TYPE * SLOT_ORDER.len());
    for slot in SLOT_ORDER {
        for i in 0..PER_TYPE {
            components.push(Component {
                component_id: format!("{}-{:03}", slot.as_str().to_lowercase(), i + 1),
                name: format!("{} {} Series {}", MANUFACTURERS[i % MANUFACTURERS.len()], slot, i + 1),
                manufacturer: Some(MANUFACTURERS[i % MANUFACTURERS.len()].to_string()),
                price: base_price(slot) * (1.0 + i as f64 * 0.5),
                component_type: slot,
            });
        }
    }
    components
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pc_build_recommender::logging::init();

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(pc_build_recommender::app::get_default_db_path);

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    let repo = ComponentRepository::from_connection(Arc::new(Mutex::new(conn)));

    let components = demo_components();
    let inserted = repo.batch_insert(&components)?;
    tracing::info!("已写入部件: {}", inserted);

    // 编码表覆盖全部演示部件；历史配置取每档同一下标
    let mut encoders: BTreeMap<ComponentType, Vec<String>> = BTreeMap::new();
    for c in &components {
        encoders
            .entry(c.component_type)
            .or_default()
            .push(c.component_id.clone());
    }
    for ids in encoders.values_mut() {
        ids.sort();
    }
    let history = (0..PER_TYPE).map(|i| [i; 7]).collect();

    let file = ArtifactFile {
        version: format!("demo-{}", chrono::Utc::now().format("%Y%m%d")),
        encoders,
        history,
    };
    let model_path = resolve_model_path(&db_path, DEFAULT_MODEL_PATH);
    file.write_to(&model_path)?;

    println!("db_path={}", db_path);
    println!("model_path={}", model_path.display());
    println!("components={}", inserted);
    Ok(())
}
