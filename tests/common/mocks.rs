//! Canned backend replies.

use packdeck::adapters::MockGateway;
use serde_json::{json, Value};

pub fn instances_json() -> Value {
    json!([
        {"id": "vanilla-plus", "name": "Vanilla Plus", "status": "stopped", "loader": "fabric", "minecraft_version": "1.20.1"},
        {"id": 7, "name": "Create Above", "status": "running", "loader": "forge", "minecraftVersion": "1.19.2"}
    ])
}

pub fn modrinth_page(slugs: &[&str], total: u64) -> Value {
    let hits: Vec<Value> = slugs
        .iter()
        .map(|slug| json!({"slug": slug, "title": slug.to_uppercase(), "downloads": 1000}))
        .collect();
    json!({"hits": hits, "total_hits": total})
}

/// Gateway answering the commands issued on start and on screen mounts.
pub fn scripted_gateway() -> MockGateway {
    let gateway = MockGateway::new();
    gateway
        .respond("list_instances", instances_json())
        .respond("get_settings", json!({"java_path": "/usr/bin/java", "max_memory_mb": 4096}))
        .respond("search_mods", modrinth_page(&["sodium", "lithium"], 5))
        .respond("list_patches", json!([]))
        .respond("detect_launchers", json!([]))
        .respond("list_custom_translation_langs", json!(["en_us"]));
    gateway
}
