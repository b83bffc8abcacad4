//! Catalog searches: newest request wins, pagination and installs.

mod common;

use std::time::{Duration, Instant};

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use packdeck::app::{Screen, ScreenView};
use packdeck::state::CatalogStore;
use serde_json::json;

fn catalog(app: &packdeck::app::App) -> &CatalogStore {
    match &app.view {
        ScreenView::Catalog(store) => store,
        _ => panic!("catalog not mounted"),
    }
}

fn slugs(app: &packdeck::app::App) -> Vec<String> {
    catalog(app).entries().iter().map(|e| e.id.clone()).collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[tokio::test]
async fn test_out_of_order_completion_keeps_newest_results() {
    let gateway = scripted_gateway();
    gateway.hold("search_mods");
    let (mut app, mut rx) = test_app(gateway.clone());
    app.switch_screen(Screen::Catalog);
    gateway.wait_for_pending("search_mods", 1).await;

    if let ScreenView::Catalog(store) = &mut app.view {
        store.input.set("sodium", Instant::now());
    }
    app.search_catalog();
    gateway.wait_for_pending("search_mods", 2).await;

    // Newer search answers first, then the older one.
    let newer = gateway
        .release("search_mods", 1, Ok(modrinth_page(&["sodium"], 1)))
        .expect("second call parked");
    assert_eq!(newer["query"], "sodium");
    drain(&mut app, &mut rx).await;
    gateway.release("search_mods", 0, Ok(modrinth_page(&["jei", "rei"], 2)));
    drain(&mut app, &mut rx).await;

    assert_eq!(slugs(&app), vec!["sodium"]);
    assert!(!catalog(&app).results.loading);
}

#[tokio::test]
async fn test_changing_query_clears_previous_results() {
    let gateway = scripted_gateway();
    let (mut app, mut rx) = test_app(gateway.clone());
    app.switch_screen(Screen::Catalog);
    drain(&mut app, &mut rx).await;
    assert_eq!(slugs(&app), vec!["sodium", "lithium"]);

    gateway.hold("search_mods");
    if let ScreenView::Catalog(store) = &mut app.view {
        store.input.set("iris", Instant::now());
    }
    app.search_catalog();

    assert!(slugs(&app).is_empty());
    assert!(catalog(&app).results.loading);
}

#[tokio::test]
async fn test_typing_debounces_into_one_search() {
    let gateway = scripted_gateway();
    let (mut app, mut rx) = test_app(gateway.clone());
    app.switch_screen(Screen::Catalog);
    drain(&mut app, &mut rx).await;
    let before = gateway.calls_to("search_mods").len();

    app.handle_key(key(KeyCode::Char('/')));
    for c in "create".chars() {
        app.handle_key(key(KeyCode::Char(c)));
        app.tick(Instant::now());
    }
    assert_eq!(gateway.calls_to("search_mods").len(), before);

    tokio::time::sleep(Duration::from_millis(40)).await;
    app.tick(Instant::now());
    drain(&mut app, &mut rx).await;

    let calls = gateway.calls_to("search_mods");
    assert_eq!(calls.len(), before + 1);
    assert_eq!(calls[before]["query"], "create");
}

#[tokio::test]
async fn test_next_page_requests_following_offset() {
    let gateway = scripted_gateway();
    let (mut app, mut rx) = test_app(gateway.clone());
    app.switch_screen(Screen::Catalog);
    drain(&mut app, &mut rx).await;

    app.handle_key(key(KeyCode::Right));
    drain(&mut app, &mut rx).await;
    app.handle_key(key(KeyCode::Right));
    drain(&mut app, &mut rx).await;

    let offsets: Vec<u64> = gateway
        .calls_to("search_mods")
        .iter()
        .map(|args| args["offset"].as_u64().unwrap_or_default())
        .collect();
    assert_eq!(offsets, vec![0, 2, 4]);
    assert_eq!(catalog(&app).page.page_number(), 3);

    // Page 3 of 3: there is no next page.
    app.handle_key(key(KeyCode::Right));
    drain(&mut app, &mut rx).await;
    assert_eq!(gateway.calls_to("search_mods").len(), 3);
}

#[tokio::test]
async fn test_install_tracks_operation_in_downloads() {
    let gateway = scripted_gateway();
    gateway.respond("install_mod", json!({"operation_id": "op-1"}));
    let (mut app, mut rx) = test_app(gateway.clone());
    app.start();
    drain(&mut app, &mut rx).await;

    app.switch_screen(Screen::Catalog);
    drain(&mut app, &mut rx).await;
    app.handle_key(key(KeyCode::Enter));
    drain(&mut app, &mut rx).await;

    let args = &gateway.calls_to("install_mod")[0];
    assert_eq!(args["slug"], "sodium");
    assert!(app.ctx.downloads.get("op-1").is_some());
    assert_eq!(app.ctx.downloads.active_count(), 1);
}
