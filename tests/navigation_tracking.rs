#![cfg(not(target_arch = "wasm32"))]

use gtag_route_analytics::analytics::{
    Analytics, AnalyticsSettings, DataLayer, GtagCommand, InitializeOutcome, MemoryDocument,
};
use gtag_route_analytics::app::{AppEnvironment, AppRoot};
use gtag_route_analytics::router::{RouteNode, Router, RouterState};
use serde_json::{json, Value};
use std::sync::Arc;

struct Host {
    root: AppRoot,
    layer: Arc<DataLayer>,
    document: Arc<MemoryDocument>,
    router: Arc<Router>,
}

fn host(production: bool) -> Host {
    let environment = AppEnvironment::new(production, "G-INTEGRATION");
    let layer = Arc::new(DataLayer::new());
    let document = Arc::new(MemoryDocument::new("https://store.example/"));
    let router = Arc::new(Router::new());
    let analytics = Analytics::new(
        AnalyticsSettings::new(environment.google_analytics_id.clone()),
        layer.clone(),
        document.clone(),
        router.clone(),
    );
    Host {
        root: AppRoot::new(environment, analytics),
        layer,
        document,
        router,
    }
}

fn catalog_routes(product: &str) -> RouterState {
    RouterState::from_chain([
        RouteNode::new(""),
        RouteNode::new("catalog").with_title("Catalog"),
        RouteNode::new("item"),
        RouteNode::new(":id").with_title(product),
    ])
}

#[test]
fn page_views_follow_navigation_order() {
    let host = host(false);
    host.root.on_init();

    host.document.set_location("https://store.example/catalog/item/1");
    host.router
        .navigate("/catalog/item/1", "/catalog/item/1", catalog_routes("Lamp"))
        .unwrap();
    host.document.set_location("https://store.example/catalog/item/2");
    host.router
        .navigate("/c/2", "/catalog/item/2", catalog_routes("Desk"))
        .unwrap();

    let events = host.layer.events();
    assert_eq!(events.len(), 2);
    assert_eq!(
        Value::Object(events[0].1.clone()),
        json!({
            "page_title": "Catalog-Lamp",
            "page_path": "/catalog/item/1",
            "page_location": "https://store.example/catalog/item/1",
        })
    );
    assert_eq!(events[1].1["page_title"], "Catalog-Desk");
    assert_eq!(events[1].1["page_path"], "/catalog/item/2");
    assert_eq!(host.document.snapshot().title, "Catalog-Desk");
}

#[test]
fn untitled_routes_send_empty_title() {
    let host = host(false);
    host.root.on_init();
    host.router
        .navigate("/", "/", RouterState::from_chain([RouteNode::new("")]))
        .unwrap();

    assert_eq!(host.layer.events()[0].1["page_title"], "");
    assert_eq!(host.document.snapshot().title, "");
}

#[test]
fn production_host_sends_nothing_on_navigation() {
    let host = host(true);
    assert_eq!(host.root.on_init(), None);
    host.router
        .navigate("/catalog", "/catalog", catalog_routes("Lamp"))
        .unwrap();

    assert!(host.layer.snapshot().commands.is_empty());
    assert!(host.document.head_scripts().is_empty());
}

#[test]
fn second_init_keeps_a_single_subscription_and_script_pair() {
    let host = host(false);
    assert_eq!(
        host.root.on_init(),
        Some(InitializeOutcome::Initialized { scripts_injected: true })
    );
    assert_eq!(host.root.on_init(), Some(InitializeOutcome::AlreadyInitialized));

    host.router
        .navigate("/catalog", "/catalog", catalog_routes("Lamp"))
        .unwrap();
    assert_eq!(host.layer.events().len(), 1);
    assert_eq!(host.document.head_scripts().len(), 2);
}

#[test]
fn failed_injection_still_tracks_pages() {
    let host = host(false);
    host.document.fail_head_mutations(true);
    assert_eq!(
        host.root.on_init(),
        Some(InitializeOutcome::Initialized { scripts_injected: false })
    );

    host.router
        .navigate("/catalog", "/catalog", catalog_routes("Lamp"))
        .unwrap();
    assert_eq!(host.layer.events().len(), 1);
}

#[test]
fn custom_and_page_events_share_the_call_point() {
    let host = host(false);
    host.root.on_init();
    host.router
        .navigate("/catalog", "/catalog", catalog_routes("Lamp"))
        .unwrap();
    host.root.track_event().unwrap();
    host.root
        .analytics()
        .event("button_click", Some("User Interaction"), Some("Button Clicked"), Some("1"))
        .unwrap();

    let commands = host.layer.snapshot().commands;
    let names: Vec<_> = commands
        .iter()
        .map(|command| match command {
            GtagCommand::Event { name, .. } => name.as_str(),
            other => other.command_name(),
        })
        .collect();
    assert_eq!(names, ["page_view", "error_general", "button_click"]);
}
