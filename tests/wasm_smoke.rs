#![cfg(all(target_arch = "wasm32", feature = "wasm-web"))]

use std::sync::Arc;

use gtag_route_analytics::analytics::{
    Analytics, AnalyticsSettings, BrowserDocument, DataLayer, HostDocument, InitializeOutcome,
};
use gtag_route_analytics::router::{RouteNode, Router, RouterState};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn head_script_count() -> u32 {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector_all("head script").ok())
        .map(|nodes| nodes.length())
        .unwrap_or(0)
}

#[wasm_bindgen_test]
fn initialize_appends_two_scripts_to_head() {
    let before = head_script_count();
    let analytics = Analytics::new(
        AnalyticsSettings::new("G-WASMTEST"),
        Arc::new(DataLayer::new()),
        Arc::new(BrowserDocument::new()),
        Arc::new(Router::new()),
    );

    assert_eq!(
        analytics.initialize(),
        InitializeOutcome::Initialized { scripts_injected: true }
    );
    assert_eq!(head_script_count(), before + 2);
}

#[wasm_bindgen_test]
fn navigation_updates_document_title() {
    let router = Arc::new(Router::new());
    let layer = Arc::new(DataLayer::new());
    let analytics = Analytics::new(
        AnalyticsSettings::new("G-WASMTITLE"),
        layer.clone(),
        Arc::new(BrowserDocument::new()),
        router.clone(),
    );
    analytics.initialize();

    let routes = RouterState::from_chain([RouteNode::new(""), RouteNode::new("docs").with_title("Docs")]);
    router.navigate("/docs", "/docs", routes).unwrap();

    assert_eq!(BrowserDocument::new().title(), "Docs");
    assert_eq!(layer.events()[0].0, "page_view");
}
