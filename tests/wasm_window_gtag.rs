#![cfg(all(target_arch = "wasm32", feature = "wasm-web"))]

use std::sync::Arc;

use gtag_route_analytics::analytics::{
    Analytics, AnalyticsSettings, EventParams, GtagCommand, GtagSink, MemoryDocument, WindowGtag,
};
use gtag_route_analytics::router::{RouteNode, Router, RouterState};
use js_sys::{Function, Reflect};
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const CALLS_KEY: &str = "__recordedGtagCalls";

fn install_recording_gtag() {
    let global = js_sys::global();
    Reflect::set(&global, &JsValue::from_str(CALLS_KEY), &js_sys::Array::new()).unwrap();
    let stub = Function::new_no_args(&format!(
        "globalThis.{CALLS_KEY}.push(Array.prototype.slice.call(arguments));"
    ));
    Reflect::set(&global, &JsValue::from_str("gtag"), &stub).unwrap();
}

fn remove_gtag() {
    Reflect::delete_property(&js_sys::global(), &JsValue::from_str("gtag")).unwrap();
}

fn recorded_calls() -> Vec<Value> {
    let calls = Reflect::get(&js_sys::global(), &JsValue::from_str(CALLS_KEY)).unwrap();
    let serialized = js_sys::JSON::stringify(&calls).unwrap().as_string().unwrap();
    serde_json::from_str(&serialized).unwrap()
}

#[wasm_bindgen_test]
fn event_and_page_view_reach_window_gtag() {
    install_recording_gtag();
    let router = Arc::new(Router::new());
    let analytics = Analytics::new(
        AnalyticsSettings::new("G-WINDOW"),
        Arc::new(WindowGtag::new()),
        Arc::new(MemoryDocument::new("https://store.example/docs")),
        router.clone(),
    );
    analytics.initialize();

    analytics
        .event("search", Some("engagement"), None, Some("3"))
        .unwrap();
    let routes = RouterState::from_chain([RouteNode::new(""), RouteNode::new("docs").with_title("Docs")]);
    router.navigate("/docs", "/docs", routes).unwrap();

    assert_eq!(
        recorded_calls(),
        vec![
            json!(["event", "search", {"event_category": "engagement", "value": "3"}]),
            json!(["event", "page_view", {
                "page_title": "Docs",
                "page_path": "/docs",
                "page_location": "https://store.example/docs"
            }]),
        ]
    );
    remove_gtag();
}

#[wasm_bindgen_test]
fn missing_window_gtag_is_a_vendor_call_error() {
    remove_gtag();
    let err = WindowGtag::new()
        .call(GtagCommand::event("click", EventParams::new()))
        .unwrap_err();

    assert_eq!(err.code_str(), "analytics/vendor-call");
    assert!(err.message().contains("window.gtag is not defined"));
}
