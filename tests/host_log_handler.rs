#![cfg(not(target_arch = "wasm32"))]

// Runs in its own binary so the analytics logger is created only after the host handler exists.

use std::sync::{Arc, Mutex};

use gtag_route_analytics::analytics::{
    Analytics, AnalyticsSettings, DataLayer, InitializeOutcome, MemoryDocument,
};
use gtag_route_analytics::logger::{set_user_log_handler, LogCallbackParams, LogLevel};
use gtag_route_analytics::router::Router;

#[test]
fn handler_installed_at_startup_sees_injection_failure() {
    let captured = Arc::new(Mutex::new(Vec::<LogCallbackParams>::new()));
    let sink = Arc::clone(&captured);
    set_user_log_handler(
        Some(Arc::new(move |params: LogCallbackParams| sink.lock().unwrap().push(params))),
        Some(LogLevel::Error),
    );

    let document = Arc::new(MemoryDocument::new("https://store.example/"));
    document.fail_head_mutations(true);
    let analytics = Analytics::new(
        AnalyticsSettings::new("G-STARTUP"),
        Arc::new(DataLayer::new()),
        document,
        Arc::new(Router::new()),
    );

    assert_eq!(
        analytics.initialize(),
        InitializeOutcome::Initialized { scripts_injected: false }
    );
    set_user_log_handler(None, None);

    let records = captured.lock().unwrap();
    let record = records
        .iter()
        .find(|params| params.logger_type == "@gtag/analytics")
        .expect("analytics error record");
    assert_eq!(record.level, LogLevel::Error);
    assert!(record.message.starts_with("Error adding Google Analytics"));
}
