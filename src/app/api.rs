use serde_json::Value;

use crate::analytics::error::AnalyticsResult;
use crate::analytics::{Analytics, ErrorAction, ErrorCategory, EventParams, InitializeOutcome};
use crate::app::constants::{APP_TITLE, ERROR_MESSAGE_PARAM, SIMULATED_ERROR_MESSAGE};
use crate::app::logger::LOGGER;
use crate::platform::environment::AppEnvironment;

/// Startup hook for the host application.
#[derive(Clone, Debug)]
pub struct AppRoot {
    environment: AppEnvironment,
    analytics: Analytics,
}

impl AppRoot {
    pub fn new(environment: AppEnvironment, analytics: Analytics) -> Self {
        Self {
            environment,
            analytics,
        }
    }

    /// Root wired to the browser with the environment resolved from globals.
    #[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
    pub fn for_browser(router: std::sync::Arc<crate::router::Router>) -> Self {
        use crate::analytics::AnalyticsSettings;

        let environment = AppEnvironment::load();
        let settings = AnalyticsSettings::new(environment.google_analytics_id.clone());
        Self::new(environment, Analytics::for_browser(settings, router))
    }

    pub fn title(&self) -> &'static str {
        APP_TITLE
    }

    pub fn environment(&self) -> &AppEnvironment {
        &self.environment
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Analytics only runs outside production builds.
    pub fn analytics_enabled(&self) -> bool {
        !self.environment.production
    }

    /// Initializes analytics when enabled; `None` when the environment gate is closed.
    pub fn on_init(&self) -> Option<InitializeOutcome> {
        if !self.analytics_enabled() {
            LOGGER.debug("production build; analytics disabled");
            return None;
        }
        if self.environment.google_analytics_id.is_empty() {
            LOGGER.warn("no Google Analytics id configured; events will not be attributed");
        }
        Some(self.analytics.initialize())
    }

    /// Reports a simulated unhandled exception.
    pub fn track_event(&self) -> AnalyticsResult<()> {
        let mut extra = EventParams::new();
        extra.insert(
            ERROR_MESSAGE_PARAM.to_string(),
            Value::from(SIMULATED_ERROR_MESSAGE),
        );
        self.analytics.track_custom_event(
            ErrorCategory::General,
            ErrorAction::UnhandledException,
            Some(extra),
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsSettings, DataLayer, MemoryDocument};
    use crate::router::Router;
    use std::sync::Arc;

    fn app(production: bool) -> (AppRoot, Arc<DataLayer>, Arc<MemoryDocument>) {
        let environment = AppEnvironment::new(production, "G-APP");
        let layer = Arc::new(DataLayer::new());
        let document = Arc::new(MemoryDocument::new("https://app.example/"));
        let analytics = Analytics::new(
            AnalyticsSettings::new(environment.google_analytics_id.clone()),
            layer.clone(),
            document.clone(),
            Arc::new(Router::new()),
        );
        (AppRoot::new(environment, analytics), layer, document)
    }

    #[test]
    fn initializes_outside_production() {
        let (root, _, document) = app(false);
        assert_eq!(
            root.on_init(),
            Some(InitializeOutcome::Initialized { scripts_injected: true })
        );
        assert!(root.analytics().is_initialized());
        assert_eq!(document.head_scripts().len(), 2);
    }

    #[test]
    fn production_build_skips_initialization() {
        let (root, _, document) = app(true);
        assert_eq!(root.on_init(), None);
        assert!(!root.analytics().is_initialized());
        assert!(document.head_scripts().is_empty());
    }

    #[test]
    fn track_event_reports_simulated_error() {
        let (root, layer, _) = app(false);
        root.track_event().unwrap();

        let events = layer.events();
        assert_eq!(events.len(), 1);
        let (name, params) = &events[0];
        assert_eq!(name, "error_general");
        assert_eq!(params["error_category"], Value::from("error_general"));
        assert_eq!(params["error_action"], Value::from("error_unhandled_exception"));
        assert_eq!(params["error_message"], Value::from("Simulated error for testing"));
    }
}
