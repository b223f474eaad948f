use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use serde_json::Value;

use crate::analytics::constants::{
    DEFAULT_DATA_LAYER_NAME, ERROR_ACTION_PARAM, ERROR_CATEGORY_PARAM, EVENT_ACTION_PARAM,
    EVENT_CATEGORY_PARAM, EVENT_LABEL_PARAM, EVENT_VALUE_PARAM, GTAG_URL, PAGE_LOCATION_PARAM,
    PAGE_PATH_PARAM, PAGE_TITLE_PARAM, PAGE_VIEW_EVENT, TITLE_SEPARATOR,
};
use crate::analytics::error::{invalid_argument, AnalyticsResult};
use crate::analytics::events::{EventParams, TrackingAction, TrackingCategory};
use crate::analytics::gtag::{GtagCommand, GtagSink};
use crate::analytics::logger::LOGGER;
use crate::analytics::script::{bootstrap_script, loader_script, HostDocument};
use crate::analytics::title::{compose_title, title_fragments};
use crate::router::{Router, RouterEvent};
use crate::util::ListenerId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// gtag measurement/site identifier, e.g. `G-XXXXXXX`.
    pub site_id: String,
    pub data_layer_name: String,
    pub script_url: String,
    pub title_separator: String,
}

impl AnalyticsSettings {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            data_layer_name: DEFAULT_DATA_LAYER_NAME.to_string(),
            script_url: GTAG_URL.to_string(),
            title_separator: TITLE_SEPARATOR.to_string(),
        }
    }

    pub fn with_data_layer_name(mut self, name: impl Into<String>) -> Self {
        self.data_layer_name = name.into();
        self
    }

    pub fn with_script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }

    pub fn with_title_separator(mut self, separator: impl Into<String>) -> Self {
        self.title_separator = separator.into();
        self
    }
}

/// Result of [`Analytics::initialize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitializeOutcome {
    /// First initialization. `scripts_injected` is false when the document refused the tags;
    /// page tracking is active either way.
    Initialized { scripts_injected: bool },
    AlreadyInitialized,
}

/// Bridges the host router and document to the gtag call-point.
#[derive(Clone)]
pub struct Analytics {
    inner: Arc<AnalyticsInner>,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("site_id", &self.inner.settings.site_id)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

struct AnalyticsInner {
    settings: AnalyticsSettings,
    sink: Arc<dyn GtagSink>,
    document: Arc<dyn HostDocument>,
    router: Arc<Router>,
    initialized: AtomicBool,
    navigation_listener: Mutex<Option<ListenerId>>,
}

impl Drop for AnalyticsInner {
    fn drop(&mut self) {
        if let Ok(slot) = self.navigation_listener.get_mut() {
            if let Some(id) = slot.take() {
                self.router.unsubscribe(id);
            }
        }
    }
}

impl Analytics {
    pub fn new(
        settings: AnalyticsSettings,
        sink: Arc<dyn GtagSink>,
        document: Arc<dyn HostDocument>,
        router: Arc<Router>,
    ) -> Self {
        let inner = AnalyticsInner {
            settings,
            sink,
            document,
            router,
            initialized: AtomicBool::new(false),
            navigation_listener: Mutex::new(None),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Adapter wired to `window.gtag` and `window.document`.
    #[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
    pub fn for_browser(settings: AnalyticsSettings, router: Arc<Router>) -> Self {
        use crate::analytics::gtag::WindowGtag;
        use crate::analytics::script::BrowserDocument;

        Self::new(
            settings,
            Arc::new(WindowGtag::new()),
            Arc::new(BrowserDocument::new()),
            router,
        )
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.inner.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::SeqCst)
    }

    /// Starts page tracking and injects the gtag scripts into the document head.
    ///
    /// Injection failures are logged and swallowed; the adapter still counts as initialized and
    /// keeps tracking navigations. Repeated calls do nothing.
    pub fn initialize(&self) -> InitializeOutcome {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            LOGGER.warn("Google Analytics is already initialized; ignoring repeated initialize()");
            return InitializeOutcome::AlreadyInitialized;
        }

        self.track_navigation();

        let scripts_injected = match self.inject_scripts() {
            Ok(()) => true,
            Err(err) => {
                LOGGER.error_with(["Error adding Google Analytics".to_string(), err.to_string()]);
                false
            }
        };

        InitializeOutcome::Initialized { scripts_injected }
    }

    /// Sends a generic event named after `action`. Category, label and value are only included
    /// when non-empty.
    ///
    /// A blank `action` is rejected with `analytics/invalid-argument` before anything is sent.
    /// `page_view` and `track_custom_event` always carry a fixed or enumerated name and are not
    /// checked.
    pub fn event(
        &self,
        action: &str,
        category: Option<&str>,
        label: Option<&str>,
        value: Option<&str>,
    ) -> AnalyticsResult<()> {
        validate_event_name(action)?;
        let mut params = EventParams::new();
        for (key, field) in [
            (EVENT_CATEGORY_PARAM, category),
            (EVENT_LABEL_PARAM, label),
            (EVENT_VALUE_PARAM, value),
        ] {
            if let Some(text) = field.filter(|text| !text.is_empty()) {
                params.insert(key.to_string(), Value::String(text.to_string()));
            }
        }
        self.send(action, params)
    }

    /// Sends a taxonomy event named after `category`.
    ///
    /// With `is_error` the keys are `error_category`/`error_action` instead of
    /// `event_category`/`event_action`. Entries in `extra` are merged last and win on collision.
    pub fn track_custom_event(
        &self,
        category: impl Into<TrackingCategory>,
        action: impl Into<TrackingAction>,
        extra: Option<EventParams>,
        is_error: bool,
    ) -> AnalyticsResult<()> {
        let category = category.into();
        let action = action.into();
        let (category_key, action_key) = if is_error {
            (ERROR_CATEGORY_PARAM, ERROR_ACTION_PARAM)
        } else {
            (EVENT_CATEGORY_PARAM, EVENT_ACTION_PARAM)
        };

        let mut params = EventParams::new();
        params.insert(category_key.to_string(), Value::from(category.as_str()));
        params.insert(action_key.to_string(), Value::from(action.as_str()));
        params.extend(extra.unwrap_or_default());

        self.send(category.as_str(), params)
    }

    /// Sends a `page_view` for `path`, stamped with the document's current location.
    pub fn page_view(&self, title: &str, path: &str) -> AnalyticsResult<()> {
        let mut params = EventParams::new();
        params.insert(PAGE_TITLE_PARAM.to_string(), Value::from(title));
        params.insert(PAGE_PATH_PARAM.to_string(), Value::from(path));
        params.insert(
            PAGE_LOCATION_PARAM.to_string(),
            Value::from(self.inner.document.location_href()),
        );
        LOGGER.debug(format!("Sending Google Analytics page view for: {path}"));
        self.send(PAGE_VIEW_EVENT, params)
    }

    fn send(&self, name: &str, params: EventParams) -> AnalyticsResult<()> {
        self.inner.sink.call(GtagCommand::event(name, params))
    }

    fn inject_scripts(&self) -> AnalyticsResult<()> {
        let settings = &self.inner.settings;
        let loader = loader_script(&settings.script_url, &settings.site_id)?;
        self.inner.document.append_to_head(&loader)?;
        let bootstrap = bootstrap_script(&settings.data_layer_name, &settings.site_id);
        self.inner.document.append_to_head(&bootstrap)
    }

    // Weak so the router's listener list does not keep the adapter alive.
    fn track_navigation(&self) {
        let weak: Weak<AnalyticsInner> = Arc::downgrade(&self.inner);
        let id = self.inner.router.subscribe(move |event: &RouterEvent| {
            let Some(inner) = weak.upgrade() else {
                return Ok(());
            };
            Analytics { inner }.handle_router_event(event)?;
            Ok(())
        });
        *self.inner.navigation_listener.lock().unwrap() = Some(id);
    }

    fn handle_router_event(&self, event: &RouterEvent) -> AnalyticsResult<()> {
        let RouterEvent::NavigationEnd {
            url_after_redirects,
            ..
        } = event
        else {
            return Ok(());
        };

        let state = self.inner.router.state();
        let title = compose_title(&title_fragments(&state), &self.inner.settings.title_separator);
        self.inner.document.set_title(&title);
        self.page_view(&title, url_after_redirects)
    }
}

fn validate_event_name(name: &str) -> AnalyticsResult<()> {
    if name.trim().is_empty() {
        return Err(invalid_argument("Event name must not be empty"));
    }
    Ok(())
}
