mod api;
pub mod constants;
pub mod error;
pub mod events;
pub mod gtag;
mod logger;
pub mod script;
pub mod title;

pub use api::{Analytics, AnalyticsSettings, InitializeOutcome};
pub use events::{
    ErrorAction, ErrorCategory, EventAction, EventCategory, EventParams, TrackingAction, TrackingCategory,
};
pub use gtag::{DataLayer, GtagCommand, GtagSink};
pub use script::{HostDocument, MemoryDocument, ScriptTag};

#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
pub use gtag::WindowGtag;
#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
pub use script::BrowserDocument;
