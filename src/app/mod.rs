//! Application root that decides whether analytics runs and exposes a sample tracking action.

mod api;
pub mod constants;
mod logger;

pub use api::AppRoot;
pub use crate::platform::environment::AppEnvironment;
