#![doc = include_str!("RUSTDOC.md")]

pub mod analytics;
pub mod app;
pub mod logger;
pub mod platform;
pub mod router;
pub mod util;
