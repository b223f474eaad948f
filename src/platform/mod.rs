pub mod environment;

pub use environment::AppEnvironment;
