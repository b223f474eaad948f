pub mod subscribe;

pub use subscribe::{Listener, ListenerError, ListenerId, ListenerResult, ListenerSet};
