//! Minimal host router: navigation lifecycle events plus the activated route tree.
//!
//! Single-page frameworks own their routers; this module models just the surface the analytics
//! adapter consumes, so any framework can drive it by calling [`Router::navigate`] (or
//! [`Router::emit`] for finer control) from its own navigation hooks.

mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

pub use state::{RouteData, RouteId, RouteNode, RouterState};

use crate::util::{ListenerId, ListenerResult, ListenerSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouterEvent {
    NavigationStart {
        id: u64,
        url: String,
    },
    NavigationEnd {
        id: u64,
        url: String,
        url_after_redirects: String,
    },
    NavigationCancel {
        id: u64,
        url: String,
        reason: String,
    },
    NavigationError {
        id: u64,
        url: String,
        error: String,
    },
}

impl RouterEvent {
    pub fn id(&self) -> u64 {
        match self {
            RouterEvent::NavigationStart { id, .. }
            | RouterEvent::NavigationEnd { id, .. }
            | RouterEvent::NavigationCancel { id, .. }
            | RouterEvent::NavigationError { id, .. } => *id,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            RouterEvent::NavigationStart { url, .. }
            | RouterEvent::NavigationEnd { url, .. }
            | RouterEvent::NavigationCancel { url, .. }
            | RouterEvent::NavigationError { url, .. } => url,
        }
    }
}

#[derive(Default)]
pub struct Router {
    state: RwLock<Arc<RouterState>>,
    listeners: ListenerSet<RouterEvent>,
    navigation_id: AtomicU64,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.state().len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&RouterEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn state(&self) -> Arc<RouterState> {
        Arc::clone(&self.state.read().unwrap())
    }

    pub fn set_state(&self, state: RouterState) {
        *self.state.write().unwrap() = Arc::new(state);
    }

    /// Delivers `event` to every subscriber. A failing subscriber's error is returned as-is.
    pub fn emit(&self, event: &RouterEvent) -> ListenerResult {
        log::debug!("router event #{} for `{}`", event.id(), event.url());
        self.listeners.notify(event)
    }

    /// Runs a complete navigation: start event, state swap, end event.
    pub fn navigate(
        &self,
        url: impl Into<String>,
        url_after_redirects: impl Into<String>,
        state: RouterState,
    ) -> ListenerResult {
        let id = self.navigation_id.fetch_add(1, Ordering::SeqCst) + 1;
        let url = url.into();
        self.emit(&RouterEvent::NavigationStart { id, url: url.clone() })?;
        self.set_state(state);
        self.emit(&RouterEvent::NavigationEnd {
            id,
            url,
            url_after_redirects: url_after_redirects.into(),
        })
    }
}
