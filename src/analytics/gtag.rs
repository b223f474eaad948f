//! The gtag call-point the adapter writes to.
//!
//! In the browser the call-point is the global `gtag` function defined by the injected bootstrap
//! script. The adapter never reaches for it directly: it receives a [`GtagSink`] at construction,
//! so hosts without a DOM (and tests) can plug in the recording [`DataLayer`] instead.

use std::sync::Mutex;

use serde_json::Value;

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::events::EventParams;

/// A single call to `gtag(command, ...args)` issued by the adapter.
///
/// The `js` and `config` calls belong to the injected bootstrap script, so only `event` is
/// modelled here.
#[derive(Clone, Debug, PartialEq)]
pub enum GtagCommand {
    Event { name: String, params: EventParams },
}

impl GtagCommand {
    pub fn event(name: impl Into<String>, params: EventParams) -> Self {
        GtagCommand::Event {
            name: name.into(),
            params,
        }
    }

    pub fn command_name(&self) -> &'static str {
        match self {
            GtagCommand::Event { .. } => "event",
        }
    }

    /// Positional arguments as they are passed to `gtag`, command name first.
    pub fn to_arguments(&self) -> Vec<Value> {
        let mut args = vec![Value::String(self.command_name().to_string())];
        match self {
            GtagCommand::Event { name, params } => {
                args.push(Value::String(name.clone()));
                args.push(Value::Object(params.clone()));
            }
        }
        args
    }
}

/// Destination for gtag commands.
///
/// Errors returned here are not handled by the adapter; they surface to whoever triggered the
/// call (the caller of `event`, or the router's event emitter for page views).
pub trait GtagSink: Send + Sync {
    fn call(&self, command: GtagCommand) -> AnalyticsResult<()>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataLayerState {
    pub commands: Vec<GtagCommand>,
}

/// In-memory call-point that records every command in order.
#[derive(Debug, Default)]
pub struct DataLayer {
    state: Mutex<DataLayerState>,
    failure: Mutex<Option<AnalyticsError>>,
}

impl DataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `error`, or restores normal behaviour with `None`.
    pub fn fail_with(&self, error: Option<AnalyticsError>) {
        *self.failure.lock().unwrap() = error;
    }

    pub fn snapshot(&self) -> DataLayerState {
        self.state.lock().unwrap().clone()
    }

    /// Recorded `event` commands as `(name, params)` pairs.
    pub fn events(&self) -> Vec<(String, EventParams)> {
        self.state
            .lock()
            .unwrap()
            .commands
            .iter()
            .map(|command| match command {
                GtagCommand::Event { name, params } => (name.clone(), params.clone()),
            })
            .collect()
    }

    pub fn reset(&self) {
        *self.state.lock().unwrap() = DataLayerState::default();
    }
}

impl GtagSink for DataLayer {
    fn call(&self, command: GtagCommand) -> AnalyticsResult<()> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.state.lock().unwrap().commands.push(command);
        Ok(())
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
pub use browser::WindowGtag;

#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
mod browser {
    use js_sys::{Array, Function, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    use super::{GtagCommand, GtagSink};
    use crate::analytics::constants::GTAG_FUNCTION_NAME;
    use crate::analytics::error::{vendor_call_failed, AnalyticsResult};

    /// Forwards commands to the page's global `gtag` function.
    #[derive(Clone, Debug, Default)]
    pub struct WindowGtag;

    impl WindowGtag {
        pub fn new() -> Self {
            Self
        }

        fn function(&self) -> AnalyticsResult<Function> {
            let global = js_sys::global();
            let value = Reflect::get(&global, &JsValue::from_str(GTAG_FUNCTION_NAME))
                .map_err(|err| vendor_call_failed(format!("failed to read window.gtag: {err:?}")))?;
            value
                .dyn_into::<Function>()
                .map_err(|_| vendor_call_failed("window.gtag is not defined"))
        }
    }

    impl GtagSink for WindowGtag {
        fn call(&self, command: GtagCommand) -> AnalyticsResult<()> {
            let function = self.function()?;
            let args = Array::new();
            for arg in command.to_arguments() {
                let serialized = arg.to_string();
                let value = js_sys::JSON::parse(&serialized)
                    .map_err(|err| vendor_call_failed(format!("invalid gtag argument: {err:?}")))?;
                args.push(&value);
            }
            function
                .apply(&JsValue::NULL, &args)
                .map(|_| ())
                .map_err(|err| vendor_call_failed(format!("gtag call failed: {err:?}")))
        }
    }
}
