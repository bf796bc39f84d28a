//! `window.history` adapter for the synchronization core.

use railhead_core::{GamePayload, NavigationSignal};
use serde_json::Value;

/// Build the signal for a `popstate` whose state decoded to `state`.
#[must_use]
pub fn navigation_signal(state: Value, location: String) -> NavigationSignal {
    NavigationSignal {
        state: GamePayload::from_value(state),
        location,
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{PopStateListener, WebHistory};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::navigation_signal;
    use crate::dom;
    use crate::paths::{strip_base, with_base};
    use railhead_core::{BrowserHistory, GamePayload, HistoryError, NavigationSink, Route};
    use serde::Serialize;
    use serde_json::Value;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{PopStateEvent, Window};

    /// Browser history seen through the deployment base path.
    #[derive(Clone, Debug, Default)]
    pub struct WebHistory {
        base: Option<String>,
    }

    impl WebHistory {
        #[must_use]
        pub const fn new(base: Option<String>) -> Self {
            Self { base }
        }

        fn read_location(base: Option<&str>) -> String {
            dom::current_location()
                .map(|location| strip_base(&location, base))
                .unwrap_or_default()
        }
    }

    /// Installed `popstate` listener; removed from the window on drop.
    pub struct PopStateListener {
        window: Window,
        callback: Closure<dyn FnMut(PopStateEvent)>,
    }

    impl Drop for PopStateListener {
        fn drop(&mut self) {
            let _ = self.window.remove_event_listener_with_callback(
                "popstate",
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }

    impl BrowserHistory for WebHistory {
        type Subscription = PopStateListener;

        fn location(&self) -> String {
            Self::read_location(self.base.as_deref())
        }

        fn push_entry(
            &self,
            state: Option<&GamePayload>,
            route: &Route,
        ) -> Result<(), HistoryError> {
            let push_error = |reason: String| HistoryError::Push {
                route: route.to_string(),
                reason,
            };
            let history = dom::window()
                .ok_or(HistoryError::Unavailable)?
                .history()
                .map_err(|_| HistoryError::Unavailable)?;
            let js_state = match state {
                Some(payload) => payload
                    .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                    .map_err(|err| push_error(err.to_string()))?,
                None => JsValue::NULL,
            };
            let url = with_base(route.as_str(), self.base.as_deref());
            history
                .push_state_with_url(&js_state, route.as_str(), Some(&url))
                .map_err(|err| push_error(dom::js_error_message(&err)))
        }

        fn subscribe(&self, sink: NavigationSink) -> Result<PopStateListener, HistoryError> {
            let window = dom::window().ok_or(HistoryError::Unavailable)?;
            let base = self.base.clone();
            let callback = Closure::<dyn FnMut(PopStateEvent)>::new(move |event: PopStateEvent| {
                let state = serde_wasm_bindgen::from_value::<Value>(event.state())
                    .unwrap_or(Value::Null);
                let location = WebHistory::read_location(base.as_deref());
                sink(navigation_signal(state, location));
            });
            window
                .add_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref())
                .map_err(|err| {
                    dom::console_error(&dom::js_error_message(&err));
                    HistoryError::Unavailable
                })?;
            Ok(PopStateListener { window, callback })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn popstate_state_becomes_payload() {
        let signal = navigation_signal(
            json!({"loaded": true, "title": "1846"}),
            String::from("/game/3"),
        );
        assert_eq!(signal.location, "/game/3");
        let payload = signal.state.expect("payload");
        assert!(payload.loaded);
        assert_eq!(payload.fields.get("title"), Some(&json!("1846")));
    }

    #[test]
    fn null_state_carries_no_payload() {
        let signal = navigation_signal(Value::Null, String::from("/"));
        assert_eq!(signal.state, None);
    }
}
