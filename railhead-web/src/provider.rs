//! Game snapshot loading for the browser client.
//!
//! Hotseat and tutorial games never leave the browser and resolve locally.
//! Multiplayer games are fetched from the game server; either way the outcome
//! arrives later as an [`AppEvent::LoadResolved`].

use railhead_core::{GameMode, GamePayload, LoadFailure, LoadRequest};
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
pub use browser::FetchProvider;

/// Snapshot for a game that lives only in this browser.
#[must_use]
pub fn local_snapshot(request: &LoadRequest) -> GamePayload {
    let mode = match request.key.mode {
        GameMode::Multiplayer => "multiplayer",
        GameMode::Hotseat => "hotseat",
        GameMode::Tutorial => "tutorial",
    };
    GamePayload::ready()
        .with_field("id", request.key.id.clone())
        .with_field("mode", mode)
}

/// Interpret a game-server response.
///
/// # Errors
///
/// Returns [`LoadFailure::Http`] for non-success statuses and
/// [`LoadFailure::Decode`] when the body is not a game object.
pub fn decode_game_response(status: u16, body: Value) -> Result<GamePayload, LoadFailure> {
    if !(200..300).contains(&status) {
        return Err(LoadFailure::Http { status });
    }
    if !body.is_object() {
        return Err(LoadFailure::Decode(String::from(
            "game response is not an object",
        )));
    }
    let mut payload: GamePayload =
        serde_json::from_value(body).map_err(|err| LoadFailure::Decode(err.to_string()))?;
    // The server does not know about client-side load flags.
    payload.loaded = true;
    payload.loading = false;
    Ok(payload)
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::rc::Rc;

    use railhead_core::{AppEvent, ClientConfig, GameDataProvider, GamePayload, LoadFailure, LoadRequest};
    use serde_json::Value;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use yew::Callback;

    use super::{decode_game_response, local_snapshot};
    use crate::dom;

    /// Provider that reports every outcome through `on_resolved`.
    pub struct FetchProvider {
        config: Rc<ClientConfig>,
        on_resolved: Callback<AppEvent>,
    }

    impl FetchProvider {
        #[must_use]
        pub const fn new(config: Rc<ClientConfig>, on_resolved: Callback<AppEvent>) -> Self {
            Self {
                config,
                on_resolved,
            }
        }
    }

    impl GameDataProvider for FetchProvider {
        fn request(&mut self, request: LoadRequest) {
            let on_resolved = self.on_resolved.clone();
            if request.key.mode.is_local() {
                let payload = local_snapshot(&request);
                spawn_local(async move {
                    on_resolved.emit(AppEvent::LoadResolved {
                        key: request.key,
                        outcome: Ok(payload),
                    });
                });
                return;
            }

            let url = self
                .config
                .game_url(&request.key.id, request.pin.as_deref());
            log::debug!("fetching game {} from {url}", request.key);
            spawn_local(async move {
                let outcome = fetch_game(&url).await;
                if let Err(err) = &outcome {
                    log::warn!("loading game {} failed: {err}", request.key);
                }
                on_resolved.emit(AppEvent::LoadResolved {
                    key: request.key,
                    outcome,
                });
            });
        }
    }

    #[allow(clippy::future_not_send)]
    async fn fetch_game(url: &str) -> Result<GamePayload, LoadFailure> {
        let unavailable = |err: wasm_bindgen::JsValue| LoadFailure::Unavailable(dom::js_error_message(&err));
        let response = dom::fetch_response(url).await.map_err(unavailable)?;
        let status = response.status();
        if !response.ok() {
            return Err(LoadFailure::Http { status });
        }
        let json = JsFuture::from(response.json().map_err(unavailable)?)
            .await
            .map_err(|err| LoadFailure::Decode(dom::js_error_message(&err)))?;
        let body: Value = serde_wasm_bindgen::from_value(json)
            .map_err(|err| LoadFailure::Decode(err.to_string()))?;
        decode_game_response(status, body)
    }
}
