//! Root component.
//!
//! The browser's event loop is the only driver: back/forward signals, load
//! results and in-app navigation all arrive as messages, get folded into the
//! navigation state, then the root re-runs its dispatch and renders the
//! selected view inside the page shell.

pub mod layout;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use root::App;

/// Flash text for a failed load, or `None` when the event carries no error.
#[must_use]
pub fn failure_flash(event: &railhead_core::AppEvent) -> Option<String> {
    match event {
        railhead_core::AppEvent::LoadResolved {
            key,
            outcome: Err(failure),
        } => Some(format!("Could not load game {}: {failure}", key.id)),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
mod root {
    use std::rc::Rc;

    use railhead_core::{
        AppEvent, Frame, NavigationSignal, NavigationSink, NavigationState, RootDispatcher, Route,
        Session,
    };
    use yew::prelude::*;

    use super::failure_flash;
    use super::layout::Shell;
    use super::view::RootView;
    use crate::config::client_config;
    use crate::history::WebHistory;
    use crate::provider::FetchProvider;

    pub struct App {
        dispatcher: RootDispatcher<WebHistory, FetchProvider>,
        state: NavigationState,
        session: Session,
        frame: Frame,
        flash: Option<AttrValue>,
    }

    impl Component for App {
        type Message = AppEvent;
        type Properties = ();

        fn create(ctx: &Context<Self>) -> Self {
            let config = client_config();
            let session = Session::from_config(config);
            let sink: NavigationSink = {
                let link = ctx.link().clone();
                Rc::new(move |signal: NavigationSignal| link.send_message(AppEvent::NavigationOccurred(signal)))
            };
            let provider = FetchProvider::new(
                Rc::new(config.clone()),
                ctx.link().callback(|event: AppEvent| event),
            );
            let mut dispatcher = RootDispatcher::new(
                WebHistory::new(config.router_base.clone()),
                provider,
                config.retry_policy(),
                sink,
            );
            let mut state = NavigationState::default();
            let frame = dispatcher.dispatch(&mut state, &session);
            log::info!("railhead started at {}", state.route());
            Self {
                dispatcher,
                state,
                session,
                frame,
                flash: None,
            }
        }

        fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
            if let Some(message) = failure_flash(&msg) {
                log::warn!("{message}");
                self.flash = Some(message.into());
            } else if matches!(msg, AppEvent::Navigate { .. } | AppEvent::NavigationOccurred(_)) {
                self.flash = None;
            }

            if !self.dispatcher.apply(&mut self.state, msg) {
                return false;
            }
            let frame = self.dispatcher.dispatch(&mut self.state, &self.session);
            let changed = frame != self.frame;
            self.frame = frame;
            changed || self.flash.is_some()
        }

        fn view(&self, ctx: &Context<Self>) -> Html {
            let on_navigate = ctx.link().callback(|route: Route| AppEvent::Navigate {
                route,
                payload: None,
            });
            let payload = self.state.game_state().payload().cloned();
            html! {
                <Shell
                    user={self.session.user.clone()}
                    flash={self.flash.clone()}
                    disable_user_errors={self.session.disable_user_errors}
                    on_navigate={on_navigate.clone()}
                >
                    <RootView view={self.frame.view.clone()} {payload} {on_navigate} />
                </Shell>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::failure_flash;
    use railhead_core::{AppEvent, GameKey, GameMode, GamePayload, LoadFailure};

    #[test]
    fn only_failed_loads_raise_a_flash() {
        let key = GameKey::new("5", GameMode::Multiplayer);
        let failed = AppEvent::LoadResolved {
            key: key.clone(),
            outcome: Err(LoadFailure::Http { status: 503 }),
        };
        let message = failure_flash(&failed).expect("flash");
        assert!(message.contains("game 5"));
        assert!(message.contains("503"));

        let loaded = AppEvent::LoadResolved {
            key,
            outcome: Ok(GamePayload::ready()),
        };
        assert_eq!(failure_flash(&loaded), None);
        assert_eq!(failure_flash(&AppEvent::RenderRequested), None);
    }
}
