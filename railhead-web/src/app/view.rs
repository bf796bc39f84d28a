use railhead_core::{GamePayload, Route, ViewSelection};
use yew::prelude::*;

use crate::pages::game::{GamePage, GameUnavailable, LoadingGame};
use crate::pages::home::HomePage;
use crate::pages::info::{About, CreateGame};
use crate::pages::reference::{Map, Tiles};
use crate::pages::user::{AccountRecovery, UserView};

#[derive(Properties, PartialEq, Clone)]
pub struct RootViewProps {
    pub view: ViewSelection,
    /// Snapshot of the current game, when one is loaded.
    #[prop_or_default]
    pub payload: Option<GamePayload>,
    pub on_navigate: Callback<Route>,
}

/// Renders exactly the content chosen for the current frame.
#[function_component(RootView)]
pub fn root_view(props: &RootViewProps) -> Html {
    let on_navigate = props.on_navigate.clone();
    match &props.view {
        ViewSelection::CreateGame => html! { <CreateGame /> },
        ViewSelection::Game { key, user } => html! {
            <GamePage game={key.clone()} payload={props.payload.clone()} user={user.clone()} />
        },
        ViewSelection::LoadingGame { .. } => html! { <LoadingGame /> },
        ViewSelection::GameUnavailable { key, reason } => html! {
            <GameUnavailable game={key.clone()} reason={reason.clone()} {on_navigate} />
        },
        ViewSelection::User { page, user } => html! { <UserView page={*page} user={user.clone()} /> },
        ViewSelection::Forgot { user } => html! { <AccountRecovery user={user.clone()} /> },
        ViewSelection::Reset { user } => html! { <AccountRecovery user={user.clone()} reset={true} /> },
        ViewSelection::About => html! { <About /> },
        ViewSelection::Tiles { route } => html! { <Tiles route={route.clone()} /> },
        ViewSelection::Map { route } => html! { <Map route={route.clone()} /> },
        ViewSelection::Home { user } => html! { <HomePage user={user.clone()} {on_navigate} /> },
    }
}
