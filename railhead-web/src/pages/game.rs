use railhead_core::{GameKey, GameMode, GamePayload, Route, User};
use yew::prelude::*;

use crate::components::link::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct GamePageProps {
    pub game: GameKey,
    pub payload: Option<GamePayload>,
    pub user: Option<User>,
}

const fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Multiplayer => "Multiplayer",
        GameMode::Hotseat => "Hotseat",
        GameMode::Tutorial => "Tutorial",
    }
}

/// Board view for a loaded game.
#[function_component(GamePage)]
pub fn game_page(props: &GamePageProps) -> Html {
    let title = props
        .payload
        .as_ref()
        .and_then(|payload| payload.fields.get("title"))
        .and_then(|title| title.as_str())
        .map_or_else(|| format!("Game {}", props.game.id), str::to_string);
    let seat = props
        .user
        .as_ref()
        .map_or_else(|| String::from("Spectating"), |user| format!("Playing as {}", user.name));
    html! {
        <section class="panel game" data-game-id={props.game.id.clone()}>
            <h1>{ title }</h1>
            <p class="game-mode">{ mode_label(props.game.mode) }</p>
            <p class="game-seat">{ seat }</p>
        </section>
    }
}

#[function_component(LoadingGame)]
pub fn loading_game() -> Html {
    html! {
        <section class="panel loading" aria-busy="true" aria-live="polite">
            { "Loading game..." }
        </section>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct GameUnavailableProps {
    pub game: GameKey,
    #[prop_or_default]
    pub reason: Option<String>,
    pub on_navigate: Callback<Route>,
}

/// Shown once every allowed load attempt for a game has failed.
#[function_component(GameUnavailable)]
pub fn game_unavailable(props: &GameUnavailableProps) -> Html {
    html! {
        <section class="panel game-unavailable" role="alert">
            <h1>{ format!("Game {} could not be loaded", props.game.id) }</h1>
            if let Some(reason) = &props.reason {
                <p class="failure-reason">{ reason.clone() }</p>
            }
            <Link to={Route::home()} on_navigate={props.on_navigate.clone()}>
                { "Back to games" }
            </Link>
        </section>
    }
}
