use railhead_core::{Route, User};
use yew::prelude::*;

use crate::components::link::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct HomePageProps {
    pub user: Option<User>,
    pub on_navigate: Callback<Route>,
}

/// Landing view and fallback for every unmatched location.
#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let greeting = props
        .user
        .as_ref()
        .map_or_else(|| String::from("Welcome"), |user| format!("Welcome back, {}", user.name));
    html! {
        <section class="panel home">
            <h1>{ greeting }</h1>
            <p>{ "Start a new game, or open one you are already playing." }</p>
            <Link to={Route::or_home("/new_game")} on_navigate={props.on_navigate.clone()}>
                { "Create a game" }
            </Link>
            <Link to={Route::or_home("/tutorial")} on_navigate={props.on_navigate.clone()}>
                { "Play the tutorial" }
            </Link>
        </section>
    }
}
