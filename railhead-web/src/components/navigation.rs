use railhead_core::{Route, User};
use yew::prelude::*;

use super::link::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct NavigationProps {
    pub user: Option<User>,
    pub on_navigate: Callback<Route>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let nav = |path: &str, label: &'static str| {
        html! {
            <li>
                <Link to={Route::or_home(path)} on_navigate={props.on_navigate.clone()}>
                    { label }
                </Link>
            </li>
        }
    };
    let account = if props.user.is_some() {
        nav("/profile", "Profile")
    } else {
        html! { <>{ nav("/signup", "Signup") }{ nav("/login", "Login") }</> }
    };
    html! {
        <nav id="nav" aria-label="Main">
            <ul>
                { nav("/", "Home") }
                { nav("/new_game", "Create Game") }
                { nav("/about", "About") }
                { account }
            </ul>
        </nav>
    }
}
