use railhead_core::{Route, User};
use yew::prelude::*;

use crate::components::flash::Flash;
use crate::components::navigation::Navigation;

#[derive(Properties, PartialEq, Clone)]
pub struct ShellProps {
    pub user: Option<User>,
    #[prop_or_default]
    pub flash: Option<AttrValue>,
    #[prop_or_default]
    pub disable_user_errors: bool,
    pub on_navigate: Callback<Route>,
    #[prop_or_default]
    pub children: Children,
}

/// Page chrome: navigation, flash banner, then the routed content.
#[function_component(Shell)]
pub fn shell(props: &ShellProps) -> Html {
    html! {
        <div id="app">
            <Navigation user={props.user.clone()} on_navigate={props.on_navigate.clone()} />
            <Flash message={props.flash.clone()} disabled={props.disable_user_errors} />
            <main id="main" role="main">
                { for props.children.iter() }
            </main>
        </div>
    }
}
