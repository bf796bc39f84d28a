use railhead_core::Route;
use yew::prelude::*;

use crate::config::configured_router_base;
use crate::paths::with_base;

#[derive(Properties, PartialEq, Clone)]
pub struct LinkProps {
    pub to: Route,
    pub on_navigate: Callback<Route>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Anchor that hands the click to the root instead of reloading the page.
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let onclick = {
        let to = props.to.clone();
        let cb = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            cb.emit(to.clone());
        })
    };
    let href = with_base(props.to.as_str(), configured_router_base());
    html! {
        <a {href} class={props.class.clone()} {onclick}>{ for props.children.iter() }</a>
    }
}
