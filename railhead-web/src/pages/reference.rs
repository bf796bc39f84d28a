use railhead_core::Route;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ReferenceProps {
    pub route: Route,
}

/// Reference views receive the full route so they can read their own
/// parameters out of it.
fn reference_panel(class: &'static str, heading: &'static str, route: &Route) -> Html {
    let subject = route
        .as_str()
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|segment| !segment.is_empty() && *segment != class)
        .map(str::to_string);
    html! {
        <section class={classes!("panel", class)} data-route={route.to_string()}>
            <h1>{ heading }</h1>
            if let Some(subject) = subject {
                <p class="subject">{ subject }</p>
            }
        </section>
    }
}

#[function_component(Tiles)]
pub fn tiles(props: &ReferenceProps) -> Html {
    reference_panel("tiles", "Tiles", &props.route)
}

#[function_component(Map)]
pub fn map(props: &ReferenceProps) -> Html {
    reference_panel("map", "Map", &props.route)
}
