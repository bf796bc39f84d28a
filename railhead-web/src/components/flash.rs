use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FlashProps {
    pub message: Option<AttrValue>,
    /// Suppresses user-facing error banners; the message is still logged.
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(Flash)]
pub fn flash(props: &FlashProps) -> Html {
    match (&props.message, props.disabled) {
        (Some(message), false) => html! {
            <div id="flash" class="flash" role="alert" aria-live="assertive">{ message.clone() }</div>
        },
        _ => html! {},
    }
}
