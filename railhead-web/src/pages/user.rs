use railhead_core::{User, UserPage};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct UserPageProps {
    pub page: UserPage,
    pub user: Option<User>,
}

#[function_component(UserView)]
pub fn user_view(props: &UserPageProps) -> Html {
    let heading = match props.page {
        UserPage::Signup => "Sign up",
        UserPage::Login => "Log in",
        UserPage::Profile => "Profile",
    };
    let body = match (props.page, &props.user) {
        (UserPage::Profile, Some(user)) => html! { <p class="user-name">{ user.name.clone() }</p> },
        (UserPage::Profile, None) => html! { <p>{ "Log in to see your profile." }</p> },
        (_, Some(user)) => html! { <p>{ format!("Already signed in as {}.", user.name) }</p> },
        (_, None) => html! {
            <form class="account-form">
                <input type="email" name="email" placeholder="Email" />
                <input type="password" name="password" placeholder="Password" />
            </form>
        },
    };
    html! {
        <section class={classes!("panel", "user", heading.to_lowercase().replace(' ', "-"))}>
            <h1>{ heading }</h1>
            { body }
        </section>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AccountRecoveryProps {
    pub user: Option<User>,
    /// `true` for the reset step, `false` for the forgot-password request.
    #[prop_or_default]
    pub reset: bool,
}

#[function_component(AccountRecovery)]
pub fn account_recovery(props: &AccountRecoveryProps) -> Html {
    let (heading, field) = if props.reset {
        ("Reset password", "New password")
    } else {
        ("Forgot password", "Email")
    };
    html! {
        <section class="panel recovery">
            <h1>{ heading }</h1>
            if let Some(user) = &props.user {
                <p>{ format!("Signed in as {}.", user.name) }</p>
            }
            <form class="account-form">
                <input name="recovery" placeholder={field} />
            </form>
        </section>
    }
}
