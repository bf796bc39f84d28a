use futures::executor::block_on;
use railhead_core::{GameKey, GameMode, GamePayload, Route, User, UserPage, ViewSelection};
use railhead_web::app::layout::{Shell, ShellProps};
use railhead_web::app::view::{RootView, RootViewProps};
use railhead_web::components::flash::{Flash, FlashProps};
use railhead_web::components::link::{Link, LinkProps};
use railhead_web::config::configured_router_base;
use railhead_web::paths::with_base;
use railhead_web::components::navigation::{Navigation, NavigationProps};
use yew::{Callback, LocalServerRenderer};

fn render_view(view: ViewSelection, payload: Option<GamePayload>) -> String {
    let props = RootViewProps {
        view,
        payload,
        on_navigate: Callback::noop(),
    };
    block_on(LocalServerRenderer::<RootView>::with_props(props).render())
}

fn alice() -> User {
    User {
        id: 1,
        name: String::from("alice"),
    }
}

#[test]
fn loading_view_shows_placeholder_text() {
    let html = render_view(
        ViewSelection::LoadingGame {
            key: GameKey::new("7", GameMode::Multiplayer),
        },
        None,
    );
    assert!(html.contains("Loading game..."));
}

#[test]
fn game_view_uses_snapshot_title() {
    let payload = GamePayload::ready().with_field("title", "1846");
    let html = render_view(
        ViewSelection::Game {
            key: GameKey::new("7", GameMode::Hotseat),
            user: Some(alice()),
        },
        Some(payload),
    );
    assert!(html.contains("1846"));
    assert!(html.contains("Hotseat"));
    assert!(html.contains("Playing as alice"));
}

#[test]
fn game_view_without_title_falls_back_to_id() {
    let html = render_view(
        ViewSelection::Game {
            key: GameKey::new("12", GameMode::Multiplayer),
            user: None,
        },
        Some(GamePayload::ready()),
    );
    assert!(html.contains("Game 12"));
    assert!(html.contains("Spectating"));
}

#[test]
fn unavailable_game_links_home_and_explains_failure() {
    let html = render_view(
        ViewSelection::GameUnavailable {
            key: GameKey::new("9", GameMode::Multiplayer),
            reason: Some(String::from("game server answered with status 503")),
        },
        None,
    );
    assert!(html.contains("could not be loaded"));
    assert!(html.contains("status 503"));
    assert!(html.contains("href=\"/\""));

    let html = render_view(
        ViewSelection::GameUnavailable {
            key: GameKey::new("9", GameMode::Multiplayer),
            reason: None,
        },
        None,
    );
    assert!(!html.contains("failure-reason"));
}

#[test]
fn static_views_render_their_headings() {
    let cases = [
        (ViewSelection::CreateGame, "Create Game"),
        (ViewSelection::About, "About"),
        (
            ViewSelection::User {
                page: UserPage::Signup,
                user: None,
            },
            "Sign up",
        ),
        (
            ViewSelection::User {
                page: UserPage::Profile,
                user: Some(alice()),
            },
            "alice",
        ),
        (ViewSelection::Forgot { user: None }, "Forgot password"),
        (ViewSelection::Reset { user: None }, "Reset password"),
        (ViewSelection::Home { user: Some(alice()) }, "Welcome back, alice"),
    ];
    for (view, needle) in cases {
        let label = view.label();
        let html = render_view(view, None);
        assert!(html.contains(needle), "{label}: {html}");
    }
}

#[test]
fn reference_views_receive_the_full_route() {
    let route = Route::or_home("/tiles/1889?rotate=2");
    let html = render_view(ViewSelection::Tiles { route }, None);
    assert!(html.contains("data-route=\"/tiles/1889?rotate=2\""));
    assert!(html.contains("1889"));

    let html = render_view(
        ViewSelection::Map {
            route: Route::or_home("/map"),
        },
        None,
    );
    assert!(html.contains("Map"));
    assert!(!html.contains("class=\"subject\""));
}

#[test]
fn navigation_offers_account_links_by_session() {
    let anonymous = block_on(
        LocalServerRenderer::<Navigation>::with_props(NavigationProps {
            user: None,
            on_navigate: Callback::noop(),
        })
        .render(),
    );
    assert!(anonymous.contains("Login"));
    assert!(!anonymous.contains("Profile"));

    let signed_in = block_on(
        LocalServerRenderer::<Navigation>::with_props(NavigationProps {
            user: Some(alice()),
            on_navigate: Callback::noop(),
        })
        .render(),
    );
    assert!(signed_in.contains("Profile"));
    assert!(signed_in.contains("href=\"/new_game\""));
}

#[test]
fn flash_respects_disabled_user_errors() {
    let shown = block_on(
        LocalServerRenderer::<Flash>::with_props(FlashProps {
            message: Some("Could not load game 3".into()),
            disabled: false,
        })
        .render(),
    );
    assert!(shown.contains("Could not load game 3"));

    let hidden = block_on(
        LocalServerRenderer::<Flash>::with_props(FlashProps {
            message: Some("Could not load game 3".into()),
            disabled: true,
        })
        .render(),
    );
    assert!(!hidden.contains("Could not load game 3"));
}

#[test]
fn shell_wraps_content_with_navigation() {
    let props = ShellProps {
        user: None,
        flash: None,
        disable_user_errors: false,
        on_navigate: Callback::noop(),
        children: Default::default(),
    };
    let html = block_on(LocalServerRenderer::<Shell>::with_props(props).render());
    assert!(html.contains("id=\"app\""));
    assert!(html.contains("id=\"nav\""));
    assert!(html.contains("id=\"main\""));
    assert!(!html.contains("id=\"flash\""));
}

#[test]
fn link_targets_use_the_configured_router_base() {
    let props = LinkProps {
        to: Route::or_home("/game/8"),
        on_navigate: Callback::noop(),
        class: Default::default(),
        children: Default::default(),
    };
    let html = block_on(LocalServerRenderer::<Link>::with_props(props).render());
    let expected = with_base("/game/8", configured_router_base());
    assert!(html.contains(&format!("href=\"{expected}\"")), "{html}");
}
