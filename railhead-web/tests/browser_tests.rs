#![cfg(target_arch = "wasm32")]

use railhead_core::{BrowserHistory, GamePayload, Route};
use railhead_web::dom;
use railhead_web::history::WebHistory;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn location_includes_path_hash_and_search() {
    assert!(dom::window().is_some());
    let location = dom::current_location().expect("location");
    assert!(location.starts_with('/'));
}

#[wasm_bindgen_test]
fn pushed_route_becomes_current_location() {
    let history = WebHistory::new(None);
    let route = Route::or_home("/game/42");
    history
        .push_entry(Some(&GamePayload::ready()), &route)
        .expect("push");
    assert_eq!(history.location(), "/game/42");
}
