use serde_json::json;

use super::{Expectation, Scenario, Step};

pub fn catalog_scenarios() -> Vec<Scenario> {
    vec![
        smoke(),
        game_load(),
        hotseat(),
        tutorial(),
        history_round_trip(),
        stale_resolution(),
        load_retry(),
    ]
}

/// `(name, description)` for every built-in scenario.
pub fn list_scenarios() -> Vec<(String, String)> {
    catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.name, scenario.description))
        .collect()
}

pub fn find_scenario(name: &str) -> Option<Scenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.name == name)
}

fn smoke() -> Scenario {
    Scenario::new("smoke", "/")
        .describe("Home renders without pushing, static pages push once")
        .step(Step::Render)
        .expect(
            Expectation::view("home")
                .at("/")
                .requests(0)
                .history_len(1)
                .pushed(false),
        )
        .step(Step::navigate("/about"))
        .expect(Expectation::view("about").at("/about").history_len(2).pushed(true))
        .step(Step::Render)
        .expect(Expectation::view("about").history_len(2).pushed(false))
}

fn game_load() -> Scenario {
    Scenario::new("game-load", "/game/7")
        .describe("A multiplayer route requests its game once, then shows it")
        .step(Step::Render)
        .step(Step::Render)
        .expect(Expectation {
            load_state: Some(String::from("loading")),
            ..Expectation::view("loading_game").requests(1).pushed(false)
        })
        .step(Step::resolve("7"))
        .expect(Expectation {
            load_state: Some(String::from("loaded")),
            ..Expectation::view("game").at("/game/7").history_len(1)
        })
}

fn hotseat() -> Scenario {
    Scenario::new("hotseat", "/hotseat/hs_ab_3")
        .describe("Hotseat games load by their prefixed id")
        .step(Step::Render)
        .expect(Expectation::view("loading_game").requests(1))
        .step(Step::resolve("hs_ab_3"))
        .expect(Expectation::view("game").at("/hotseat/hs_ab_3"))
}

fn tutorial() -> Scenario {
    Scenario::new("tutorial", "/tutorial")
        .describe("The tutorial route enters tutorial mode without an id")
        .step(Step::Render)
        .expect(Expectation::view("loading_game").requests(1))
        .step(Step::resolve("tutorial"))
        .expect(Expectation::view("game").requests(1))
}

fn history_round_trip() -> Scenario {
    Scenario::new("history-round-trip", "/")
        .describe("Back and forward restore pushed game snapshots without reloading")
        .step(Step::Render)
        .step(Step::Navigate {
            route: String::from("/game/12"),
            payload: Some(json!({"loaded": true, "title": "1846"})),
        })
        .expect(Expectation::view("game").requests(0).history_len(2).pushed(true))
        .step(Step::navigate("/about"))
        .expect(Expectation::view("about").history_len(3).pushed(true))
        .step(Step::Back)
        .expect(
            Expectation::view("game")
                .at("/game/12")
                .requests(0)
                .history_len(3)
                .pushed(false),
        )
        .step(Step::Forward)
        .expect(Expectation::view("about").at("/about").history_len(3).pushed(false))
}

fn stale_resolution() -> Scenario {
    Scenario::new("stale-resolution", "/game/1")
        .describe("A late result for a game the user left is ignored")
        .step(Step::Render)
        .step(Step::navigate("/game/2"))
        .expect(Expectation::view("loading_game").requests(2).pushed(true))
        .step(Step::resolve("1"))
        .expect(Expectation {
            load_state: Some(String::from("loading")),
            ..Expectation::view("loading_game").at("/game/2")
        })
        .step(Step::resolve("2"))
        .expect(Expectation::view("game").requests(2))
}

fn load_retry() -> Scenario {
    Scenario::new("load-retry", "/game/5")
        .describe("Failed loads are retried until the attempt limit, then reported")
        .with_attempts(2)
        .step(Step::Render)
        .expect(Expectation::view("loading_game").requests(1))
        .step(Step::Fail {
            game: String::from("5"),
            status: 503,
        })
        .expect(Expectation::view("loading_game").requests(2))
        .step(Step::Fail {
            game: String::from("5"),
            status: 503,
        })
        .expect(Expectation {
            load_state: Some(String::from("absent")),
            ..Expectation::view("game_unavailable").requests(2)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique_and_findable() {
        let names: Vec<String> = list_scenarios().into_iter().map(|(name, _)| name).collect();
        for name in &names {
            assert_eq!(names.iter().filter(|other| *other == name).count(), 1);
            assert!(find_scenario(name).is_some());
        }
        assert!(find_scenario("missing").is_none());
    }

    #[test]
    fn every_catalog_scenario_is_described() {
        for (name, description) in list_scenarios() {
            assert!(!description.is_empty(), "{name}");
        }
    }
}
