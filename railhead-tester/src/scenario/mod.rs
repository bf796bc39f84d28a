//! Scripted navigation scenarios.
//!
//! A scenario opens the client at a start location and then walks a list of
//! steps: user navigation, browser back/forward, provider outcomes and
//! expectations about the resulting frame. Scenarios come from the built-in
//! catalog or from JSON files.

pub mod catalog;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub use catalog::{find_scenario, list_scenarios};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Browser location the client is opened at.
    #[serde(default = "home_location")]
    pub start: String,
    /// Access pin forwarded with every load request.
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub max_load_attempts: Option<u32>,
    pub steps: Vec<Step>,
}

fn home_location() -> String {
    String::from("/")
}

impl Scenario {
    #[must_use]
    pub fn new(name: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            start: start.into(),
            pin: None,
            max_load_attempts: None,
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.max_load_attempts = Some(attempts);
        self
    }

    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn expect(self, expectation: Expectation) -> Self {
        self.step(Step::Expect(expectation))
    }
}

/// One scripted action. Every step except [`Step::Expect`] is followed by a
/// render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// In-app navigation, optionally carrying an already known snapshot.
    Navigate {
        route: String,
        #[serde(default)]
        payload: Option<Value>,
    },
    Back,
    Forward,
    /// Deliver the pending load for `game`.
    Resolve {
        game: String,
        #[serde(default)]
        payload: Option<Value>,
    },
    /// Fail the pending load for `game` with an HTTP status.
    Fail { game: String, status: u16 },
    Render,
    Expect(Expectation),
}

impl Step {
    #[must_use]
    pub fn navigate(route: impl Into<String>) -> Self {
        Self::Navigate {
            route: route.into(),
            payload: None,
        }
    }

    #[must_use]
    pub fn resolve(game: impl Into<String>) -> Self {
        Self::Resolve {
            game: game.into(),
            payload: None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Resolve { .. } => "resolve",
            Self::Fail { .. } => "fail",
            Self::Render => "render",
            Self::Expect(_) => "expect",
        }
    }
}

/// Checks against the client after the previous step. Unset fields are not
/// checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectation {
    /// Label of the selected view, e.g. `loading_game`.
    pub view: Option<String>,
    /// Current history location.
    pub location: Option<String>,
    /// Total load requests issued so far.
    pub requests: Option<usize>,
    pub history_len: Option<usize>,
    /// Whether the last render pushed a history entry.
    pub pushed: Option<bool>,
    /// Label of the game load state: `absent`, `loading` or `loaded`.
    pub load_state: Option<String>,
}

impl Expectation {
    #[must_use]
    pub fn view(view: &str) -> Self {
        Self {
            view: Some(view.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    #[must_use]
    pub const fn requests(mut self, count: usize) -> Self {
        self.requests = Some(count);
        self
    }

    #[must_use]
    pub const fn history_len(mut self, len: usize) -> Self {
        self.history_len = Some(len);
        self
    }

    #[must_use]
    pub const fn pushed(mut self, pushed: bool) -> Self {
        self.pushed = Some(pushed);
        self
    }
}

/// Load scenarios from a JSON file holding one scenario or an array of them.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe scenarios.
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_scenarios(&raw).with_context(|| format!("invalid scenario file {}", path.display()))
}

fn parse_scenarios(raw: &str) -> Result<Vec<Scenario>> {
    let value: Value = serde_json::from_str(raw)?;
    let scenarios = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(scenarios)
}
