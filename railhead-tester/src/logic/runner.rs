use chrono::Utc;
use colored::Colorize;
use railhead_core::{
    AppEvent, BrowserHistory, EventQueue, Frame, GameMode, GamePayload, LoadFailure,
    MemoryHistory, NavigationState, QueuedProvider, RetryPolicy, RootDispatcher, Route,
    RouteError, Session,
};
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;

use super::ScenarioResult;
use crate::scenario::{Expectation, Scenario, Step};

#[derive(Debug, Error)]
pub enum StepError {
    #[error("invalid route: {0}")]
    Route(#[from] RouteError),
    #[error("no pending load for game {0}")]
    NoPendingLoad(String),
    #[error("history has no entry to go {0}")]
    HistoryEdge(&'static str),
    #[error("payload for {0} is not a game object")]
    Payload(String),
    #[error("nothing has been rendered yet")]
    NoFrame,
}

/// The client core wired to in-memory history and a queued provider, driven
/// the way the browser event loop drives it.
pub struct Client {
    history: MemoryHistory,
    provider: QueuedProvider,
    queue: EventQueue,
    dispatcher: RootDispatcher<MemoryHistory, QueuedProvider>,
    state: NavigationState,
    session: Session,
    frame: Option<Frame>,
}

impl Client {
    /// # Errors
    ///
    /// Returns an error when the start location is empty.
    pub fn open(scenario: &Scenario) -> Result<Self, StepError> {
        let history = MemoryHistory::new(Route::new(scenario.start.as_str())?);
        let provider = QueuedProvider::new();
        let queue = EventQueue::new();
        let retry = scenario
            .max_load_attempts
            .map_or_else(RetryPolicy::default, RetryPolicy::new);
        let dispatcher = RootDispatcher::new(
            history.clone(),
            provider.clone(),
            retry,
            queue.navigation_sink(),
        );
        let session = Session {
            pin: scenario.pin.clone(),
            ..Session::default()
        };
        Ok(Self {
            history,
            provider,
            queue,
            dispatcher,
            state: NavigationState::default(),
            session,
            frame: None,
        })
    }

    /// Drain pending events, then run one render pass.
    pub fn render(&mut self) -> &Frame {
        while let Some(event) = self.queue.pop() {
            self.dispatcher.apply(&mut self.state, event);
        }
        let frame = self.dispatcher.dispatch(&mut self.state, &self.session);
        self.frame.insert(frame)
    }

    /// Perform one action step followed by a render pass.
    ///
    /// # Errors
    ///
    /// Returns an error when the step cannot be carried out in the current
    /// client state.
    pub fn perform(&mut self, step: &Step) -> Result<(), StepError> {
        match step {
            Step::Navigate { route, payload } => {
                let payload = payload
                    .clone()
                    .map(|value| {
                        GamePayload::from_value(value)
                            .ok_or_else(|| StepError::Payload(route.clone()))
                    })
                    .transpose()?;
                self.queue.push(AppEvent::Navigate {
                    route: Route::new(route.as_str())?,
                    payload,
                });
            }
            Step::Back => {
                if !self.history.back() {
                    return Err(StepError::HistoryEdge("back"));
                }
            }
            Step::Forward => {
                if !self.history.forward() {
                    return Err(StepError::HistoryEdge("forward"));
                }
            }
            Step::Resolve { game, payload } => {
                let request = self
                    .provider
                    .take_for(game)
                    .ok_or_else(|| StepError::NoPendingLoad(game.clone()))?;
                let payload = match payload {
                    Some(value) => GamePayload::from_value(value.clone())
                        .ok_or_else(|| StepError::Payload(game.clone()))?,
                    None => snapshot_for(&request.key.id, request.key.mode),
                };
                self.queue.push(AppEvent::LoadResolved {
                    key: request.key,
                    outcome: Ok(payload),
                });
            }
            Step::Fail { game, status } => {
                let request = self
                    .provider
                    .take_for(game)
                    .ok_or_else(|| StepError::NoPendingLoad(game.clone()))?;
                self.queue.push(AppEvent::LoadResolved {
                    key: request.key,
                    outcome: Err(LoadFailure::Http { status: *status }),
                });
            }
            Step::Render => {}
            Step::Expect(_) => return Ok(()),
        }
        self.render();
        Ok(())
    }

    /// Compare the client against `expectation`, returning every mismatch.
    ///
    /// # Errors
    ///
    /// Returns an error when no frame has been rendered yet.
    pub fn check(&self, expectation: &Expectation) -> Result<Vec<String>, StepError> {
        let frame = self.frame.as_ref().ok_or(StepError::NoFrame)?;
        let mut mismatches = Vec::new();
        let mut compare = |what: &str, expected: Option<String>, actual: String| {
            if let Some(expected) = expected.filter(|expected| *expected != actual) {
                mismatches.push(format!("expected {what} `{expected}`, got `{actual}`"));
            }
        };
        compare(
            "view",
            expectation.view.clone(),
            frame.view.label().to_string(),
        );
        compare(
            "location",
            expectation.location.clone(),
            self.history.location(),
        );
        compare(
            "requests",
            expectation.requests.map(|n| n.to_string()),
            self.provider.issued().to_string(),
        );
        compare(
            "history length",
            expectation.history_len.map(|n| n.to_string()),
            self.history.len().to_string(),
        );
        compare(
            "pushed",
            expectation.pushed.map(|p| p.to_string()),
            frame.history_pushed.to_string(),
        );
        compare(
            "load state",
            expectation.load_state.clone(),
            self.state.game_state().label().to_string(),
        );
        Ok(mismatches)
    }
}

fn snapshot_for(id: &str, mode: GameMode) -> GamePayload {
    GamePayload::ready()
        .with_field("id", Value::from(id))
        .with_field("mode", serde_json::to_value(mode).unwrap_or(Value::Null))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    #[must_use]
    pub fn run(&self, scenario: &Scenario) -> ScenarioResult {
        let started_at = Utc::now().to_rfc3339();
        let start = Instant::now();
        let mut failures = Vec::new();
        let mut steps_run = 0;

        match Client::open(scenario) {
            Ok(mut client) => {
                for (index, step) in scenario.steps.iter().enumerate() {
                    steps_run += 1;
                    let outcome = match step {
                        Step::Expect(expectation) => client.check(expectation),
                        action => client.perform(action).map(|()| Vec::new()),
                    };
                    match outcome {
                        Ok(mismatches) => {
                            self.trace(index, step, mismatches.is_empty());
                            failures.extend(
                                mismatches
                                    .into_iter()
                                    .map(|m| format!("step {}: {m}", index + 1)),
                            );
                        }
                        Err(err) => {
                            self.trace(index, step, false);
                            failures.push(format!("step {} ({}): {err}", index + 1, step.label()));
                            break;
                        }
                    }
                }
            }
            Err(err) => failures.push(format!("cannot open client: {err}")),
        }

        log::debug!(
            "scenario {} finished with {} failures",
            scenario.name,
            failures.len()
        );
        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: failures.is_empty(),
            steps_run,
            failures,
            duration: start.elapsed(),
            started_at,
        }
    }

    fn trace(&self, index: usize, step: &Step, ok: bool) {
        if !self.verbose {
            return;
        }
        let mark = if ok { "ok".green() } else { "failed".red() };
        eprintln!("  {:>3}. {:<8} {mark}", index + 1, step.label());
    }
}
