//! Runs the commands of a [`BrowseEngine`] held in a signal.
//!
//! Every fetch and timer becomes a task of the current component; results go
//! back into the engine, which drops anything stale or late.

use common::browse_engine::{BrowseEngine, EngineCommand};
use dioxus::{logger::tracing, prelude::*};

use crate::api::{
    disease_api::{list_entries, search_suggestions, statistics_overview, unique_values},
    to_query_error,
};

#[derive(Clone, Copy, PartialEq)]
pub struct BrowseEngineHandle {
    pub engine: Signal<BrowseEngine>,
    pub token: ReadSignal<Option<String>>,
}

impl BrowseEngineHandle {
    /// Applies `op` to the engine and runs whatever it asks for.
    pub fn dispatch(&self, op: impl FnOnce(&mut BrowseEngine) -> Vec<EngineCommand>) {
        let mut engine = self.engine;
        let commands = match engine.try_write() {
            Ok(mut engine) => op(&mut engine),
            Err(_) => return,
        };
        run_commands(self.engine, self.token.peek().clone(), commands);
    }

    /// For operations that never produce commands.
    pub fn update(&self, op: impl FnOnce(&mut BrowseEngine)) {
        let mut engine = self.engine;
        if let Ok(mut engine) = engine.try_write() {
            op(&mut engine);
        }
    }
}

fn run_commands(engine: Signal<BrowseEngine>, token: Option<String>, commands: Vec<EngineCommand>) {
    for command in commands {
        let token = token.clone();
        let mut engine = engine;
        match command {
            EngineCommand::FetchEntries { ticket, query } => {
                spawn(async move {
                    let result = list_entries(token, query).await.map_err(to_query_error);
                    if let Ok(mut engine) = engine.try_write() {
                        engine.on_entries_loaded(ticket, result);
                    }
                });
            }
            EngineCommand::FetchUniqueValues { ticket, field, scope } => {
                spawn(async move {
                    let result = unique_values(token, field, scope).await.map_err(to_query_error);
                    if let Ok(mut engine) = engine.try_write() {
                        engine.on_unique_values_loaded(ticket, result);
                    }
                });
            }
            EngineCommand::FetchSuggestions { ticket, request } => {
                spawn(async move {
                    let result = search_suggestions(token, request).await.map_err(to_query_error);
                    if let Ok(mut engine) = engine.try_write() {
                        engine.on_suggestions_loaded(ticket, result);
                    }
                });
            }
            EngineCommand::FetchStatistics { ticket } => {
                spawn(async move {
                    let result = statistics_overview(token).await.map_err(to_query_error);
                    if let Ok(mut engine) = engine.try_write() {
                        engine.on_statistics_loaded(ticket, result);
                    }
                });
            }
            EngineCommand::ArmTimer { timer, epoch, delay } => {
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(delay.as_millis() as u32).await;
                    let follow_up = match engine.try_write() {
                        Ok(mut engine) => engine.on_timer_fired(timer, epoch),
                        Err(e) => {
                            tracing::debug!("browse engine gone before {:?} fired: {}", timer, e);
                            return;
                        }
                    };
                    run_commands(engine, token, follow_up);
                });
            }
        }
    }
}

/// Creates the engine for one mounted browse page and tears it down on unmount.
pub fn use_browse_engine(token: ReadSignal<Option<String>>) -> BrowseEngineHandle {
    let engine = use_signal(BrowseEngine::new);
    let handle = BrowseEngineHandle { engine, token };
    // reads nothing reactive, so this runs once, in the browser
    use_effect(move || handle.dispatch(|engine| engine.mount()));
    use_drop(move || {
        let mut engine = engine;
        if let Ok(mut engine) = engine.try_write() {
            engine.unmount();
        }
    });
    handle
}
