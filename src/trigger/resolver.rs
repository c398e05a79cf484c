// src/trigger/resolver.rs

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::triggers::TriggerDefinitions;
use crate::event::EventRecord;
use crate::exec::CommandRunner;
use crate::fs::FileSystem;
use crate::trigger::action::TriggerAction;
use crate::trigger::status::{CommitOutcome, StatusWriter};
use crate::types::TriggerKind;

/// Result of firing an event's trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// An action exited 0. `fell_back` is set when the resolved action failed
    /// and the default action succeeded in its place.
    Fired {
        by: TriggerKind,
        fell_back: bool,
        commit: CommitOutcome,
    },
    /// Every attempted action failed; STATUS was left untouched.
    Failed,
}

/// Resolves and fires trigger actions for one event.
pub struct TriggerResolver<'a> {
    fs: &'a dyn FileSystem,
    runner: &'a dyn CommandRunner,
    triggers_file: &'a Path,
}

impl<'a> TriggerResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        runner: &'a dyn CommandRunner,
        triggers_file: &'a Path,
    ) -> Self {
        Self {
            fs,
            runner,
            triggers_file,
        }
    }

    /// Pick the action for `record`: TRIGGER_CUSTOM, then TRIGGER_NAMED, then
    /// the default notification.
    ///
    /// The trigger-definitions file is only read when TRIGGER_NAMED is set.
    pub fn resolve(&self, record: &EventRecord, output: &str) -> TriggerAction {
        let event_name = record.event_name().unwrap_or_default();

        if let Some(custom) = record.trigger_custom() {
            return TriggerAction::templated(TriggerKind::Custom, event_name, output, custom);
        }

        if let Some(named) = record.trigger_named() {
            if let Some(defined) = self.lookup(named) {
                return TriggerAction::templated(
                    TriggerKind::Named(named.to_string()),
                    event_name,
                    output,
                    &defined,
                );
            }
        }

        if record.trigger_named().is_some() {
            warn!("Resorting to default trigger");
        } else {
            info!("no TRIGGER_CUSTOM or TRIGGER_NAMED; using default trigger");
        }
        TriggerAction::default_for(event_name)
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let definitions = match TriggerDefinitions::load(self.fs, self.triggers_file) {
            Ok(defs) => defs,
            Err(err) => {
                warn!(trigger = name, error = %err, "could not load trigger definitions");
                return None;
            }
        };

        let defined = definitions.get(name).map(str::to_string);
        if defined.is_none() {
            warn!(
                trigger = name,
                "TRIGGER_NAMED '{}' not defined in {:?}",
                name,
                definitions.path()
            );
        }
        defined
    }

    /// Fire `action`; on failure retry once with the default action unless
    /// `action` already was the default. A successful attempt commits
    /// `STATUS=triggered` to the event file.
    pub async fn execute(&self, record: &EventRecord, action: &TriggerAction) -> TriggerOutcome {
        info!(kind = %action.kind, command = %action.command, "(executing trigger)");

        let fired_by = if self.attempt(action).await {
            Some((action.kind.clone(), false))
        } else if action.is_default() {
            error!("(failed to execute default trigger)");
            None
        } else {
            warn!(kind = %action.kind, "(failed to execute custom or named trigger)");
            let fallback = TriggerAction::default_for(record.event_name().unwrap_or_default());
            info!(command = %fallback.command, "(executing default trigger as fallback)");
            if self.attempt(&fallback).await {
                Some((TriggerKind::Default, true))
            } else {
                error!("(failed to execute default trigger)");
                None
            }
        };

        match fired_by {
            Some((by, fell_back)) => {
                info!(kind = %by, fell_back, "(successful trigger)");
                let commit = StatusWriter::new(self.fs).commit(record.path());
                TriggerOutcome::Fired {
                    by,
                    fell_back,
                    commit,
                }
            }
            None => TriggerOutcome::Failed,
        }
    }

    async fn attempt(&self, action: &TriggerAction) -> bool {
        match self.runner.run_status(&action.command).await {
            Ok(0) => true,
            Ok(code) => {
                warn!(kind = %action.kind, exit_code = code, "trigger exited non-zero");
                false
            }
            Err(err) => {
                error!(kind = %action.kind, error = %err, "trigger could not be spawned");
                false
            }
        }
    }
}
