// src/engine/pipeline.rs

//! Per-event state machine:
//! load -> enabled? -> verify -> run command -> test -> resolve -> fire -> commit.
//!
//! Every failure is turned into an [`EventOutcome`]; nothing here returns an
//! error to the batch.

use std::path::Path;

use tracing::{Span, debug, error, info, info_span};

use crate::engine::{EngineContext, EventOutcome};
use crate::event::EventRecord;
use crate::trigger::{TriggerOutcome, TriggerResolver};

/// Span tagging every log line of one event with its file name.
pub fn event_span(path: &Path) -> Span {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info_span!("event", file = %file)
}

fn load(ctx: &EngineContext, path: &Path) -> Result<EventRecord, EventOutcome> {
    EventRecord::load(ctx.fs.as_ref(), path).map_err(|err| {
        let message = format!("{err:#}");
        error!(path = ?path, error = %message, "could not load event file");
        EventOutcome::Failed(message)
    })
}

/// Execution mode: run one event end to end.
pub async fn process_event(ctx: &EngineContext, path: &Path) -> EventOutcome {
    let record = match load(ctx, path) {
        Ok(record) => record,
        Err(outcome) => return outcome,
    };

    if !record.enabled() {
        info!(status = %record.status(), "event is not enabled; skipping");
        return EventOutcome::NotEnabled(record.status());
    }

    let verification = record.verify(ctx.fs.as_ref(), &ctx.triggers_file);
    if !verification.passed() {
        return EventOutcome::Invalid(verification.into_problems());
    }

    // Verification guarantees COMMAND is present.
    let command = record.command().unwrap_or_default();
    debug!(command, "(executing command)");
    let result = match ctx.runner.run(command).await {
        Ok(result) => result,
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "could not execute COMMAND");
            return EventOutcome::Failed(message);
        }
    };
    info!(exit_code = result.status, output = %result.stdout, "(executed command)");

    if !record.test(&result) {
        info!("(test did not pass)");
        return EventOutcome::NotMatched;
    }

    let resolver = TriggerResolver::new(ctx.fs.as_ref(), ctx.runner.as_ref(), &ctx.triggers_file);
    let action = resolver.resolve(&record, &result.stdout);
    match resolver.execute(&record, &action).await {
        TriggerOutcome::Fired {
            by,
            fell_back,
            commit,
        } => EventOutcome::Triggered {
            by,
            fell_back,
            commit,
        },
        TriggerOutcome::Failed => EventOutcome::TriggerFailed,
    }
}

/// Verification mode: validate the event and show which trigger it would
/// fire, without running anything.
pub fn verify_event(ctx: &EngineContext, path: &Path) -> EventOutcome {
    let record = match load(ctx, path) {
        Ok(record) => record,
        Err(outcome) => return outcome,
    };

    let verification = record.verify(ctx.fs.as_ref(), &ctx.triggers_file);
    if !verification.passed() {
        return EventOutcome::Invalid(verification.into_problems());
    }

    if !record.enabled() {
        info!(status = %record.status(), "event is valid but not enabled");
        return EventOutcome::NotEnabled(record.status());
    }

    let resolver = TriggerResolver::new(ctx.fs.as_ref(), ctx.runner.as_ref(), &ctx.triggers_file);
    let action = resolver.resolve(&record, "");
    info!(kind = %action.kind, command = %action.command, "event verified; trigger resolved");
    EventOutcome::Verified(action.kind)
}
