// src/trigger/mod.rs

//! What happens once an event's test passes.
//!
//! - [`action`] builds the concrete shell command for a trigger.
//! - [`resolver`] picks custom > named > default and fires it, retrying
//!   once with the default action.
//! - [`status`] flips the event file's STATUS to `triggered`.

pub mod action;
pub mod resolver;
pub mod status;

pub use action::{TriggerAction, shell_quote};
pub use resolver::{TriggerOutcome, TriggerResolver};
pub use status::{CommitOutcome, StatusWriter};
