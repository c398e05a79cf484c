// src/event/mod.rs

//! Event definitions and the rules evaluated against their commands.
//!
//! - [`record`] is the typed view over one event file.
//! - [`verify`] accumulates every configuration problem of a record.
//! - [`evaluate`] holds the arithmetic and content predicates.

pub mod evaluate;
pub mod record;
pub mod verify;

pub use evaluate::{Observed, Test, arithmetic, content, is_integer_literal, parse_integer};
pub use record::{EventRecord, keys};
pub use verify::{ValidationProblem, Verification};
