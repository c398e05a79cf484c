// src/event/evaluate.rs

//! Predicates applied to a command's observed output or exit status.
//!
//! Every evaluation logs its operator, operands and verdict at `debug`, inside
//! whatever event span is current, so `--verify`/`--verbose` runs show why an
//! event did or did not fire.

use tracing::{debug, error, info};

use crate::exec::CommandOutput;
use crate::types::{ArithmeticOp, ContentOp, TestType};

/// Which part of a command's result an arithmetic test looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    Output,
    ExitStatus,
}

/// A fully typed test, built from an event's TEST_TYPE / MATCH_* fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Test {
    Arithmetic {
        observed: Observed,
        op: ArithmeticOp,
        operand: String,
    },
    Content {
        op: ContentOp,
        operand: String,
    },
}

impl Test {
    /// Build a test from raw field values.
    ///
    /// `operand` is kept as text; an arithmetic operand that is not an
    /// integer is caught when the test is evaluated.
    pub fn from_fields(
        test_type: TestType,
        criteria: &str,
        operand: Option<&str>,
    ) -> Result<Self, String> {
        let operand = operand.unwrap_or_default().to_string();
        match test_type {
            TestType::Arithmetic => Ok(Test::Arithmetic {
                observed: Observed::Output,
                op: criteria.parse()?,
                operand,
            }),
            TestType::Status => Ok(Test::Arithmetic {
                observed: Observed::ExitStatus,
                op: criteria.parse()?,
                operand,
            }),
            TestType::Content => Ok(Test::Content {
                op: criteria.parse()?,
                operand,
            }),
        }
    }

    pub fn evaluate(&self, result: &CommandOutput) -> bool {
        match self {
            Test::Arithmetic {
                observed: Observed::Output,
                op,
                operand,
            } => arithmetic(*op, &result.stdout, operand),
            Test::Arithmetic {
                observed: Observed::ExitStatus,
                op,
                operand,
            } => arithmetic(*op, &result.status.to_string(), operand),
            Test::Content { op, operand } => content(*op, operand, &result.stdout),
        }
    }
}

/// Whether `s` is an optionally negative run of ASCII digits.
///
/// Stricter than `i64::from_str`: no leading `+`, no surrounding whitespace.
pub fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an integer literal as `i64`.
///
/// `None` for anything [`is_integer_literal`] rejects and for literals
/// outside the `i64` range.
pub fn parse_integer(s: &str) -> Option<i64> {
    if !is_integer_literal(s) {
        return None;
    }
    s.parse().ok()
}

/// Integer comparison `content OP operand`.
///
/// Non-integer `content` is an ordinary `false`; a non-integer `operand` is a
/// configuration error and also yields `false`.
pub fn arithmetic(op: ArithmeticOp, content: &str, operand: &str) -> bool {
    let Some(lhs) = parse_integer(content) else {
        if is_integer_literal(content) {
            info!(
                content,
                criteria = %op,
                "(arithmetic test) content is outside the i64 range => false"
            );
        } else {
            info!(content, criteria = %op, "(arithmetic test) content is not an integer => false");
        }
        return false;
    };
    let Some(rhs) = parse_integer(operand) else {
        if is_integer_literal(operand) {
            error!(
                operand = operand,
                criteria = %op,
                "(arithmetic test) MATCH_CONTENT is outside the i64 range => false"
            );
        } else {
            error!(
                operand = operand,
                criteria = %op,
                "(arithmetic test) MATCH_CONTENT is not an integer => false"
            );
        }
        return false;
    };

    let result = op.apply(lhs, rhs);
    debug!(content = lhs, criteria = %op, operand = rhs, result, "(arithmetic test)");
    result
}

/// String predicate over `operand` (MATCH_CONTENT) and observed `content`.
pub fn content(op: ContentOp, operand: &str, content: &str) -> bool {
    let result = match op {
        ContentOp::Contains => content.contains(operand),
        ContentOp::DoesNotContain => !content.contains(operand),
        ContentOp::Matches => operand == content,
        ContentOp::DoesNotMatch => operand != content,
        ContentOp::Null => content.is_empty(),
        ContentOp::NotNull => !content.is_empty(),
    };

    if op.needs_operand() {
        debug!(operand = operand, criteria = %op, content, result, "(content test)");
    } else {
        debug!(criteria = %op, content, result, "(content test)");
    }
    result
}
