// src/event/verify.rs

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, warn};

use crate::event::evaluate::{is_integer_literal, parse_integer};
use crate::event::record::{EventRecord, keys};
use crate::fs::FileSystem;
use crate::types::{ArithmeticOp, ContentOp, TestType};

/// One configuration problem found in an event file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationProblem {
    #[error("is missing {}", .0.join(" "))]
    MissingFields(Vec<&'static str>),

    #[error("does not contain a valid TEST_TYPE ('{0}')")]
    InvalidTestType(String),

    #[error("MATCH_CONTENT must be an integer when performing arithmetic operations (got '{0}')")]
    NonIntegerMatchContent(String),

    #[error("MATCH_CONTENT '{0}' is outside the supported integer range ({min} to {max})", min = i64::MIN, max = i64::MAX)]
    MatchContentOutOfRange(String),

    #[error("does not contain valid MATCH_CRITERIA for arithmetic operations ('{0}')")]
    InvalidArithmeticCriteria(String),

    #[error("does not contain valid MATCH_CRITERIA for content operations ('{0}')")]
    InvalidContentCriteria(String),

    #[error("specifies both TRIGGER_CUSTOM and TRIGGER_NAMED (choose one or neither)")]
    BothTriggersIndicated,

    #[error("uses TRIGGER_NAMED but trigger definitions file {0:?} does not exist")]
    TriggersFileMissing(PathBuf),

    #[error("uses TRIGGER_NAMED but trigger definitions file {0:?} is not readable")]
    TriggersFileUnreadable(PathBuf),
}

/// Every problem found while verifying one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    problems: Vec<ValidationProblem>,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn count(&self) -> usize {
        self.problems.len()
    }

    pub fn problems(&self) -> &[ValidationProblem] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<ValidationProblem> {
        self.problems
    }
}

const REQUIRED: [&str; 5] = [
    keys::COMMAND,
    keys::EVENT_NAME,
    keys::MATCH_CRITERIA,
    keys::STATUS,
    keys::TEST_TYPE,
];

impl EventRecord {
    /// Check every field rule and report all problems together.
    ///
    /// `triggers_file` is only consulted when TRIGGER_NAMED is set.
    pub fn verify(&self, fs: &dyn FileSystem, triggers_file: &Path) -> Verification {
        let mut problems = Vec::new();

        let mut missing: Vec<&'static str> = REQUIRED
            .into_iter()
            .filter(|key| self.field(key).is_none())
            .collect();
        let operand_optional = self
            .match_criteria()
            .and_then(|c| c.parse::<ContentOp>().ok())
            .is_some_and(|op| !op.needs_operand());
        if self.match_content().is_none() && !operand_optional {
            missing.push(keys::MATCH_CONTENT);
        }
        if !missing.is_empty() {
            problems.push(ValidationProblem::MissingFields(missing));
        }

        // A missing TEST_TYPE was reported above.
        if let Some(raw) = self.test_type() {
            match raw.parse::<TestType>() {
                Err(_) => problems.push(ValidationProblem::InvalidTestType(raw.to_string())),
                Ok(test_type) if test_type.is_integer_test() => {
                    if let Some(operand) = self.match_content() {
                        if !is_integer_literal(operand) {
                            problems.push(ValidationProblem::NonIntegerMatchContent(
                                operand.to_string(),
                            ));
                        } else if parse_integer(operand).is_none() {
                            problems.push(ValidationProblem::MatchContentOutOfRange(
                                operand.to_string(),
                            ));
                        }
                    }
                    if let Some(criteria) = self.match_criteria() {
                        if criteria.parse::<ArithmeticOp>().is_err() {
                            problems.push(ValidationProblem::InvalidArithmeticCriteria(
                                criteria.to_string(),
                            ));
                        }
                    }
                }
                Ok(_) => {
                    if let Some(criteria) = self.match_criteria() {
                        if criteria.parse::<ContentOp>().is_err() {
                            problems.push(ValidationProblem::InvalidContentCriteria(
                                criteria.to_string(),
                            ));
                        }
                    }
                }
            }
        }

        if self.trigger_custom().is_some() && self.trigger_named().is_some() {
            problems.push(ValidationProblem::BothTriggersIndicated);
        }

        if self.trigger_named().is_some() {
            if !fs.is_file(triggers_file) {
                problems.push(ValidationProblem::TriggersFileMissing(
                    triggers_file.to_path_buf(),
                ));
            } else if fs.read_to_string(triggers_file).is_err() {
                problems.push(ValidationProblem::TriggersFileUnreadable(
                    triggers_file.to_path_buf(),
                ));
            }
        }

        let file = self.label();
        for problem in problems.iter() {
            error!(file = %file, "'{}' {}", file, problem);
        }
        match problems.len() {
            0 => {}
            1 => warn!(file = %file, "Encountered 1 issue verifying '{}'", file),
            n => warn!(file = %file, "Encountered {} issues verifying '{}'", n, file),
        }

        Verification { problems }
    }
}
