// tests/verification.rs

mod common;
use crate::common::builders::EventFileBuilder;
use crate::common::init_tracing;

use std::path::Path;

use triggerd::event::{ValidationProblem, keys};
use triggerd::fs::mock::MockFileSystem;
use triggerd::types::EventStatus;

const TRIGGERS: &str = "/cfg/triggers.conf";

#[test]
fn valid_arithmetic_record_passes() {
    init_tracing();
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .test("arithmetic", "gt", "5")
        .record("/events/a.conf");

    let verification = record.verify(&fs, Path::new(TRIGGERS));
    assert!(verification.passed());
    assert_eq!(verification.count(), 0);
}

#[test]
fn missing_fields_are_reported_once() {
    init_tracing();
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .unset(keys::COMMAND)
        .unset(keys::EVENT_NAME)
        .record("/events/a.conf");

    let verification = record.verify(&fs, Path::new(TRIGGERS));
    assert!(!verification.passed());
    assert_eq!(
        verification.problems(),
        &[ValidationProblem::MissingFields(vec![
            keys::COMMAND,
            keys::EVENT_NAME
        ])]
    );
}

#[test]
fn empty_value_counts_as_missing() {
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .command("")
        .record("/events/a.conf");

    let verification = record.verify(&fs, Path::new(TRIGGERS));
    assert_eq!(
        verification.problems(),
        &[ValidationProblem::MissingFields(vec![keys::COMMAND])]
    );
}

#[test]
fn match_content_optional_only_for_null_criteria() {
    let fs = MockFileSystem::new();

    let null = EventFileBuilder::new()
        .test("content", "null", "")
        .record("/events/null.conf");
    assert!(null.verify(&fs, Path::new(TRIGGERS)).passed());

    let not_null = EventFileBuilder::new()
        .test("content", "not_null", "")
        .record("/events/not_null.conf");
    assert!(not_null.verify(&fs, Path::new(TRIGGERS)).passed());

    let contains = EventFileBuilder::new()
        .test("content", "contains", "")
        .record("/events/contains.conf");
    assert_eq!(
        contains.verify(&fs, Path::new(TRIGGERS)).problems(),
        &[ValidationProblem::MissingFields(vec![keys::MATCH_CONTENT])]
    );
}

#[test]
fn missing_test_type_is_not_double_counted() {
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .unset(keys::TEST_TYPE)
        .record("/events/a.conf");

    let verification = record.verify(&fs, Path::new(TRIGGERS));
    assert_eq!(
        verification.problems(),
        &[ValidationProblem::MissingFields(vec![keys::TEST_TYPE])]
    );
}

#[test]
fn invalid_test_type() {
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .test("numeric", "eq", "1")
        .record("/events/a.conf");

    assert_eq!(
        record.verify(&fs, Path::new(TRIGGERS)).problems(),
        &[ValidationProblem::InvalidTestType("numeric".to_string())]
    );
}

#[test]
fn arithmetic_rules_accumulate() {
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .test("status", "contains", "zero")
        .record("/events/a.conf");

    let verification = record.verify(&fs, Path::new(TRIGGERS));
    assert_eq!(
        verification.problems(),
        &[
            ValidationProblem::NonIntegerMatchContent("zero".to_string()),
            ValidationProblem::InvalidArithmeticCriteria("contains".to_string()),
        ]
    );
}

#[test]
fn content_criteria_must_be_a_content_operator() {
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .test("content", "ge", "x")
        .record("/events/a.conf");

    assert_eq!(
        record.verify(&fs, Path::new(TRIGGERS)).problems(),
        &[ValidationProblem::InvalidContentCriteria("ge".to_string())]
    );
}

#[test]
fn both_triggers_indicated() {
    let fs = MockFileSystem::new();
    fs.add_file(TRIGGERS, "mail = true\n");
    let record = EventFileBuilder::new()
        .trigger_custom("true")
        .trigger_named("mail")
        .record("/events/a.conf");

    assert_eq!(
        record.verify(&fs, Path::new(TRIGGERS)).problems(),
        &[ValidationProblem::BothTriggersIndicated]
    );
}

#[test]
fn named_trigger_requires_definitions_file() {
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .trigger_named("mail")
        .record("/events/a.conf");

    assert_eq!(
        record.verify(&fs, Path::new(TRIGGERS)).problems(),
        &[ValidationProblem::TriggersFileMissing(TRIGGERS.into())]
    );

    fs.add_file(TRIGGERS, "mail = true\n");
    assert!(record.verify(&fs, Path::new(TRIGGERS)).passed());
}

#[test]
fn status_and_enabled_flag() {
    let enabled = EventFileBuilder::new().record("/events/a.conf");
    assert!(enabled.enabled());

    let triggered = EventFileBuilder::new()
        .status("triggered")
        .record("/events/b.conf");
    assert!(!triggered.enabled());
    assert_eq!(triggered.status(), EventStatus::Triggered);

    let other = EventFileBuilder::new()
        .status("paused")
        .record("/events/c.conf");
    assert_eq!(other.status(), EventStatus::Other("paused".to_string()));

    let missing = EventFileBuilder::new()
        .unset(keys::STATUS)
        .record("/events/d.conf");
    assert_eq!(missing.status(), EventStatus::Missing);
}

#[test]
fn out_of_range_match_content_is_not_called_non_integer() {
    init_tracing();
    let fs = MockFileSystem::new();
    let record = EventFileBuilder::new()
        .test("arithmetic", "gt", "99999999999999999999")
        .record("/events/a.conf");

    let verification = record.verify(&fs, Path::new(TRIGGERS));
    assert_eq!(
        verification.problems(),
        &[ValidationProblem::MatchContentOutOfRange(
            "99999999999999999999".to_string()
        )]
    );
    assert!(verification.problems()[0].to_string().contains("outside the supported integer range"));
}
