use std::fmt;
use std::str::FromStr;

/// Which family of test an event runs against its command.
///
/// - `Arithmetic`: integer comparison against the command's output.
/// - `Content`: string comparison against the command's output.
/// - `Status`: integer comparison against the command's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    Arithmetic,
    Content,
    Status,
}

impl TestType {
    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Arithmetic => "arithmetic",
            TestType::Content => "content",
            TestType::Status => "status",
        }
    }

    /// Arithmetic and status tests share the integer operator set.
    pub fn is_integer_test(self) -> bool {
        matches!(self, TestType::Arithmetic | TestType::Status)
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arithmetic" => Ok(TestType::Arithmetic),
            "content" => Ok(TestType::Content),
            "status" => Ok(TestType::Status),
            other => Err(format!(
                "invalid TEST_TYPE: {other} (expected \"arithmetic\", \"content\" or \"status\")"
            )),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer comparison operators, applied as `content OP match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Eq,
    Ge,
    Gt,
    Le,
    Lt,
    Ne,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 6] = [
        ArithmeticOp::Eq,
        ArithmeticOp::Ge,
        ArithmeticOp::Gt,
        ArithmeticOp::Le,
        ArithmeticOp::Lt,
        ArithmeticOp::Ne,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Ge => "ge",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Le => "le",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::Ne => "ne",
        }
    }

    pub fn apply(self, content: i64, operand: i64) -> bool {
        match self {
            ArithmeticOp::Eq => content == operand,
            ArithmeticOp::Ge => content >= operand,
            ArithmeticOp::Gt => content > operand,
            ArithmeticOp::Le => content <= operand,
            ArithmeticOp::Lt => content < operand,
            ArithmeticOp::Ne => content != operand,
        }
    }
}

impl FromStr for ArithmeticOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArithmeticOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("invalid arithmetic MATCH_CRITERIA: {s}"))
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String predicates for `content` tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOp {
    Contains,
    DoesNotContain,
    Matches,
    DoesNotMatch,
    Null,
    NotNull,
}

impl ContentOp {
    pub const ALL: [ContentOp; 6] = [
        ContentOp::Contains,
        ContentOp::DoesNotContain,
        ContentOp::Matches,
        ContentOp::DoesNotMatch,
        ContentOp::Null,
        ContentOp::NotNull,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentOp::Contains => "contains",
            ContentOp::DoesNotContain => "does_not_contain",
            ContentOp::Matches => "matches",
            ContentOp::DoesNotMatch => "does_not_match",
            ContentOp::Null => "null",
            ContentOp::NotNull => "not_null",
        }
    }

    /// `null` and `not_null` only look at the observed content.
    pub fn needs_operand(self) -> bool {
        !matches!(self, ContentOp::Null | ContentOp::NotNull)
    }
}

impl FromStr for ContentOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("invalid content MATCH_CRITERIA: {s}"))
    }
}

impl fmt::Display for ContentOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle flag stored in an event file's `STATUS` field.
///
/// Only `enabled` events run; the single transition is `enabled -> triggered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Enabled,
    Triggered,
    Missing,
    Other(String),
}

impl EventStatus {
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            None => EventStatus::Missing,
            Some("enabled") => EventStatus::Enabled,
            Some("triggered") => EventStatus::Triggered,
            Some(other) => EventStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Enabled => f.write_str("enabled"),
            EventStatus::Triggered => f.write_str("triggered"),
            EventStatus::Missing => f.write_str("<missing>"),
            EventStatus::Other(s) => f.write_str(s),
        }
    }
}

/// Where a resolved trigger action came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    Custom,
    Named(String),
    Default,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Custom => f.write_str("custom"),
            TriggerKind::Named(name) => write!(f, "named({name})"),
            TriggerKind::Default => f.write_str("default"),
        }
    }
}
