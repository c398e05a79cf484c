// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Optional TOML settings file as read from disk.
///
/// ```toml
/// [runner]
/// parallel = true
/// jobs_per_cpu = 2
/// max_jobs = 16
/// shell = "bash"
///
/// [events]
/// extensions = ["conf", "txt"]
/// recursive = true
///
/// [triggers]
/// file = "/home/me/.config/triggerd/triggers.conf"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSettings {
    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub events: EventsSection,

    #[serde(default)]
    pub triggers: TriggersSection,
}

/// Validated settings. Only constructible through `TryFrom<RawSettings>`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub runner: RunnerSection,
    pub events: EventsSection,
    pub triggers: TriggersSection,
}

impl Settings {
    pub(crate) fn new_unchecked(
        runner: RunnerSection,
        events: EventsSection,
        triggers: TriggersSection,
    ) -> Self {
        Self {
            runner,
            events,
            triggers,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new_unchecked(
            RunnerSection::default(),
            EventsSection::default(),
            TriggersSection::default(),
        )
    }
}

/// `[runner]` section: how batches of events are executed.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSection {
    /// Fan events out over a worker pool (`false` forces sequential runs).
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Pool size is `available_parallelism * jobs_per_cpu`.
    #[serde(default = "default_jobs_per_cpu")]
    pub jobs_per_cpu: usize,

    /// Optional upper bound on the pool size.
    #[serde(default)]
    pub max_jobs: Option<usize>,

    /// Shell used to run commands and triggers as `<shell> -c <line>`.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_parallel() -> bool {
    true
}

fn default_jobs_per_cpu() -> usize {
    2
}

fn default_shell() -> String {
    "bash".to_string()
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            jobs_per_cpu: default_jobs_per_cpu(),
            max_jobs: None,
            shell: default_shell(),
        }
    }
}

/// `[events]` section: how directory targets expand into event files.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsSection {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["conf".to_string(), "txt".to_string()]
}

fn default_recursive() -> bool {
    true
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            recursive: default_recursive(),
        }
    }
}

/// `[triggers]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TriggersSection {
    /// Trigger-definitions file; `None` means the per-user default.
    #[serde(default)]
    pub file: Option<PathBuf>,
}
