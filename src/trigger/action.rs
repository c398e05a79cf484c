// src/trigger/action.rs

use crate::types::TriggerKind;

/// A resolved trigger: where it came from and the command line to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAction {
    pub kind: TriggerKind,
    pub command: String,
}

impl TriggerAction {
    /// Desktop notification naming the event.
    pub fn default_for(event_name: &str) -> Self {
        Self {
            kind: TriggerKind::Default,
            command: format!(
                "notify-send --icon=notification-message-im --urgency=critical {} {}",
                shell_quote(&format!("triggerd: {event_name}")),
                shell_quote("We have a trigger event!"),
            ),
        }
    }

    /// Wrap a user command so it can see the event's name and output.
    ///
    /// Both are available as `$EVENT_NAME` / `$EVENT_OUTPUT` (exported) and
    /// as `${event[EVENT_NAME]}` / `${event[EVENT_OUTPUT]}`.
    pub fn templated(kind: TriggerKind, event_name: &str, output: &str, command: &str) -> Self {
        let name = shell_quote(event_name);
        let output = shell_quote(output);
        Self {
            kind,
            command: format!(
                "declare -A event && event[EVENT_NAME]={name} && event[EVENT_OUTPUT]={output} \
                 && export EVENT_NAME={name} EVENT_OUTPUT={output} && {command}"
            ),
        }
    }

    pub fn is_default(&self) -> bool {
        self.kind == TriggerKind::Default
    }
}

/// Single-quote `s` for a POSIX shell.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
