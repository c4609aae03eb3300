//! Action descriptors: the command a binding runs and its arguments
//!
//! Actions are opaque to the compiler. Command identifiers are whatever the host
//! editor understands; a leading `-` marks a binding that disables the host's
//! built-in binding for the same key and condition.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Command that runs its `args.sequence` steps in order
pub const SEQUENCE_COMMAND: &str = "groog.multiCommand.execute";
/// Command that inserts `args.text` as if typed
pub const TYPE_COMMAND: &str = "groog.type";
/// Command that shows `args.message` as an info notification
pub const NOTIFY_COMMAND: &str = "groog.message.info";
/// Command that sends `args.text` to the active terminal
pub const SEND_SEQUENCE_COMMAND: &str = "workbench.action.terminal.sendSequence";

/// Prefix marking "remove the host's default binding"
pub const UNBIND_MARKER: char = '-';

/// A command invocation bound to a key under some condition
///
/// `run_async` and `delay` only matter for steps inside a [`sequence`]; the
/// compiler does not copy them onto output records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
    #[serde(rename = "async", default, skip_serializing_if = "Option::is_none")]
    pub run_async: Option<bool>,
    /// Milliseconds to wait before running this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
}

impl Action {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: None,
            run_async: None,
            delay: None,
        }
    }

    /// Replace the argument bag (builder pattern)
    pub fn with_args(mut self, args: Map<String, Value>) -> Self {
        self.args = Some(args);
        self
    }

    /// Add a single argument (builder pattern)
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Don't wait for this step to finish before starting the next one
    pub fn run_async(mut self) -> Self {
        self.run_async = Some(true);
        self
    }

    /// Wait `ms` milliseconds before running this step
    pub fn delayed(mut self, ms: u64) -> Self {
        self.delay = Some(ms);
        self
    }

    /// Check if this action disables a host binding instead of running a command
    pub fn is_unbind(&self) -> bool {
        self.command.starts_with(UNBIND_MARKER)
    }

    /// Check if this action runs a multi-step sequence
    pub fn is_sequence(&self) -> bool {
        self.command == SEQUENCE_COMMAND
    }

}

impl From<&str> for Action {
    fn from(command: &str) -> Self {
        Action::new(command)
    }
}

/// An action disabling the host's default binding for `command`
pub fn unbind(command: &str) -> Action {
    Action::new(format!("{}{}", UNBIND_MARKER, command))
}

/// Run `steps` one after another as a single action
///
/// Each step is serialized the same way as an [`Action`], hints included.
pub fn sequence(steps: impl IntoIterator<Item = Action>) -> Action {
    let steps: Vec<Action> = steps.into_iter().collect();
    Action::new(SEQUENCE_COMMAND).arg("sequence", json!(steps))
}

/// Run plain commands one after another
pub fn sequence_of(commands: &[&str]) -> Action {
    sequence(commands.iter().copied().map(Action::new))
}

/// `command` repeated `times` times
pub fn repeat(command: &str, times: usize) -> Vec<&str> {
    vec![command; times]
}

pub fn notification(message: &str) -> Action {
    Action::new(NOTIFY_COMMAND).arg("message", message)
}

pub fn send_sequence(text: &str) -> Action {
    Action::new(SEND_SEQUENCE_COMMAND).arg("text", text)
}

pub fn type_text(text: &str) -> Action {
    Action::new(TYPE_COMMAND).arg("text", text)
}
