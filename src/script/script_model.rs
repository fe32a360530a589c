use serde::{Deserialize, Serialize};

use crate::adapter::capability::{ArgValue, Verb};
use crate::script::error::ReplayError;

/// A complete test script: an ordered list of action and verify records.
/// Deserialized from YAML by the loader; immutable once parsed and
/// consumed once, in program order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Script {
    /// Human-readable name for this script
    pub name: String,

    /// Ordered records to execute
    pub lines: Vec<ScriptLine>,
}

/// One record in a script: either a typed action or a verification.
///
/// Untagged on the wire; verify records are distinguished by their
/// `property`/`expected` fields, action records by `verb`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScriptLine {
    /// Read a property off the addressed element and compare its
    /// canonical text form against `expected`
    Verify {
        path: String,
        property: String,
        expected: String,
    },

    /// Dispatch a verb with typed arguments against the addressed element
    Action {
        path: String,
        verb: Verb,
        #[serde(default)]
        args: Vec<ArgValue>,
    },
}

impl ScriptLine {
    /// The address text this record targets.
    pub fn path(&self) -> &str {
        match self {
            ScriptLine::Verify { path, .. } => path,
            ScriptLine::Action { path, .. } => path,
        }
    }

    /// The call name shown in reports (`verify` or the verb spelling).
    pub fn call(&self) -> &'static str {
        match self {
            ScriptLine::Verify { .. } => "verify",
            ScriptLine::Action { verb, .. } => verb.as_str(),
        }
    }
}

/// Per-record outcome, sufficient to localize a failure to one script
/// line in the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineOutcome {
    /// Which line this outcome belongs to (0-indexed)
    pub line_index: usize,

    /// The address text of the record
    pub path: String,

    /// The call name (`verify` or a verb spelling)
    pub call: String,

    /// What happened
    #[serde(flatten)]
    pub status: LineStatus,
}

/// Outcome taxonomy for one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineStatus {
    /// Action resolved, validated, invoked, and settled
    Dispatched,

    /// Verification matched byte-for-byte
    Passed,

    /// Verification mismatch; non-fatal
    Failed { expected: String, actual: String },

    /// Address text failed to parse; fatal
    MalformedAddress { error: String },

    /// No element matched after exhausting the retry budget; fatal
    NotFound { error: String },

    /// The element's kind does not support the verb; fatal
    Unsupported { error: String },

    /// Arguments did not match the declared shape; fatal
    InvalidArgument { error: String },

    /// Unknown property or toolkit failure; fatal
    EngineError { error: String },

    /// Not executed because an earlier line failed fatally
    Skipped,
}

impl LineStatus {
    /// Classify an engine error into the matching outcome.
    pub fn from_error(error: &ReplayError) -> Self {
        let text = error.to_string();
        match error {
            ReplayError::MalformedAddress { .. } => LineStatus::MalformedAddress { error: text },
            ReplayError::ElementNotFound { .. } => LineStatus::NotFound { error: text },
            ReplayError::UnsupportedAction { .. } => LineStatus::Unsupported { error: text },
            ReplayError::InvalidArgument { .. } => LineStatus::InvalidArgument { error: text },
            ReplayError::UnknownProperty { .. } | ReplayError::Backend { .. } => {
                LineStatus::EngineError { error: text }
            }
        }
    }

    /// Fatal outcomes abort the remaining script.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LineStatus::MalformedAddress { .. }
                | LineStatus::NotFound { .. }
                | LineStatus::Unsupported { .. }
                | LineStatus::InvalidArgument { .. }
                | LineStatus::EngineError { .. }
        )
    }

    /// Whether this outcome counts against the script's pass verdict.
    pub fn is_failure(&self) -> bool {
        self.is_fatal() || matches!(self, LineStatus::Failed { .. })
    }

    /// Short label for traces and reports.
    pub fn label(&self) -> &'static str {
        match self {
            LineStatus::Dispatched => "dispatched",
            LineStatus::Passed => "passed",
            LineStatus::Failed { .. } => "failed",
            LineStatus::MalformedAddress { .. } => "malformed_address",
            LineStatus::NotFound { .. } => "not_found",
            LineStatus::Unsupported { .. } => "unsupported",
            LineStatus::InvalidArgument { .. } => "invalid_argument",
            LineStatus::EngineError { .. } => "engine_error",
            LineStatus::Skipped => "skipped",
        }
    }
}

/// Result of running a complete script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    /// Name of the script that was run
    pub script_name: String,

    /// Whether every line dispatched cleanly and every verification passed
    pub passed: bool,

    /// Number of lines that were executed (skipped lines excluded)
    pub lines_run: usize,

    /// All per-line outcomes, including skipped lines
    pub outcomes: Vec<LineOutcome>,

    /// The fatal error message if the script aborted early
    pub error: Option<String>,
}
