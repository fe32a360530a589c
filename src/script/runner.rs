use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::address::parser::parse;
use crate::dispatch::dispatcher::ActionDispatcher;
use crate::script::context::RunContext;
use crate::script::script_model::{LineOutcome, LineStatus, Script, ScriptLine, ScriptResult};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;
use crate::tree::fingerprint::tree_fingerprint;
use crate::tree::resolver::PathResolver;
use crate::tree::tree_model::UiDriver;
use crate::verify::verifier::{VerifyOutcome, verify};

pub const MINIMUM_RETRIEVAL_ATTEMPTS: u32 = 1;
pub const MINIMUM_RETRIEVAL_INTERVAL_MS: u64 = 5;

pub const DEFAULT_RETRIEVAL_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRIEVAL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 1000;

/// Tunable execution settings, resolved CLI > config file > defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSettings {
    /// How many times a failed resolution is re-attempted
    #[serde(default = "default_retrieval_attempts")]
    pub retrieval_attempts: u32,

    /// Fixed sleep between resolution attempts, in milliseconds
    #[serde(default = "default_retrieval_interval_ms")]
    pub retrieval_interval_ms: u64,

    /// Ceiling for the post-action settle wait, in milliseconds
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,

    /// Log per-line elapsed time to stderr
    #[serde(default)]
    pub show_elapsed: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            retrieval_attempts: DEFAULT_RETRIEVAL_ATTEMPTS,
            retrieval_interval_ms: DEFAULT_RETRIEVAL_INTERVAL_MS,
            settle_timeout_ms: DEFAULT_SETTLE_TIMEOUT_MS,
            show_elapsed: false,
        }
    }
}

impl RunSettings {
    /// Clamp to the documented minimums. A zero-attempt or sub-interval
    /// configuration would turn the retry loop into an instant failure.
    pub fn normalized(mut self) -> Self {
        self.retrieval_attempts = self.retrieval_attempts.max(MINIMUM_RETRIEVAL_ATTEMPTS);
        self.retrieval_interval_ms = self.retrieval_interval_ms.max(MINIMUM_RETRIEVAL_INTERVAL_MS);
        self
    }
}

fn default_retrieval_attempts() -> u32 {
    DEFAULT_RETRIEVAL_ATTEMPTS
}
fn default_retrieval_interval_ms() -> u64 {
    DEFAULT_RETRIEVAL_INTERVAL_MS
}
fn default_settle_timeout_ms() -> u64 {
    DEFAULT_SETTLE_TIMEOUT_MS
}

/// Executes a script line-by-line against a toolkit driver.
///
/// Strictly sequential: each line re-resolves its address from the root,
/// dispatches or verifies, and settles before the next line starts. A
/// fatal outcome aborts the remainder (reported as skipped); verification
/// mismatches accumulate without aborting.
pub struct ScriptRunner {
    resolver: PathResolver,
    dispatcher: ActionDispatcher,
    show_elapsed: bool,
}

impl ScriptRunner {
    pub fn new(settings: &RunSettings) -> Self {
        ScriptRunner {
            resolver: PathResolver::new(
                settings.retrieval_attempts,
                Duration::from_millis(settings.retrieval_interval_ms),
            ),
            dispatcher: ActionDispatcher::new(settings.settle_timeout_ms),
            show_elapsed: settings.show_elapsed,
        }
    }

    /// Run a complete script and collect per-line outcomes.
    pub fn run<D: UiDriver>(
        &self,
        script: &Script,
        driver: &mut D,
        tracer: &TraceLogger,
    ) -> ScriptResult {
        let mut ctx = RunContext::new();
        let mut fatal = None;
        let mut lines_run = 0;

        for (i, line) in script.lines.iter().enumerate() {
            ctx.current_line = i;

            let fingerprint = tree_fingerprint(&*driver);
            let start = Instant::now();
            let status = self.execute_line(line, driver);
            let elapsed = start.elapsed().as_millis();
            lines_run = i + 1;

            if self.show_elapsed {
                eprintln!("'{}' {} in {} ms", line.path(), status.label(), elapsed);
            }

            let mut event = TraceEvent::now(i, line.call(), line.path())
                .with_status(status.label())
                .with_elapsed(elapsed)
                .with_fingerprint(&fingerprint);
            if let Some(detail) = status_detail(&status) {
                event = event.with_detail(detail);
            }
            tracer.log(&event);

            let is_fatal = status.is_fatal();
            if is_fatal {
                fatal = Some(match status_detail(&status) {
                    Some(detail) => detail,
                    None => status.label().to_string(),
                });
            }

            ctx.record(LineOutcome {
                line_index: i,
                path: line.path().to_string(),
                call: line.call().to_string(),
                status,
            });

            if is_fatal {
                // Remaining lines are skipped, not silently dropped
                for (j, skipped) in script.lines.iter().enumerate().skip(i + 1) {
                    ctx.record(LineOutcome {
                        line_index: j,
                        path: skipped.path().to_string(),
                        call: skipped.call().to_string(),
                        status: LineStatus::Skipped,
                    });
                }
                break;
            }
        }

        let passed = fatal.is_none() && ctx.all_passed();
        ScriptResult {
            script_name: script.name.clone(),
            passed,
            lines_run,
            outcomes: ctx.outcomes,
            error: fatal,
        }
    }

    /// Execute one line: parse, resolve, then dispatch or verify.
    fn execute_line<D: UiDriver>(&self, line: &ScriptLine, driver: &mut D) -> LineStatus {
        let address = match parse(line.path()) {
            Ok(address) => address,
            Err(e) => return LineStatus::from_error(&e),
        };

        let handle = match self.resolver.resolve(&*driver, &address) {
            Ok(handle) => handle,
            Err(e) => return LineStatus::from_error(&e),
        };

        match line {
            ScriptLine::Action { verb, args, .. } => {
                match self.dispatcher.dispatch(driver, handle, *verb, args) {
                    Ok(()) => LineStatus::Dispatched,
                    Err(e) => LineStatus::from_error(&e),
                }
            }
            ScriptLine::Verify {
                property, expected, ..
            } => match verify(&*driver, handle, property, expected) {
                Ok(VerifyOutcome::Passed) => LineStatus::Passed,
                Ok(VerifyOutcome::Failed { expected, actual }) => {
                    LineStatus::Failed { expected, actual }
                }
                Err(e) => LineStatus::from_error(&e),
            },
        }
    }
}

/// Human-readable failure detail for traces and the suite report.
fn status_detail(status: &LineStatus) -> Option<String> {
    match status {
        LineStatus::Failed { expected, actual } => Some(format!(
            "expected '{}', actual '{}'",
            expected, actual
        )),
        LineStatus::MalformedAddress { error }
        | LineStatus::NotFound { error }
        | LineStatus::Unsupported { error }
        | LineStatus::InvalidArgument { error }
        | LineStatus::EngineError { error } => Some(error.clone()),
        LineStatus::Dispatched | LineStatus::Passed | LineStatus::Skipped => None,
    }
}
