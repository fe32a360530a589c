pub mod adapter;
pub mod address;
pub mod cli;
pub mod dispatch;
pub mod report;
pub mod script;
pub mod sim;
pub mod trace;
pub mod tree;
pub mod verify;

use crate::script::runner::{RunSettings, ScriptRunner};
use crate::script::script_model::{Script, ScriptResult};
use crate::sim::fixtures::demo_application;
use crate::trace::logger::TraceLogger;

/// Run one script against a fresh instance of the built-in demo
/// application with default settings. Convenience entry point for
/// embedding and for quick experiments.
pub fn run_demo_script(script: &Script) -> ScriptResult {
    let settings = RunSettings::default();
    let runner = ScriptRunner::new(&settings);
    let tracer = TraceLogger::disabled();
    let (mut tree, _) = demo_application();
    runner.run(script, &mut tree, &tracer)
}
