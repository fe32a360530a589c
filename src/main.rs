use clap::Parser;
use widget_replay::cli::commands::{cmd_check, cmd_run};
use widget_replay::cli::config::{Cli, Commands, build_run_settings, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Run {
            script,
            format,
            output,
            trace,
            retrieval_attempts,
            retrieval_interval_ms,
            settle_timeout_ms,
            show_elapsed,
        } => {
            let settings = build_run_settings(
                &config,
                retrieval_attempts,
                retrieval_interval_ms,
                settle_timeout_ms,
                show_elapsed,
            );
            let trace_path = trace.as_deref().or(config.trace.path.as_deref());
            let all_passed = cmd_run(
                &script,
                &format,
                output.as_deref(),
                trace_path,
                &settings,
                cli.verbose,
            )?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Check { script } => {
            let all_valid = cmd_check(&script, cli.verbose)?;
            if !all_valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
