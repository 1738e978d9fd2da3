// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `printansi [OPTIONS] ARGS...`, see `printansi --help`.

use clap::Parser;
use miette::IntoDiagnostic;
use r3bl_printansi::{CLIArg, Driver, FormattingPipeline, OutputChannel, TimerService,
                     setup_default_miette_global_report_handler,
                     try_initialize_logging_global};
use tokio::runtime::Handle;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Exit code 1 for any usage error, including no arguments at all. `--help` and
    // `--version` exit with 0.
    let cli_arg = match CLIArg::try_parse() {
        Ok(it) => it,
        Err(error) => {
            error.print().ok();
            std::process::exit(i32::from(error.use_stderr()));
        }
    };

    setup_default_miette_global_report_handler();
    try_initialize_logging_global(cli_arg.tracing_config())?;

    // % is Display, ? is Debug.
    tracing::debug!(message = "Start printansi", cli_arg = ?cli_arg);

    let channel = OutputChannel::new(
        cli_arg.channel_config(),
        Some(TimerService::new(Handle::current())),
    );

    // Reading input and waiting for file locks both block.
    let run_result = tokio::task::spawn_blocking({
        let channel = channel.clone();
        let mut driver = Driver::new(
            channel.clone(),
            FormattingPipeline::new(cli_arg.format_config()),
            cli_arg.line_terminator(),
        );
        let mode = cli_arg.run_mode();
        let args = cli_arg.args;
        move || {
            let run_result = driver.run(mode, &args);
            // The final flush and close runs even if the run failed.
            let close_result = channel.flush_and_close();
            run_result.and(close_result)
        }
    })
    .await
    .into_diagnostic()?;

    channel.shutdown()?;

    tracing::debug!(message = "Stop printansi");

    run_result.map_err(miette::Report::from)
}
