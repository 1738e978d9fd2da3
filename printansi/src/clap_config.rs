// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ChannelConfig, ConfigString, FormatConfig, LineTerminator, OutputTarget,
            RunMode, TracingConfig, channel_constants::DEFAULT_CYCLE_TIME_SECS};
use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

#[derive(Debug, Parser)]
#[command(bin_name = "printansi")]
#[command(
    about = "Print arguments, or the lines of files, as printable ANSI-C escaped text"
)]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version}\n\nUSAGE:\n  {usage}\n\n{all-args}\n",
    after_help = "An empty string (eg: -s '') for --prefix, --suffix, --separator or --quote emits a single NUL byte."
)]
// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[arg(
        long,
        short = 'c',
        value_name = "SECS",
        default_value_t = DEFAULT_CYCLE_TIME_SECS,
        help = "Close (and unlock) the output file after the first line written more than SECS seconds after it was opened. 0 keeps it open while there is activity"
    )]
    pub cycle_time: u64,

    #[arg(
        long,
        short = 'f',
        value_name = "PATH",
        help = "Append to this file, holding an exclusive lock while it is open, instead of writing to stdout"
    )]
    pub file: Option<PathBuf>,

    #[arg(
        long = "loop",
        short = 'l',
        help = "Treat ARGS as input files (`-` is stdin) and print each line separately"
    )]
    pub loop_mode: bool,

    #[arg(
        long,
        short = 'p',
        value_name = "STR",
        allow_hyphen_values = true,
        help = "Emit before the first item of each line"
    )]
    pub prefix: Option<OsString>,

    #[arg(
        long,
        short = 'q',
        value_name = "STR",
        allow_hyphen_values = true,
        help = "Characters to put around each item, used round robin"
    )]
    pub quote: Option<OsString>,

    #[arg(
        long,
        short = 's',
        value_name = "STR",
        allow_hyphen_values = true,
        help = "Emit at the end of each line [default: newline]"
    )]
    pub suffix: Option<OsString>,

    #[arg(
        long = "separator",
        short = 't',
        value_name = "STR",
        allow_hyphen_values = true,
        help = "Emit between the items of a line [default: space]"
    )]
    pub separator: Option<OsString>,

    #[arg(
        long,
        short = 'r',
        help = "Don't escape plain spaces and single quotes"
    )]
    pub relaxed: bool,

    #[arg(
        long = "date",
        short = 'd',
        help = "Start each line with a UTC [YYYYMMDD-HHMMSS] stamp"
    )]
    pub date_stamp: bool,

    #[arg(long, short = 'v', help = "Log what is going on to stderr")]
    pub verbose: bool,

    #[arg(
        long,
        short = 'z',
        help = "In loop mode, lines end with NUL instead of newline"
    )]
    pub zero: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Also write diagnostics to this file"
    )]
    pub log_file: Option<String>,

    #[arg(
        required = true,
        trailing_var_arg = true,
        value_name = "ARGS",
        help = "Items to print, or input files with --loop"
    )]
    pub args: Vec<OsString>,
}

impl CLIArg {
    #[must_use]
    pub fn format_config(&self) -> FormatConfig {
        FormatConfig {
            prefix: ConfigString::from(self.prefix.clone()),
            suffix: ConfigString::from(self.suffix.clone()),
            separator: ConfigString::from(self.separator.clone()),
            quote: ConfigString::from(self.quote.clone()),
            relaxed: self.relaxed,
            date_stamp: self.date_stamp,
        }
    }

    #[must_use]
    pub fn channel_config(&self) -> ChannelConfig {
        let target = match &self.file {
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        };
        ChannelConfig::new(target, self.cycle_time)
    }

    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig::new(self.verbose, self.log_file.clone())
    }

    #[must_use]
    pub fn line_terminator(&self) -> LineTerminator {
        if self.zero {
            LineTerminator::Nul
        } else {
            LineTerminator::Newline
        }
    }

    #[must_use]
    pub fn run_mode(&self) -> RunMode {
        if self.loop_mode {
            RunMode::Loop
        } else {
            RunMode::SingleShot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tracing_core::LevelFilter;

    fn parse(args: &[&str]) -> CLIArg {
        CLIArg::try_parse_from(std::iter::once("printansi").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_is_well_formed() { CLIArg::command().debug_assert(); }

    #[test]
    fn test_defaults() {
        let cli_arg = parse(&["a", "b"]);
        assert_eq!(cli_arg.args, vec![OsString::from("a"), OsString::from("b")]);
        assert_eq!(cli_arg.format_config(), FormatConfig::default());
        assert_eq!(cli_arg.channel_config(), ChannelConfig::default());
        assert_eq!(cli_arg.run_mode(), RunMode::SingleShot);
        assert_eq!(cli_arg.line_terminator(), LineTerminator::Newline);
        assert_eq!(cli_arg.tracing_config().level_filter, LevelFilter::ERROR);
    }

    #[test]
    fn test_empty_strings_are_kept_apart_from_unset() {
        let cli_arg = parse(&["-s", "", "-p", "", "a"]);
        let config = cli_arg.format_config();
        assert_eq!(config.suffix, ConfigString::Empty);
        assert_eq!(config.prefix, ConfigString::Empty);
        assert_eq!(config.separator, ConfigString::Unset);
    }

    #[test]
    fn test_hyphen_values() {
        let cli_arg = parse(&["-t", "-", "-p", "--> ", "a"]);
        let config = cli_arg.format_config();
        assert_eq!(config.separator, ConfigString::Literal(b"-".to_vec()));
        assert_eq!(config.prefix, ConfigString::Literal(b"--> ".to_vec()));
    }

    #[test]
    fn test_loop_mode_with_file_output() {
        let cli_arg = parse(&["-l", "-z", "-f", "/tmp/out.log", "-c", "0", "-", "in.txt"]);
        assert_eq!(cli_arg.run_mode(), RunMode::Loop);
        assert_eq!(cli_arg.line_terminator(), LineTerminator::Nul);
        assert_eq!(
            cli_arg.channel_config(),
            ChannelConfig::new(OutputTarget::File(PathBuf::from("/tmp/out.log")), 0)
        );
        assert_eq!(cli_arg.args, vec![OsString::from("-"), OsString::from("in.txt")]);
    }

    #[test]
    fn test_flags_after_first_item_are_items() {
        let cli_arg = parse(&["a", "-v"]);
        assert!(!cli_arg.verbose);
        assert_eq!(cli_arg.args, vec![OsString::from("a"), OsString::from("-v")]);
    }

    #[test]
    fn test_no_args_is_an_error() {
        let result = CLIArg::try_parse_from(["printansi", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_and_log_file() {
        let cli_arg = parse(&["-v", "--log-file", "/tmp/printansi.log", "a"]);
        let tracing_config = cli_arg.tracing_config();
        assert_eq!(tracing_config.level_filter, LevelFilter::DEBUG);
        assert_eq!(
            tracing_config.writer_config,
            crate::WriterConfig::DisplayAndFile("/tmp/printansi.log".into())
        );
    }
}
