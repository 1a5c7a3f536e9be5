mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use simplecontrol_frame::CodecConfig;

use crate::cmd::{ByteOrderArg, Command};
use crate::logging::{init_logging, LogFormat, LogLevel, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "simplecontrol", version, about = "Address/data frame codec CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Octet order used when packing values into frames.
    #[arg(long, value_name = "ORDER", default_value = "little", global = true)]
    byte_order: ByteOrderArg,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", env = LOG_FORMAT_ENV, global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", env = LOG_LEVEL_ENV, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_format, cli.log_level) {
        eprintln!("warning: {err}");
    }

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = CodecConfig {
        byte_order: cli.byte_order.into(),
    };
    let result = cmd::run(cli.command, format, config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_address() {
        let cli = Cli::try_parse_from(["simplecontrol", "encode", "--address", "0x10"])
            .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => assert_eq!(args.address, Some(0x10)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_negative_data() {
        let cli = Cli::try_parse_from(["simplecontrol", "encode", "--data", "-2.5"])
            .expect("negative data should parse");

        match cli.command {
            Command::Encode(args) => assert_eq!(args.data, Some(-2.5)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_address_and_data_together() {
        let err = Cli::try_parse_from([
            "simplecontrol",
            "encode",
            "--address",
            "1",
            "--data",
            "1.0",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn encode_requires_a_value() {
        let err = Cli::try_parse_from(["simplecontrol", "encode"])
            .expect_err("missing value should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn log_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "simplecontrol",
            "classify",
            "80 80 80 80 f0",
            "--log-level",
            "off",
            "--log-format",
            "json",
        ])
        .expect("global log flags should parse");

        assert_eq!(cli.log_level, LogLevel::Off);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn parses_decode_with_split_bytes_and_kind() {
        let cli = Cli::try_parse_from([
            "simplecontrol",
            "--byte-order",
            "big",
            "decode",
            "80",
            "86",
            "9c",
            "80",
            "f6",
            "--kind",
            "data",
        ])
        .expect("decode args should parse");

        assert!(matches!(cli.byte_order, ByteOrderArg::Big));
        match cli.command {
            Command::Decode(args) => {
                assert_eq!(args.frame.len(), 5);
                assert!(matches!(args.kind, Some(cmd::KindArg::Data)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
