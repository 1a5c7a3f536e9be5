use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use simplecontrol_frame::{ByteOrder, CodecConfig, Frame, Kind};

use crate::exit::{frame_error, CliResult};
use crate::output::OutputFormat;

pub mod classify;
pub mod decode;
pub mod encode;
pub mod read;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode an address or data value into a frame.
    Encode(EncodeArgs),
    /// Decode a frame into its value.
    Decode(DecodeArgs),
    /// Report whether a frame is an address, data, or invalid frame.
    Classify(ClassifyArgs),
    /// Decode a stream of raw frames from a file or stdin.
    Read(ReadArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: CodecConfig) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format, config),
        Command::Decode(args) => decode::run(args, format, config),
        Command::Classify(args) => classify::run(args, format),
        Command::Read(args) => read::run(args, format, config),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum KindArg {
    Address,
    Data,
}

impl From<KindArg> for Kind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Address => Kind::Address,
            KindArg::Data => Kind::Data,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ByteOrderArg {
    Little,
    Big,
    Native,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
            ByteOrderArg::Native => ByteOrder::native(),
        }
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("value").required(true).args(["address", "data"])))]
pub struct EncodeArgs {
    /// Unsigned 32-bit address (decimal, 0x hex, or 0b binary).
    #[arg(long, value_parser = parse_address)]
    pub address: Option<u32>,
    /// 32-bit float data value.
    #[arg(long, allow_hyphen_values = true)]
    pub data: Option<f32>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes, e.g. `80 86 9c 80 f6` or `80869c80f6`.
    #[arg(required = true, num_args = 1..)]
    pub frame: Vec<String>,
    /// Decode as this kind instead of the frame's own classification.
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Frame bytes, e.g. `80 86 9c 80 f6` or `80869c80f6`.
    #[arg(required = true, num_args = 1..)]
    pub frame: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Read frames from this file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Stop after N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Join positional frame tokens and parse them as one frame.
pub fn parse_frame_args(tokens: &[String]) -> CliResult<Frame> {
    tokens
        .join(" ")
        .parse::<Frame>()
        .map_err(|err| frame_error("invalid frame", err))
}

fn parse_address(input: &str) -> Result<u32, String> {
    let input = input.trim().replace('_', "");
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = input.strip_prefix("0b").or_else(|| input.strip_prefix("0B")) {
        u32::from_str_radix(bin, 2)
    } else {
        input.parse::<u32>()
    };
    parsed.map_err(|err| format!("invalid address {input:?}: {err}"))
}
