use simplecontrol_frame::{Codec, CodecConfig, Payload};
use tracing::debug;

use crate::cmd::EncodeArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_raw, print_report, FrameReport, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat, config: CodecConfig) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;
    let frame = Codec::new(config).encode_payload(&payload);
    debug!(%payload, %frame, byte_order = ?config.byte_order, "encoded");

    match format {
        OutputFormat::Raw => print_raw(frame.as_bytes()),
        _ => print_report(&FrameReport::new(&frame, Some(payload)), format),
    }
    Ok(SUCCESS)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Payload> {
    match (args.address, args.data) {
        (Some(address), None) => Ok(Payload::Address(address)),
        (None, Some(data)) => Ok(Payload::Data(data)),
        _ => Err(CliError::new(
            USAGE,
            "exactly one of --address or --data is required",
        )),
    }
}
