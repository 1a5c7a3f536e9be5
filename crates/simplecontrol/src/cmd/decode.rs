use simplecontrol_frame::{Codec, CodecConfig, Frame, Kind, Payload};
use tracing::warn;

use crate::cmd::{parse_frame_args, DecodeArgs};
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, FrameReport, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat, config: CodecConfig) -> CliResult<i32> {
    let frame = parse_frame_args(&args.frame)?;
    let payload = decode_frame(&Codec::new(config), &frame, args.kind.map(Kind::from));

    print_report(&FrameReport::new(&frame, payload), format);

    match payload {
        Some(_) => Ok(SUCCESS),
        None => {
            warn!(%frame, "frame is neither an address nor a data frame");
            Ok(DATA_INVALID)
        }
    }
}

/// An explicit kind overrides classification; otherwise invalid frames
/// decode to nothing.
fn decode_frame(codec: &Codec, frame: &Frame, kind: Option<Kind>) -> Option<Payload> {
    match kind {
        Some(kind) => Some(codec.decode(frame, kind)),
        None => codec.decode_payload(frame),
    }
}
