use std::fs::File;
use std::io::{self, BufReader, Read};

use simplecontrol_frame::{Codec, CodecConfig, FrameError, FrameReader};
use tracing::{info, warn};

use crate::cmd::ReadArgs;
use crate::exit::{frame_error, io_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, FrameReport, OutputFormat};

pub fn run(args: ReadArgs, format: OutputFormat, config: CodecConfig) -> CliResult<i32> {
    let source: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|err| {
            io_error(&format!("failed opening {}", path.display()), err)
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let codec = Codec::new(config);
    let mut reader = FrameReader::with_config(source, config);
    let mut decoded = 0usize;
    let mut invalid = 0usize;

    while args.count.is_none_or(|limit| decoded + invalid < limit) {
        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => return Err(frame_error("read failed", err)),
        };

        let payload = codec.decode_payload(&frame);
        if payload.is_some() {
            decoded += 1;
        } else {
            invalid += 1;
            warn!(%frame, "invalid frame in stream");
        }
        print_report(&FrameReport::new(&frame, payload), format);
    }

    info!(decoded, invalid, "stream finished");
    Ok(if invalid == 0 { SUCCESS } else { DATA_INVALID })
}
