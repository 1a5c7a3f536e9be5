use crate::cmd::{parse_frame_args, ClassifyArgs};
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, FrameReport, OutputFormat};

pub fn run(args: ClassifyArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = parse_frame_args(&args.frame)?;
    let class = frame.classify();

    print_report(&FrameReport::new(&frame, None), format);

    Ok(if class.is_valid() { SUCCESS } else { DATA_INVALID })
}
