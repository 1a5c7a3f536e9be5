use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("simplecontrol {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: simplecontrol");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("SIMPLECONTROL_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("frame_size: {}", simplecontrol_frame::FRAME_SIZE);
    println!(
        "native_byte_order: {:?}",
        simplecontrol_frame::ByteOrder::native()
    );
    println!("features: async={}, cli=true", cfg!(feature = "async"));

    Ok(SUCCESS)
}
