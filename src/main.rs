use std::process::ExitCode;

use log::debug;
use reified::hexstring::bytes_of_hex;
use reified::{Reified, ToJsonField, STD_LOADER};

const USAGE: &str = "usage: reified <type> <hex-encoded bcs>";

fn run(type_str: &str, hex: &str) -> Result<String, Box<dyn std::error::Error>> {
    let r = STD_LOADER.reified(type_str)?;
    debug!("decoding {} with layout {:?}", r.full_type_name(), r.layout());
    let bytes = bytes_of_hex(hex)?;
    let val = r.from_bcs(&bytes)?;
    Ok(serde_json::to_string_pretty(&val.to_json_field())?)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [type_str, hex] = args.as_slice() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    match run(type_str, hex) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
