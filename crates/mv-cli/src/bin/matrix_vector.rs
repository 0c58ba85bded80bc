use std::process::ExitCode;

use mv_cli::{fail, init_logging, parse_args, SerialArgs};
use mv_engine::{run, Mode};

fn main() -> ExitCode {
    let args: SerialArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    match run(&args.operands.into_config(Mode::Serial)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}
