use std::io::{self, Write};
use std::process::ExitCode;

use mv_cli::{fail, init_logging, parse_args, PrintArgs};
use mv_matrix::{format_matrix, read_matrix};

fn main() -> ExitCode {
    let args: PrintArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    let matrix = match read_matrix(&args.file) {
        Ok(m) => m,
        Err(err) => return fail(&err),
    };
    let mut stdout = io::stdout().lock();
    match stdout.write_all(format_matrix(&matrix).as_bytes()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}
