use std::process::ExitCode;

use mv_cli::{fail, init_logging, parse_args, ParallelArgs};
use mv_engine::{run_timed, Mode, Stopwatch};

fn main() -> ExitCode {
    let started = Stopwatch::start();
    let args: ParallelArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    let mode = Mode::Threaded {
        threads: args.threads as usize,
    };
    match run_timed(&args.operands.into_config(mode), started) {
        Ok(report) => {
            println!("{}", report.timings);
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}
