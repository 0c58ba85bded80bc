use std::process::ExitCode;

use mv_cli::{fail, init_logging, parse_args, GenerateArgs};
use mv_matrix::{random_matrix, write_matrix};

fn main() -> ExitCode {
    let args: GenerateArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.verbose);

    let result = random_matrix(args.rows as usize, args.cols as usize, args.seed)
        .and_then(|m| write_matrix(&args.file, &m));
    match result {
        Ok(()) => {
            tracing::info!(
                path = %args.file.display(),
                rows = args.rows,
                cols = args.cols,
                seed = args.seed,
                "matrix written"
            );
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}
