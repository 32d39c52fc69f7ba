use std::process::ExitCode;

fn main() -> ExitCode {
    agrotrack_cli::run()
}
