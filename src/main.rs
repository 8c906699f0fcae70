use std::process::ExitCode;

fn main() -> ExitCode {
    shapedraw::init_logging();

    match shapedraw::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
