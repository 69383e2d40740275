use std::process::ExitCode;

fn main() -> ExitCode {
    match uicapture::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
