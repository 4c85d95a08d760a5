use std::process::ExitCode;

fn main() -> ExitCode {
    match csv_analyzer::cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
