use std::process::ExitCode;

use cpi_changes::app::Preset;

fn main() -> ExitCode {
    match cpi_changes::app::run_preset(Preset::YearOverYear) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
