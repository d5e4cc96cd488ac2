//! CLI entry point for `draft-check`.

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use draft_check::{CliArgs, Settings, init_tracing, run};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let settings = Settings::load_from_iter([OsString::from("draft-check")])
        .wrap_err("failed to load draft-check settings")?;
    init_tracing(&settings);

    let args = CliArgs::parse();
    let mut stdout = io::stdout().lock();
    let report = run(&args, &DefaultClock, &mut stdout)
        .wrap_err_with(|| format!("failed to check draft '{}'", args.path))?;

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
