//! Command-line entry point for userkit.
//!
//! # Responsibility
//! - Resolve configuration (file, then `USERKIT_*` environment).
//! - Dispatch one subcommand into `userkit_core` and print its result.

use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use userkit_core::{
    add, divide, init_logging, is_prime, save_user_to_path, temperature_label, AppConfig,
    ReqwestTransport, WeatherClient,
};

#[derive(Debug, Parser)]
#[command(name = "userkit", version, about = "User registry and utility toolkit")]
struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core health-check and version.
    Ping,
    /// Report whether N is prime.
    Prime {
        #[arg(allow_hyphen_values = true)]
        n: i64,
    },
    /// Add A and B.
    Add {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },
    /// Divide A by B.
    Divide {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },
    /// Insert one user row into the users database.
    SaveUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        /// Overrides the configured database path.
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Fetch current weather for a city.
    Weather { city: String },
}

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(cli, |key| std::env::var(key).ok(), &mut io::stdout().lock());
    ExitCode::from(exit_status(result, &mut io::stderr().lock()))
}

/// Maps a run result to a process status, reporting failures on `err_out`.
fn exit_status<W: Write>(result: CliResult<()>, err_out: &mut W) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(err_out, "error: {err}");
            1
        }
    }
}

fn run<F, W>(cli: Cli, env: F, out: &mut W) -> CliResult<()>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let config = load_config(cli.config.as_deref(), env)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir.to_str().ok_or("log_dir must be valid UTF-8")?;
        init_logging(&config.log_level, log_dir)?;
    }

    match cli.command {
        Command::Ping => {
            writeln!(out, "userkit_core ping={}", userkit_core::ping())?;
            writeln!(out, "userkit_core version={}", userkit_core::core_version())?;
        }
        Command::Prime { n } => {
            writeln!(out, "{n} prime={}", is_prime(n))?;
        }
        Command::Add { a, b } => {
            writeln!(out, "{}", add(a, b)?)?;
        }
        Command::Divide { a, b } => {
            writeln!(out, "{}", divide(a, b)?)?;
        }
        Command::SaveUser { name, age, db } => {
            let path = db.unwrap_or(config.database_path);
            let id = save_user_to_path(&path, &name, age)?;
            info!("event=cli_save_user module=cli status=ok id={id}");
            writeln!(out, "saved user id={id} db={}", path.display())?;
        }
        Command::Weather { city } => {
            let client =
                WeatherClient::with_base_url(ReqwestTransport::new()?, &config.weather_base_url)?;
            let report = client.fetch(&city)?;
            writeln!(
                out,
                "temperature={} condition={} feels={}",
                report.temperature,
                report.condition,
                temperature_label(report.temperature)
            )?;
        }
    }

    Ok(())
}

/// Config file (or defaults), then `USERKIT_*` overrides from `env`, then validation.
fn load_config<F>(path: Option<&Path>, env: F) -> CliResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides(env);
    config.validate()?;
    Ok(config)
}
