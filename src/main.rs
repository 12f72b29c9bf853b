//! Entry point for the **focus** command.
//!
//! Parses flags, checks that the X11 tools are installed, builds the run
//! configuration and performs a single focus decision.

use focus::cli::{self, CliArgs};
use focus::config::{self, RunConfig, Settings};
use focus::focuser::{FocusOutcome, Focuser};
use focus::x11::tools::{self, X11Tools};
use log::{debug, error, info, warn};
use std::time::Instant;

/// Try to load `$XDG_CONFIG_HOME/focus/config.json`, falling back to
/// compiled-in defaults.
fn load_settings() -> Settings {
    let path = config::config_dir().join("config.json");
    match Settings::load(&path) {
        Ok(settings) => {
            info!("loaded settings from {}", path.display());
            settings
        }
        Err(e) if path.exists() => {
            warn!("{}, using defaults", e);
            Settings::default()
        }
        Err(e) => {
            debug!("no settings file ({}), using defaults", e);
            Settings::default()
        }
    }
}

fn main() {
    let start = Instant::now();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match CliArgs::try_parse_from(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            println!("{}", cli::usage());
            std::process::exit(2);
        }
    };

    let program = match args.program.clone() {
        Some(program) if !args.wants_usage() => program,
        _ => {
            println!("{}", cli::usage());
            std::process::exit(0);
        }
    };
    if let Err(e) = tools::check_dependencies() {
        error!("missing dependency: {}", e);
        std::process::exit(0);
    }

    let config = RunConfig::new(program, args.open, args.open_command, load_settings());
    let mut focuser = Focuser::new(X11Tools::new(), config);

    let code = match focuser.run() {
        Ok(FocusOutcome::Focused(window)) => {
            info!("focused {}", window);
            0
        }
        Ok(FocusOutcome::Launched(command)) => {
            info!("launched {}", command);
            0
        }
        Ok(FocusOutcome::NotFound) => {
            info!("no window found, and open is not set");
            0
        }
        Ok(FocusOutcome::NoOtherWindow) => 0,
        Ok(FocusOutcome::FocusFailed) => {
            error!("no window of {} could be focused", focuser.config().program);
            1
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    };

    info!("command took {:?} to process", start.elapsed());
    std::process::exit(code);
}
