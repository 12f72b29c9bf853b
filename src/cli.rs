//! Command-line interface.
//!
//! Flags use the single-dash long form (`-p firefox -o -op "firefox -P"`).
//! They are rewritten to clap's double-dash form before parsing, so `--p`
//! and `-p=firefox` work as well.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;

const PROGRAM: &str = "p";
const OPEN: &str = "o";
const OPEN_COMMAND: &str = "op";
const HELP: &str = "help";
const VERSION: &str = "v";

/// Flags that consume the following argument as their value.
const VALUE_FLAGS: [&str; 2] = [PROGRAM, OPEN_COMMAND];

/// Parsed command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub program: Option<String>,
    pub open: bool,
    pub open_command: Option<String>,
    pub help: bool,
    pub version: bool,
}

impl CliArgs {
    /// Parse `args` (including the binary name in first position).
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let matches = build_cli().try_get_matches_from(normalize_args(args))?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            program: matches
                .get_one::<String>(PROGRAM)
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            open: matches.get_flag(OPEN),
            open_command: matches.get_one::<String>(OPEN_COMMAND).cloned(),
            help: matches.get_flag(HELP),
            version: matches.get_flag(VERSION),
        }
    }

    /// Whether the run should stop after printing the usage text.
    pub fn wants_usage(&self) -> bool {
        self.help || self.version || self.program.is_none()
    }
}

pub fn build_cli() -> Command {
    Command::new("focus")
        .about("Focus, cycle or launch the windows of a program")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(PROGRAM)
                .long(PROGRAM)
                .value_name("program")
                .allow_hyphen_values(true)
                .help("Which program to attempt to focus (Required)"),
        )
        .arg(
            Arg::new(OPEN)
                .long(OPEN)
                .action(ArgAction::SetTrue)
                .help("Try to open the program if it cannot be found"),
        )
        .arg(
            Arg::new(OPEN_COMMAND)
                .long(OPEN_COMMAND)
                .value_name("command")
                .allow_hyphen_values(true)
                .help("Command used to open the program (defaults to the -p value)"),
        )
        .arg(
            Arg::new(HELP)
                .long(HELP)
                .action(ArgAction::SetTrue)
                .help("Print this help message."),
        )
        .arg(
            Arg::new(VERSION)
                .long(VERSION)
                .action(ArgAction::SetTrue)
                .help("Print version number."),
        )
}

/// Rewrite single-dash flags (`-op`) to the double-dash form clap expects.
///
/// The argument following a value flag is left untouched even if it starts
/// with a dash.  Everything after a bare `--` is left untouched too.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut args = args.into_iter().map(Into::into);
    if let Some(bin) = args.next() {
        out.push(bin);
    }

    let mut expecting_value = false;
    let mut passthrough = false;
    for arg in args {
        if passthrough || expecting_value {
            expecting_value = false;
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let flag = text.trim_start_matches('-');
        if flag.len() == text.len() || flag.is_empty() {
            out.push(arg);
            continue;
        }
        let name = flag.split('=').next().unwrap_or(flag);
        expecting_value = VALUE_FLAGS.contains(&name) && !flag.contains('=');
        out.push(OsString::from(format!("--{}", flag)));
    }
    out
}

/// The usage block printed for `-help`, `-v` and missing parameters.
pub fn usage() -> String {
    let rule = "-----------------------------";
    let mut text = format!("{rule}\nFocus v{}\n{rule}\n", env!("CARGO_PKG_VERSION"));
    for arg in build_cli().get_arguments() {
        let name = arg.get_id().as_str();
        match arg.get_value_names().and_then(|v| v.first()) {
            Some(value) => text.push_str(&format!("  -{} {}\n", name, value)),
            None => text.push_str(&format!("  -{}\n", name)),
        }
        if let Some(help) = arg.get_help() {
            text.push_str(&format!("        {}\n", help));
        }
    }
    text.push_str(&format!("{rule}\nDependencies xdotool and xprop\n{rule}"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["focus"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn single_dash_flags() {
        let args = parse(&["-p", "firefox", "-o", "-op", "firefox -P work"]);
        assert_eq!(args.program.as_deref(), Some("firefox"));
        assert!(args.open);
        assert_eq!(args.open_command.as_deref(), Some("firefox -P work"));
        assert!(!args.wants_usage());
    }

    #[test]
    fn double_dash_and_equals_forms() {
        let args = parse(&["--p=xterm", "-op=xterm -e htop"]);
        assert_eq!(args.program.as_deref(), Some("xterm"));
        assert_eq!(args.open_command.as_deref(), Some("xterm -e htop"));
        assert!(!args.open);
    }

    #[test]
    fn value_starting_with_dash_is_kept() {
        let args = parse(&["-p", "-weird-name"]);
        assert_eq!(args.program.as_deref(), Some("-weird-name"));
    }

    #[test]
    fn missing_program_wants_usage() {
        assert!(parse(&[]).wants_usage());
        assert!(parse(&["-o"]).wants_usage());
        assert!(parse(&["-p", "  "]).wants_usage());
    }

    #[test]
    fn help_and_version_want_usage() {
        assert!(parse(&["-p", "x", "-help"]).wants_usage());
        assert!(parse(&["-p", "x", "-v"]).wants_usage());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(CliArgs::try_parse_from(["focus", "-bogus"]).is_err());
    }

    #[test]
    fn usage_lists_every_flag() {
        let text = usage();
        for flag in ["-p program", "-o", "-op command", "-help", "-v"] {
            assert!(text.contains(flag), "missing {} in usage", flag);
        }
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
