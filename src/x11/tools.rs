//! [`WindowSystem`] implementation backed by the X11 command-line tools.
//!
//! Every method spawns a short-lived child process and waits for it, except
//! [`open`](WindowSystem::open), which detaches.  No timeout is applied: a
//! hung tool blocks the caller.

use crate::traits::WindowSystem;
use crate::window::{RootWindows, WindowProperties};
use crate::x11::xprop;
use log::{debug, info};
use std::process::{Command, Output, Stdio};

/// Talks to the X server through `xprop`, `xdotool` and `pgrep`.
pub struct X11Tools;

/// Errors from running an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The tool could not be started at all (usually: not installed).
    #[error("failed to run {tool}: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// The tool ran but exited unsuccessfully.
    #[error("{tool} {args} failed: {stderr}")]
    Failed {
        tool: &'static str,
        args: String,
        stderr: String,
    },
}

impl Default for X11Tools {
    fn default() -> Self {
        Self
    }
}

impl X11Tools {
    pub fn new() -> Self {
        Self
    }
}

/// Run `tool` with `args`, wait for it, and return its output if it exited
/// successfully.
fn run(tool: &'static str, args: &[&str]) -> Result<Output, ToolError> {
    debug!("running {} {}", tool, args.join(" "));
    let output = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ToolError::Io { tool, source })?;
    if output.status.success() {
        Ok(output)
    } else {
        Err(ToolError::Failed {
            tool,
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Check that the tools needed to query and focus windows are usable.
///
/// `xprop -root` doubles as a check that an X display is reachable.
pub fn check_dependencies() -> Result<(), ToolError> {
    run("xprop", &["-root"])?;
    run("xdotool", &["help"])?;
    Ok(())
}

impl WindowSystem for X11Tools {
    type Error = ToolError;

    fn root_windows(&self) -> Result<RootWindows, Self::Error> {
        let output = run("xprop", &["-root"])?;
        Ok(xprop::parse_root(&String::from_utf8_lossy(&output.stdout)))
    }

    fn window_properties(&self, window_id: &str) -> Result<WindowProperties, Self::Error> {
        let output = run("xprop", &["-id", window_id])?;
        Ok(xprop::parse_window(&String::from_utf8_lossy(&output.stdout)))
    }

    fn find_process_id(&self, program: &str) -> Result<Option<String>, Self::Error> {
        let output = Command::new("pgrep")
            .arg(program)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Io {
                tool: "pgrep",
                source,
            })?;
        // Exit status 1 means "no process matched".
        match output.status.code() {
            Some(0) => Ok(xprop::parse_pgrep(&String::from_utf8_lossy(&output.stdout))),
            Some(1) => Ok(None),
            _ => Err(ToolError::Failed {
                tool: "pgrep",
                args: program.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }

    fn focus(&self, window_id: &str) -> Result<(), Self::Error> {
        info!("focusing {}", window_id);
        run("xdotool", &["windowactivate", window_id]).map(|_| ())
    }

    fn open(&self, command: &str) -> Result<(), Self::Error> {
        info!("opening {}", command);
        Command::new("/bin/sh")
            .args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| ToolError::Io {
                tool: "/bin/sh",
                source,
            })
    }
}
