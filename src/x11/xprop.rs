//! Parsers for the text printed by `xprop` and `pgrep`.
//!
//! Lines are recognised by their literal prefix; everything after the
//! prefix is the value.  Lines that do not carry one of the properties we
//! care about are ignored.

use crate::text::{clean_names, filter_new_lines};
use crate::window::{RootWindows, WindowProperties};
use log::debug;

const STACKING_PREFIX: &str = "_NET_CLIENT_LIST_STACKING(WINDOW): window id # ";
const ACTIVE_PREFIX: &str = "_NET_ACTIVE_WINDOW(WINDOW): window id # ";
const PID_PREFIX: &str = "_NET_WM_PID(CARDINAL) = ";
const CLASS_PREFIX: &str = "WM_CLASS(STRING) = ";

/// Parse the output of `xprop -root`.
///
/// `_NET_CLIENT_LIST_STACKING` lists windows bottom-of-stack first; the
/// returned list is reversed so the most recently focused window comes
/// first.
pub fn parse_root(output: &str) -> RootWindows {
    let mut root = RootWindows::default();
    for line in output.lines() {
        if let Some(value) = value_after(line, STACKING_PREFIX) {
            let mut stacked: Vec<String> = value
                .split(", ")
                .map(filter_new_lines)
                .filter(|id| !id.is_empty())
                .collect();
            stacked.reverse();
            debug!("stacking order: {:?}", stacked);
            root.stacked = stacked;
        } else if let Some(value) = value_after(line, ACTIVE_PREFIX) {
            root.active = value;
        }
    }
    root
}

/// Parse the output of `xprop -id <window>`.
pub fn parse_window(output: &str) -> WindowProperties {
    let mut props = WindowProperties::default();
    for line in output.lines() {
        if let Some(value) = value_after(line, PID_PREFIX) {
            props.process_id = value;
        } else if let Some(value) = value_after(line, CLASS_PREFIX) {
            props.names = clean_names(&value);
        }
    }
    props
}

/// Pick the first process id out of `pgrep` output.
pub fn parse_pgrep(output: &str) -> Option<String> {
    output
        .lines()
        .map(filter_new_lines)
        .find(|line| !line.is_empty())
}

fn value_after(line: &str, prefix: &str) -> Option<String> {
    line.find(prefix)
        .map(|at| filter_new_lines(&line[at + prefix.len()..]))
}
