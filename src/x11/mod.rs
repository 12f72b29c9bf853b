//! X11-specific implementations.
//!
//! This module provides the concrete
//! [`WindowSystem`](crate::traits::WindowSystem) backend, which drives the
//! desktop through the `xprop`, `xdotool` and `pgrep` command-line tools and
//! parses their text output.
//!
//! Nothing outside this module should reference those tools directly.

pub mod tools;
pub mod xprop;
