//! **focus**: raise the window of a program on an X11 desktop.
//!
//! Given a program name, focus finds the top-level windows that belong to
//! it, then either focuses the most recently used one, cycles to the next
//! one when the program already has focus, or launches the program when it
//! has no window at all.
//!
//! # Architecture
//!
//! The crate is organised around one trait:
//!
//! * [`traits::WindowSystem`]: abstracts window queries, focusing and
//!   launching, so the decision logic is not coupled to the X11 tools.
//!
//! The concrete backend lives in [`x11`] (`xprop`, `xdotool`, `pgrep`).
//! Resolved windows are cached on disk by [`cache`], matched by
//! [`resolver`] and acted upon by [`focuser`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod focuser;
pub mod resolver;
pub mod text;
pub mod traits;
pub mod window;
pub mod x11;
