//! The seam between the focus logic and the desktop it runs on.
//!
//! The [`Focuser`](crate::focuser::Focuser) and the
//! [`resolver`](crate::resolver) only depend on [`WindowSystem`]; the real
//! implementation in [`x11`](crate::x11) shells out to `xprop`, `xdotool`
//! and `pgrep`, while tests use in-memory doubles.

use crate::window::{RootWindows, WindowProperties};

/// Abstraction over the window system and process table.
pub trait WindowSystem {
    /// The error type produced by this window system.
    type Error: std::error::Error + Send + 'static;

    /// Return the active window and the stacking order, most recently
    /// focused window first.
    fn root_windows(&self) -> Result<RootWindows, Self::Error>;

    /// Return the owning process id and class names of `window_id`.
    fn window_properties(&self, window_id: &str) -> Result<WindowProperties, Self::Error>;

    /// Return the id of the first process named `program`, or `None` if
    /// there is no such process.
    fn find_process_id(&self, program: &str) -> Result<Option<String>, Self::Error>;

    /// Raise and focus `window_id`.
    fn focus(&self, window_id: &str) -> Result<(), Self::Error>;

    /// Launch `command` through the shell without waiting for it.
    fn open(&self, command: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    //  Mock WindowSystem

    /// A test double that records every action made through it.
    #[derive(Debug, Default)]
    struct MockWs {
        focus_log: RefCell<Vec<String>>,
        open_log: RefCell<Vec<String>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl WindowSystem for MockWs {
        type Error = MockError;

        fn root_windows(&self) -> Result<RootWindows, MockError> {
            Ok(RootWindows {
                active: "0x2".into(),
                stacked: vec!["0x2".into(), "0x1".into()],
            })
        }

        fn window_properties(&self, _window_id: &str) -> Result<WindowProperties, MockError> {
            Err(MockError)
        }

        fn find_process_id(&self, _program: &str) -> Result<Option<String>, MockError> {
            Ok(None)
        }

        fn focus(&self, window_id: &str) -> Result<(), MockError> {
            self.focus_log.borrow_mut().push(window_id.to_string());
            Ok(())
        }

        fn open(&self, command: &str) -> Result<(), MockError> {
            self.open_log.borrow_mut().push(command.to_string());
            Ok(())
        }
    }

    #[test]
    fn mock_ws_records_actions() {
        let ws = MockWs::default();
        ws.focus("0x1").unwrap();
        ws.open("xterm").unwrap();
        assert_eq!(*ws.focus_log.borrow(), vec!["0x1".to_string()]);
        assert_eq!(*ws.open_log.borrow(), vec!["xterm".to_string()]);
        assert!(ws.window_properties("0x1").is_err());
        assert_eq!(ws.root_windows().unwrap().stacked.len(), 2);
    }
}
