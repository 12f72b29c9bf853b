//! The orchestrator that ties the window system, the cache and the resolver
//! together.
//!
//! [`Focuser`] performs exactly one focus decision per run:
//!
//! | matched windows `W` | active window `A` | action                               |
//! |---------------------|-------------------|--------------------------------------|
//! | empty               | any               | launch (if `-o`), else report        |
//! | non-empty           | `A ∉ W`           | focus `W[0]`, cycle if that fails    |
//! | only `A`            | `A`               | report that there is no other window |
//! | non-empty           | `A ∈ W`           | focus the first of reversed `W ≠ A`  |

use crate::cache::CacheStore;
use crate::config::RunConfig;
use crate::resolver::{self, ResolveError, Target};
use crate::traits::WindowSystem;
use crate::window::unix_now;
use log::{info, warn};

/// Possible errors from a focus run.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    /// Window resolution gave up.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The window system failed to launch the program.
    #[error("window system error: {0}")]
    WindowSystem(String),
}

/// Where the decision stands once the matching windows are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// No window belongs to the program.
    NoWindowsFound,
    /// The program has windows, none of them focused.
    NotFocused,
    /// One of the program's windows has focus; move to the next one.
    AlreadyFocused,
    /// The active window is the program's only window; reported as
    /// [`FocusOutcome::NoOtherWindow`].
    NoOtherWindowToCycle,
}

impl FocusState {
    /// Classify the matched `windows` against the `active` window.
    pub fn of(windows: &[String], active: &str) -> Self {
        if windows.is_empty() {
            FocusState::NoWindowsFound
        } else if windows.iter().all(|w| w == active) {
            FocusState::NoOtherWindowToCycle
        } else if windows.iter().any(|w| w == active) {
            FocusState::AlreadyFocused
        } else {
            FocusState::NotFocused
        }
    }
}

/// What a run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// The window with this id was focused.
    Focused(String),
    /// No window was found and this command was launched.
    Launched(String),
    /// No window was found and launching was not requested.
    NotFound,
    /// The active window is the program's only window.
    NoOtherWindow,
    /// Every candidate window refused to be focused.
    FocusFailed,
}

/// Finds and focuses the windows of one program.
///
/// Generic over any [`WindowSystem`], so it never talks to X11 directly.
///
/// # Typical usage
///
/// ```ignore
/// let mut focuser = Focuser::new(X11Tools::new(), config);
/// let outcome = focuser.run()?;
/// ```
pub struct Focuser<W: WindowSystem> {
    ws: W,
    config: RunConfig,
    store: CacheStore,
}

impl<W: WindowSystem> Focuser<W> {
    /// Create a focuser and warm its cache from the file named in `config`.
    pub fn new(ws: W, config: RunConfig) -> Self {
        let mut store = if config.cache_enabled {
            CacheStore::new(&config.cache_file, config.cache_ttl)
        } else {
            CacheStore::in_memory(config.cache_ttl)
        };
        store.load();
        Self::with_store(ws, config, store)
    }

    /// Create a focuser around an already prepared `store`.
    pub fn with_store(ws: W, config: RunConfig, store: CacheStore) -> Self {
        Self { ws, config, store }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Resolve the program's windows and act on them.
    ///
    /// Failures of the informational queries (process lookup, root window)
    /// are logged and treated as empty results.
    pub fn run(&mut self) -> Result<FocusOutcome, FocusError> {
        let process_id = match self.ws.find_process_id(&self.config.program) {
            Ok(pid) => pid.unwrap_or_default(),
            Err(e) => {
                warn!("process lookup for {} failed: {}", self.config.program, e);
                String::new()
            }
        };
        info!("current process id is: {}", process_id);

        let root = match self.ws.root_windows() {
            Ok(root) => root,
            Err(e) => {
                warn!("root window query failed: {}", e);
                Default::default()
            }
        };
        info!("current window id is: {}", root.active);

        if root.stacked.is_empty() {
            warn!("no stacked windows found, xprop may have failed");
            return self.decide(&[], &root.active);
        }

        let target = Target::new(self.config.program.clone(), process_id);
        let windows = resolver::resolve(&self.ws, &mut self.store, &root.stacked, &target, unix_now())?;
        info!("{} window(s) belong to {}", windows.len(), self.config.program);
        self.decide(&windows, &root.active)
    }

    /// Act on the resolved `windows` given the `active` window.
    pub fn decide(&self, windows: &[String], active: &str) -> Result<FocusOutcome, FocusError> {
        match FocusState::of(windows, active) {
            FocusState::NoWindowsFound => self.open_or_report(),
            FocusState::NoOtherWindowToCycle => {
                info!("window {} is already in focus and there is no other window", active);
                Ok(FocusOutcome::NoOtherWindow)
            }
            FocusState::AlreadyFocused => {
                info!("window {} is already in focus, cycling", active);
                Ok(self.cycle(windows, active))
            }
            FocusState::NotFocused => {
                let first = &windows[0];
                info!("focusing first available window {}", first);
                match self.ws.focus(first) {
                    Ok(()) => Ok(FocusOutcome::Focused(first.clone())),
                    Err(e) => {
                        warn!("failed to focus {}: {}, cycling instead", first, e);
                        Ok(self.cycle(windows, active))
                    }
                }
            }
        }
    }

    /// Focus the next window of the program.
    ///
    /// `windows` is newest-first; candidates are tried oldest-first and the
    /// first one that accepts focus wins.
    fn cycle(&self, windows: &[String], active: &str) -> FocusOutcome {
        let mut candidates = windows.iter().rev().filter(|w| *w != active).peekable();
        if candidates.peek().is_none() {
            info!("there is no other window to focus");
            return FocusOutcome::NoOtherWindow;
        }
        for window in candidates {
            info!("found another window of the program ({})", window);
            match self.ws.focus(window) {
                Ok(()) => return FocusOutcome::Focused(window.clone()),
                Err(e) => warn!("failed to focus {}: {}", window, e),
            }
        }
        FocusOutcome::FocusFailed
    }

    fn open_or_report(&self) -> Result<FocusOutcome, FocusError> {
        if !self.config.open {
            info!("no window found and opening was not requested");
            return Ok(FocusOutcome::NotFound);
        }
        let command = self.config.launch_command();
        info!("trying to open a new window with {}", command);
        self.ws
            .open(command)
            .map_err(|e| FocusError::WindowSystem(e.to_string()))?;
        Ok(FocusOutcome::Launched(command.to_string()))
    }
}
