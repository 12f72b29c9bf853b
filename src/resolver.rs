//! Decides which stacked windows belong to the target program.
//!
//! Resolution alternates between a cheap match pass, which only looks at
//! cached records, and a refresh pass, which queries every stacked window
//! through the [`WindowSystem`] and stores the result.  The loop is bounded
//! by [`MAX_ROUNDS`]; running out of rounds drops the cache entirely.

use crate::cache::CacheStore;
use crate::text::unique_in_order;
use crate::traits::WindowSystem;
use crate::window::WindowRecord;
use log::{debug, warn};
use std::sync::mpsc;
use std::thread;

/// Maximum number of refresh passes before resolution gives up.
pub const MAX_ROUNDS: usize = 3;

/// Errors from resolving windows.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Windows were still unresolved after every refresh pass.
    #[error("windows still unresolved after {rounds} rounds, cache dropped")]
    TooManyRounds { rounds: usize },
}

/// The program whose windows we are looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Name matched against window class tokens.
    pub program: String,
    /// Process id from `pgrep`, empty if none was found.
    pub process_id: String,
}

impl Target {
    pub fn new(program: impl Into<String>, process_id: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            process_id: process_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Match,
    NoMatch,
    /// No fresh record; the window needs to be queried.
    Missing,
}

/// Result of one match pass, both lists in stacking order.
#[derive(Debug, Default, PartialEq, Eq)]
struct MatchPass {
    matched: Vec<String>,
    missing: Vec<String>,
}

/// Return the ids in `stacked` that belong to `target`, most recently
/// focused first and without duplicates.
///
/// `store` is consulted first and refreshed when windows are missing from
/// it.  If windows are still missing after [`MAX_ROUNDS`] refreshes the
/// cache is invalidated and [`ResolveError::TooManyRounds`] is returned.
pub fn resolve<W: WindowSystem>(
    ws: &W,
    store: &mut CacheStore,
    stacked: &[String],
    target: &Target,
    now: i64,
) -> Result<Vec<String>, ResolveError> {
    for round in 0..=MAX_ROUNDS {
        let pass = match_pass(store, stacked, target, now);
        if pass.missing.is_empty() {
            return Ok(unique_in_order(pass.matched));
        }
        if round == MAX_ROUNDS {
            break;
        }
        debug!(
            "round {}: {} window(s) not cached, querying {}",
            round,
            pass.missing.len(),
            stacked.len()
        );

        let records = refresh(ws, stacked, now);
        if records.is_empty() {
            warn!("could not query any window, continuing with cached data only");
            return Ok(unique_in_order(pass.matched));
        }
        if let Err(e) = store.save(records, now) {
            warn!("failed to write cache {}: {}", store.path().display(), e);
        }
    }

    store.invalidate();
    Err(ResolveError::TooManyRounds { rounds: MAX_ROUNDS })
}

/// Classify every window against the cached records, one worker per window.
///
/// Workers only read `store`; verdicts are collected over a channel and
/// the scope join is the barrier before the caller continues.
fn match_pass(store: &CacheStore, stacked: &[String], target: &Target, now: i64) -> MatchPass {
    let mut verdicts: Vec<(usize, Verdict)> = thread::scope(|s| {
        let (tx, rx) = mpsc::channel();
        for (index, window_id) in stacked.iter().enumerate() {
            let tx = tx.clone();
            s.spawn(move || {
                let verdict = classify(store, window_id, target, now);
                let _ = tx.send((index, verdict));
            });
        }
        drop(tx);
        rx.iter().collect()
    });
    verdicts.sort_by_key(|(index, _)| *index);

    let mut pass = MatchPass::default();
    for (index, verdict) in verdicts {
        let window_id = stacked[index].clone();
        match verdict {
            Verdict::Match => pass.matched.push(window_id),
            Verdict::Missing => pass.missing.push(window_id),
            Verdict::NoMatch => {}
        }
    }
    pass
}

fn classify(store: &CacheStore, window_id: &str, target: &Target, now: i64) -> Verdict {
    match store.lookup(window_id, now) {
        None => Verdict::Missing,
        Some(record) if record.belongs_to(&target.program, &target.process_id) => Verdict::Match,
        Some(_) => Verdict::NoMatch,
    }
}

/// Query every window in `stacked`, skipping the ones whose query fails.
fn refresh<W: WindowSystem>(ws: &W, stacked: &[String], now: i64) -> Vec<WindowRecord> {
    stacked
        .iter()
        .filter_map(|window_id| match ws.window_properties(window_id) {
            Ok(props) => Some(WindowRecord::new(window_id.as_str(), props, now)),
            Err(e) => {
                warn!("failed to query window {}: {}", window_id, e);
                None
            }
        })
        .collect()
}
