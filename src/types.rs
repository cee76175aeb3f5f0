// src/types.rs
use std::path::PathBuf;

/// Lifecycle of the input stream. `Finished` is terminal.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum StreamState {
    #[default]
    Running,
    Finished,
}

/// What a single tick did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    /// Samples appended during this tick.
    pub accepted: usize,
    pub state: StreamState,
    /// Set only on the tick that finalized and managed to write the image.
    pub snapshot: Option<PathBuf>,
}

impl TickOutcome {
    pub fn idle(state: StreamState) -> Self {
        Self {
            accepted: 0,
            state,
            snapshot: None,
        }
    }
}
