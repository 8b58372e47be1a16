//! Submission state machine.
//!
//! ```text
//! Idle -> Submitted -> AwaitingResponse -> Displayed -> Idle
//!                                       \-> Failed    -> Idle
//! ```

use std::fmt;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitted,
    AwaitingResponse,
    Displayed,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Submitted => "submitted",
            Phase::AwaitingResponse => "awaiting_response",
            Phase::Displayed => "displayed",
            Phase::Failed => "failed",
        }
    }

    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Submitted)
                | (Phase::Submitted, Phase::AwaitingResponse)
                | (Phase::AwaitingResponse, Phase::Displayed)
                | (Phase::AwaitingResponse, Phase::Failed)
                | (Phase::Displayed, Phase::Idle)
                | (Phase::Failed, Phase::Idle)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("illegal transition {from} -> {to}")]
pub struct PhaseError {
    pub from: Phase,
    pub to: Phase,
}

/// Tracks one cycle. Starts and ends in `Idle`.
#[derive(Debug)]
pub struct Cycle {
    phase: Phase,
}

impl Cycle {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn advance(&mut self, next: Phase) -> Result<(), PhaseError> {
        if !self.phase.can_advance_to(next) {
            return Err(PhaseError { from: self.phase, to: next });
        }
        debug!("cycle {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

impl Default for Cycle {
    fn default() -> Self {
        Self::new()
    }
}
