/// Engine lifecycle definitions
///
/// This module defines the states a crawl engine moves through during one session.
use std::fmt;

/// Represents the lifecycle state of a crawl engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Engine is constructed but `start` has not been called
    Idle,

    /// Workers are pulling from the frontier
    Running,

    /// Completion or cancellation was observed; workers are finishing their current iteration
    Draining,

    /// All workers have exited and the result stream is closed
    Closed,
}

impl EngineState {
    /// Returns true if this state accepts no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns true if workers may still be alive in this state
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Draining)
    }

    /// Returns true if the engine may move from `self` to `next`
    ///
    /// Only forward moves along `Idle -> Running -> Draining -> Closed` are legal.
    pub fn can_transition_to(&self, next: EngineState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Closed)
        )
    }

    /// Returns the lowercase name of this state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
