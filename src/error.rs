// Error types and missing-collaborator diagnostics

use std::fmt;

/// External reference a behavior may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    Movement,
    Target,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Movement => "movement provider",
            Self::Target => "target",
        };
        f.write_str(name)
    }
}

/// Errors from operations outside the per-frame tick
///
/// The tick itself never fails: a missing collaborator degrades to a no-op
/// frame and is reported through [`WarnOnce`].
#[derive(Debug, thiserror::Error)]
pub enum BehaviorError {
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(Collaborator),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Latch that logs a missing collaborator once per outage
///
/// The first frame without the collaborator logs a warning; later frames
/// stay quiet until [`WarnOnce::recovered`] re-arms the latch.
#[derive(Debug, Default)]
pub struct WarnOnce {
    warned: bool,
}

impl WarnOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that `collaborator` is unavailable for `actor`
    /// Returns true if this call emitted the warning
    pub fn missing(&mut self, actor: &str, collaborator: Collaborator) -> bool {
        if self.warned {
            return false;
        }
        self.warned = true;
        log::warn!(
            "{}: {}, skipping dependent transitions",
            actor,
            BehaviorError::MissingCollaborator(collaborator)
        );
        true
    }

    /// The collaborator is back
    pub fn recovered(&mut self) {
        self.warned = false;
    }

    /// Whether the current outage has been reported
    pub fn has_warned(&self) -> bool {
        self.warned
    }
}
