//! The linear stage sequence.

use std::fmt;

/// Pipeline stage. Order is fixed: Steaming → Rolling → Drying → Finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    Steaming,
    Rolling,
    Drying,
    /// Terminal; no rule runs here.
    Finished,
}

impl Stage {
    /// Working stages in execution order.
    pub const PROCESSING: [Stage; 3] = [Stage::Steaming, Stage::Rolling, Stage::Drying];

    /// Upper-case name used in console lines and CSV records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Steaming => "STEAMING",
            Stage::Rolling => "ROLLING",
            Stage::Drying => "DRYING",
            Stage::Finished => "FINISHED",
        }
    }

    /// Following stage; Finished maps to itself.
    pub const fn next(self) -> Stage {
        match self {
            Stage::Steaming => Stage::Rolling,
            Stage::Rolling => Stage::Drying,
            Stage::Drying | Stage::Finished => Stage::Finished,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Stage::Finished)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
