//! Flush controller.

/// Flush mode.
///
/// While flushing, responses still drain the pending count but are not acknowledged, and nothing
/// new is admitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlushController {
    /// Responses are acknowledged.
    #[default]
    Normal,
    /// Responses are drained silently.
    Flushing,
}

impl FlushController {
    /// Returns whether responses are being drained.
    pub fn is_flushing(&self) -> bool { matches!(self, Self::Flushing) }

    /// Computes the next mode.
    ///
    /// - `cyc`: the Wishbone cycle line this cycle.
    /// - `error`: an error response completed this cycle.
    /// - `drained`: nothing is pending after this cycle.
    pub fn logic(&self, cyc: bool, error: bool, drained: bool) -> Self {
        match self {
            Self::Normal if error || (!cyc && !drained) => Self::Flushing,
            Self::Flushing if drained && !cyc => Self::Normal,
            _ => *self,
        }
    }
}
