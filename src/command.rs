//! Command-based control for indicators.

/// Lifecycle actions a host can send to an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkerAction {
    /// Start the loop (host "mounted" hook).
    Mount,
    /// Freeze the animation.
    Pause,
    /// Continue a paused animation.
    Resume,
    /// Stop for good (host "unmounted" hook).
    Dispose,
}

/// Action targeting a specific indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkerCommand<Id> {
    pub id: Id,
    pub action: BlinkerAction,
}

impl<Id> BlinkerCommand<Id> {
    /// Creates command.
    pub fn new(id: Id, action: BlinkerAction) -> Self {
        Self { id, action }
    }
}
