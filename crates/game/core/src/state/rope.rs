use super::common::TimeMs;

/// Win-gate state for the exit rope.
///
/// The rope arms once the item threshold is reached and takes a
/// configured duration to extend; the round can only be won while it
/// reports [`RopeState::Extended`]. The pixel-level drop animation is
/// a renderer concern driven by the emitted events, not part of this
/// state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RopeState {
    #[default]
    Stowed,
    Extending {
        since: TimeMs,
    },
    Extended,
}

impl RopeState {
    /// Starts extending. Only meaningful from `Stowed`; later calls
    /// are ignored so the threshold trigger stays edge-triggered.
    pub fn arm(&mut self, now: TimeMs) {
        if matches!(self, RopeState::Stowed) {
            *self = RopeState::Extending { since: now };
        }
    }

    /// Advances the extension timer. Returns `true` on the tick the
    /// rope becomes fully extended.
    pub fn update(&mut self, now: TimeMs, extend_duration_ms: u64) -> bool {
        if let RopeState::Extending { since } = *self
            && now.millis_since(since) >= extend_duration_ms
        {
            *self = RopeState::Extended;
            return true;
        }
        false
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, RopeState::Extended)
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self, RopeState::Stowed)
    }
}
