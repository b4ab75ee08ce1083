/// Externally supplied decision function for policy-driven
/// adversaries.
///
/// The observation is the concatenation of every adversary's `(x, y)`
/// in roster order followed by the player's `(x, y)`: a vector of
/// `2 * (adversary_count + 1)` integers. The reply carries one
/// direction code per adversary (`0=up, 1=down, 2=left, 3=right`).
///
/// The source is opaque to the core: it is never trained or updated
/// here, and it is never trusted to respect obstacles; the engine
/// validates every returned step against the grid. Implementations
/// must not panic for any in-range observation; failure is signalled
/// by returning `None`, which degrades the affected adversary to
/// holding position for the tick.
pub trait DecisionSource: Send + Sync {
    fn direction_codes(&self, observation: &[i32]) -> Option<Vec<u8>>;
}
