//! Poll cycle events

/// Events that drive the [`CycleState`](super::CycleState) machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// Poll interval elapsed
    Tick,
    /// Patterns produced from the text snapshot
    Rendered,
    /// Bits shifted and latched
    WriteSucceeded,
    /// Bank reported an error before or during the latch
    WriteFailed,
    /// Cycle bookkeeping finished
    Complete,
}
