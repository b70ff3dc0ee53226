//! Poll cycle state machine
//!
//! Every poll cycle walks `Idle → Rendering → Writing → Latched → Idle`.
//! A failed write drops straight back to `Idle` without passing through
//! `Latched`, so whatever frame was latched before stays on the display.

use super::events::CycleEvent;

/// Poll cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleState {
    /// Waiting for the next tick
    #[default]
    Idle,
    /// Text snapshot taken, patterns being produced
    Rendering,
    /// Bits being shifted into the bank
    Writing,
    /// New frame visible on the outputs
    Latched,
}

impl CycleState {
    /// Check if a new cycle may start
    pub fn is_idle(&self) -> bool {
        matches!(self, CycleState::Idle)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: CycleEvent) -> Self {
        use CycleEvent::*;
        use CycleState::*;

        match (self, event) {
            (Idle, Tick) => Rendering,
            (Rendering, Rendered) => Writing,
            (Writing, WriteSucceeded) => Latched,
            (Writing, WriteFailed) => Idle,
            (Latched, Complete) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_cycle() {
        let mut state = CycleState::Idle;
        for (event, expected) in [
            (CycleEvent::Tick, CycleState::Rendering),
            (CycleEvent::Rendered, CycleState::Writing),
            (CycleEvent::WriteSucceeded, CycleState::Latched),
            (CycleEvent::Complete, CycleState::Idle),
        ] {
            state = state.transition(event);
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn test_failed_write_skips_latched() {
        let state = CycleState::Writing.transition(CycleEvent::WriteFailed);
        assert_eq!(state, CycleState::Idle);
    }

    #[test]
    fn test_tick_ignored_while_busy() {
        for state in [
            CycleState::Rendering,
            CycleState::Writing,
            CycleState::Latched,
        ] {
            assert_eq!(state.transition(CycleEvent::Tick), state);
            assert!(!state.is_idle());
        }
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        assert_eq!(
            CycleState::Idle.transition(CycleEvent::WriteSucceeded),
            CycleState::Idle
        );
        assert_eq!(
            CycleState::Rendering.transition(CycleEvent::WriteFailed),
            CycleState::Rendering
        );
    }
}
