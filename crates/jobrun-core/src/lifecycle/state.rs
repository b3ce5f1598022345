use std::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const FINISHED: u8 = 2;
const CANCELLED: u8 = 3;

/// Completion flag shared between the main path and the signal path.
///
/// Transitions:
/// - `idle → running` once, when the run entry point is about to be called;
/// - `* → finished` when run returns or fails;
/// - `idle | running → cancelled` once, when the signal path claims cancellation.
///
/// Every transition is a single atomic operation, so checking "finished" and
/// claiming the cancel can not interleave with the run completing.
#[derive(Default)]
pub struct CompletionState(AtomicU8);

/// Snapshot of [`CompletionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
    Cancelled,
}

impl CompletionState {
    pub const fn new() -> Self {
        Self(AtomicU8::new(IDLE))
    }

    pub fn phase(&self) -> Phase {
        decode(self.0.load(Ordering::SeqCst))
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Enter `running`; on failure returns the phase that blocked it.
    pub(crate) fn begin(&self) -> Result<(), Phase> {
        self.0
            .compare_exchange(IDLE, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| self.phase())
    }

    /// Mark the run as done; returns the previous phase.
    pub(crate) fn finish(&self) -> Phase {
        decode(self.0.swap(FINISHED, Ordering::SeqCst))
    }

    /// Claim the single cancellation; returns the phase it was claimed from.
    ///
    /// Fails with the current phase when the run already finished or a cancel was claimed.
    pub(crate) fn claim_cancel(&self) -> Result<Phase, Phase> {
        let mut current = self.0.load(Ordering::SeqCst);
        loop {
            if current != IDLE && current != RUNNING {
                return Err(self.phase());
            }
            match self.0.compare_exchange(
                current,
                CANCELLED,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(prev) => return Ok(decode(prev)),
                Err(actual) => current = actual,
            }
        }
    }
}

fn decode(raw: u8) -> Phase {
    match raw {
        IDLE => Phase::Idle,
        RUNNING => Phase::Running,
        FINISHED => Phase::Finished,
        _ => Phase::Cancelled,
    }
}

impl fmt::Debug for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompletionState").field(&self.phase()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn begin_only_once() {
        let state = CompletionState::new();
        assert!(state.begin().is_ok());
        assert_eq!(state.begin(), Err(Phase::Running));
    }

    #[test]
    fn cancel_after_finish_is_refused() {
        let state = CompletionState::new();
        state.begin().unwrap();
        state.finish();
        assert!(state.is_finished());
        assert_eq!(state.claim_cancel(), Err(Phase::Finished));
    }

    #[test]
    fn cancel_is_claimed_once() {
        let state = CompletionState::new();
        state.begin().unwrap();
        assert_eq!(state.claim_cancel(), Ok(Phase::Running));
        assert_eq!(state.claim_cancel(), Err(Phase::Cancelled));
    }

    #[test]
    fn cancel_before_begin_blocks_run() {
        let state = CompletionState::new();
        assert_eq!(state.claim_cancel(), Ok(Phase::Idle));
        assert_eq!(state.begin(), Err(Phase::Cancelled));
    }

    #[test]
    fn finish_wins_even_after_cancel_claimed() {
        let state = CompletionState::new();
        state.begin().unwrap();
        state.claim_cancel().unwrap();
        assert_eq!(state.finish(), Phase::Cancelled);
        assert!(state.is_finished());
    }

    #[test]
    fn concurrent_claims_yield_single_winner() {
        let state = Arc::new(CompletionState::new());
        state.begin().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || state.claim_cancel().is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
