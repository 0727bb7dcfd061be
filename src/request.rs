//! Request lifecycle with last-write-wins semantics.
//!
//! Each workflow keeps one [`RequestTracker`]. Starting a request bumps a
//! generation counter; a result is only applied if it belongs to the most
//! recent request, so a slow earlier response can never overwrite a newer
//! one.

use crate::error::VoiceError;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Success(T),
    Failed(VoiceError),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&VoiceError> {
        match self {
            RequestState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct RequestTracker<T> {
    generation: u64,
    state: RequestState<T>,
}

impl<T> Default for RequestTracker<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: RequestState::Idle,
        }
    }
}

impl<T> RequestTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in flight. Returns the previous
    /// state so the caller can dispose of an old result.
    pub fn begin(&mut self) -> (Ticket, RequestState<T>) {
        self.generation += 1;
        let previous = std::mem::replace(&mut self.state, RequestState::Pending);
        (
            Ticket {
                generation: self.generation,
            },
            previous,
        )
    }

    /// Whether `ticket` still belongs to the newest request.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation && self.state.is_pending()
    }

    /// Apply a finished request's outcome.
    ///
    /// A stale ticket is rejected and its result handed back unchanged, so
    /// the caller can release anything it holds.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<T, VoiceError>,
    ) -> Result<(), Result<T, VoiceError>> {
        if !self.is_current(ticket) {
            log::debug!(
                "Discarding stale result for request {} (current {})",
                ticket.generation,
                self.generation
            );
            return Err(result);
        }
        self.state = match result {
            Ok(v) => RequestState::Success(v),
            Err(e) => RequestState::Failed(e),
        };
        Ok(())
    }

    /// Forget any result and cancel whatever is in flight.
    pub fn reset(&mut self) -> RequestState<T> {
        self.generation += 1;
        std::mem::take(&mut self.state)
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_pending_success() {
        let mut tracker = RequestTracker::new();
        assert!(matches!(tracker.state(), RequestState::Idle));

        let (ticket, _) = tracker.begin();
        assert!(tracker.state().is_pending());
        assert!(tracker.complete(ticket, Ok("done")).is_ok());
        assert_eq!(tracker.state().value(), Some(&"done"));
    }

    #[test]
    fn failure_is_recorded() {
        let mut tracker: RequestTracker<()> = RequestTracker::new();
        let (ticket, _) = tracker.begin();
        tracker
            .complete(ticket, Err(VoiceError::Transport("down".into())))
            .unwrap();
        assert!(matches!(tracker.state().error(), Some(VoiceError::Transport(_))));
    }

    #[test]
    fn stale_result_does_not_overwrite_newer() {
        let mut tracker = RequestTracker::new();
        let (first, _) = tracker.begin();
        let (second, _) = tracker.begin();

        assert!(tracker.complete(second, Ok(2)).is_ok());
        let rejected = tracker.complete(first, Ok(1));
        assert_eq!(rejected.unwrap_err().unwrap(), 1);
        assert_eq!(tracker.state().value(), Some(&2));
    }

    #[test]
    fn stale_result_while_newer_pending() {
        let mut tracker = RequestTracker::new();
        let (first, _) = tracker.begin();
        let (second, _) = tracker.begin();

        assert!(tracker.complete(first, Ok("old")).is_err());
        assert!(tracker.state().is_pending());
        assert!(tracker.complete(second, Ok("new")).is_ok());
    }

    #[test]
    fn ticket_cannot_complete_twice() {
        let mut tracker = RequestTracker::new();
        let (ticket, _) = tracker.begin();
        assert!(tracker.complete(ticket, Ok(1)).is_ok());
        assert!(tracker.complete(ticket, Ok(2)).is_err());
        assert_eq!(tracker.state().value(), Some(&1));
    }

    #[test]
    fn reset_cancels_in_flight() {
        let mut tracker = RequestTracker::new();
        let (ticket, _) = tracker.begin();
        assert!(tracker.reset().is_pending());
        assert!(tracker.complete(ticket, Ok(5)).is_err());
        assert!(matches!(tracker.state(), RequestState::Idle));
    }

    #[test]
    fn begin_hands_back_previous_result() {
        let mut tracker = RequestTracker::new();
        let (t, _) = tracker.begin();
        tracker.complete(t, Ok(7)).unwrap();
        let (next, previous) = tracker.begin();
        assert_eq!(previous.value(), Some(&7));
        assert_eq!(next.generation(), 2);
    }
}
