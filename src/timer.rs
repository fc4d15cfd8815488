/// Bookkeeping for the one-shot timer that closes an answered question.
///
/// Only the most recently armed ticket may fire. Arming again or cancelling turns any earlier
/// ticket stale, so a callback scheduled for an old question cannot close a newer one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AutoClose {
    generation: u64,
    armed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCloseTicket(u64);

impl AutoClose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) -> AutoCloseTicket {
        self.generation = self.generation.wrapping_add(1);
        self.armed = Some(self.generation);
        AutoCloseTicket(self.generation)
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Consumes the pending timer if `ticket` is still the live one.
    pub fn fire(&mut self, ticket: AutoCloseTicket) -> bool {
        if self.armed == Some(ticket.0) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
