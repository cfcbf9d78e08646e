use std::cell::Cell;

/// Generation counter for trailing-edge
/// debounce.
///
/// Each trigger hands out a ticket and
/// invalidates every earlier one; a
/// timer that wakes up holding a stale
/// ticket does nothing. Only the last
/// trigger in a burst can fire, and only
/// once.
#[derive(Debug, Default)]
pub struct DebounceGate {
  generation: Cell<u64>,
  fired:      Cell<bool>
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Ticket(u64);

impl DebounceGate {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Supersedes any pending ticket.
  pub fn arm(&self) -> Ticket {
    let next =
      self.generation.get().wrapping_add(1);
    self.generation.set(next);
    self.fired.set(false);
    Ticket(next)
  }

  #[must_use]
  pub fn is_current(
    &self,
    ticket: Ticket
  ) -> bool {
    !self.fired.get()
      && self.generation.get() == ticket.0
  }

  /// Claims the ticket. Returns `true`
  /// exactly once, for the latest
  /// ticket only.
  pub fn fire(&self, ticket: Ticket) -> bool {
    if !self.is_current(ticket) {
      tracing::trace!(
        ticket = ticket.0,
        current = self.generation.get(),
        "stale debounce ticket"
      );
      return false;
    }
    self.fired.set(true);
    true
  }
}

#[cfg(test)]
mod tests {
  use super::DebounceGate;

  #[test]
  fn burst_fires_once_for_last_trigger() {
    let gate = DebounceGate::new();
    let tickets: Vec<_> =
      (0..5).map(|_| gate.arm()).collect();

    let fired: Vec<bool> = tickets
      .iter()
      .map(|ticket| gate.fire(*ticket))
      .collect();

    assert_eq!(
      fired,
      vec![false, false, false, false, true]
    );
    assert!(
      !gate.fire(tickets[4]),
      "a ticket fires only once"
    );
  }

  #[test]
  fn rearming_after_fire_starts_a_new_burst(
  ) {
    let gate = DebounceGate::new();
    let first = gate.arm();
    assert!(gate.fire(first));

    let second = gate.arm();
    assert!(gate.is_current(second));
    assert!(!gate.is_current(first));
    assert!(gate.fire(second));
  }
}
