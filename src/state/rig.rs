use tokio::sync::Mutex;

use crate::wheel::Outcome;

/// Single-slot, consume-once holder for the operator's next forced outcome.
///
/// Writers overwrite each other (last write wins) and the first reader after a
/// write takes the value, leaving the slot empty.
#[derive(Debug, Default)]
pub struct RigSlot {
    slot: Mutex<Option<Outcome>>,
}

impl RigSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `outcome` for the next spin, returning whatever it replaced.
    pub async fn set(&self, outcome: Outcome) -> Option<Outcome> {
        self.slot.lock().await.replace(outcome)
    }

    /// Take the pending outcome, clearing the slot.
    pub async fn take(&self) -> Option<Outcome> {
        self.slot.lock().await.take()
    }

    /// Inspect the pending outcome without consuming it.
    pub async fn peek(&self) -> Option<Outcome> {
        *self.slot.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn take_consumes_once() {
        let slot = RigSlot::new();
        assert_eq!(slot.set(Outcome::Dark).await, None);
        assert_eq!(slot.take().await, Some(Outcome::Dark));
        assert_eq!(slot.take().await, None);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let slot = RigSlot::new();
        slot.set(Outcome::Dark).await;
        assert_eq!(slot.set(Outcome::Light).await, Some(Outcome::Dark));
        assert_eq!(slot.peek().await, Some(Outcome::Light));
        assert_eq!(slot.take().await, Some(Outcome::Light));
    }

    #[tokio::test]
    async fn unconsumed_rig_persists() {
        let slot = RigSlot::new();
        slot.set(Outcome::Light).await;
        assert_eq!(slot.peek().await, Some(Outcome::Light));
        assert_eq!(slot.peek().await, Some(Outcome::Light));
    }
}
