//! Event bus carrying character notifications to the presentation layer.
//!
//! Animation, audio, and UI code drain the bus once per frame. The core never
//! waits on a consumer.

use crossbeam_channel::{bounded, Receiver, Sender};
use ember_common::{EntityHandle, LevelId, Vec3};
use serde::{Deserialize, Serialize};

use crate::combat::AttackVariant;
use crate::movement::MovementStatus;
use crate::stamina::StaminaStatus;

/// Things that happened to the character this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CharacterEvent {
    /// Play an attack clip.
    AttackStarted {
        /// Clip section to play
        variant: AttackVariant,
    },
    /// Attack clip finished without chaining.
    AttackEnded,
    /// Health dropped.
    Damaged {
        /// Damage taken
        amount: f32,
        /// Attacker, if any
        source: Option<EntityHandle>,
    },
    /// Play the death sequence.
    DeathStarted,
    /// Death sequence finished playing.
    DeathFinished,
    /// Stamina status changed.
    StaminaChanged {
        /// Previous status
        from: StaminaStatus,
        /// New status
        to: StaminaStatus,
    },
    /// Locomotion mode changed.
    MovementChanged {
        /// Previous status
        from: MovementStatus,
        /// New status
        to: MovementStatus,
        /// New max walk speed
        max_walk_speed: f32,
    },
    /// Combat target changed.
    TargetChanged {
        /// New target, `None` when cleared
        target: Option<EntityHandle>,
    },
    /// Weapon put in hand.
    WeaponEquipped {
        /// Weapon name
        name: String,
    },
    /// Coins collected.
    CoinsPicked {
        /// Coins added
        amount: u32,
        /// Where the pickup was
        location: Vec3,
    },
    /// Health potion consumed.
    Healed {
        /// Amount restored
        amount: f32,
    },
    /// State restored from a snapshot.
    Restored,
    /// Level change requested.
    LevelChangeRequested {
        /// Destination
        level: LevelId,
    },
}

/// Bounded queue of character events.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<CharacterEvent>,
    receiver: Receiver<CharacterEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event. Dropped if the bus is full.
    pub fn publish(&self, event: CharacterEvent) {
        if self.sender.try_send(event).is_err() {
            tracing::trace!("event bus full, dropping event");
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<CharacterEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<CharacterEvent> {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_drain_in_order() {
        let bus = EventBus::new(8);
        bus.publish(CharacterEvent::DeathStarted);
        bus.publish(CharacterEvent::DeathFinished);
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![CharacterEvent::DeathStarted, CharacterEvent::DeathFinished]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops() {
        let bus = EventBus::new(1);
        bus.publish(CharacterEvent::AttackEnded);
        bus.publish(CharacterEvent::Restored);
        assert_eq!(bus.drain(), vec![CharacterEvent::AttackEnded]);
        assert_eq!(bus.capacity(), 1);
    }

    #[test]
    fn test_external_sender() {
        let bus = EventBus::default();
        bus.sender()
            .send(CharacterEvent::Healed { amount: 5.0 })
            .expect("send should succeed");
        assert_eq!(bus.drain().len(), 1);
    }
}
