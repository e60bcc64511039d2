//! Region selection bus

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// The only message passed between the map and the tabs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelected {
    pub region_id: String,
}

/// Broadcast bus for [`RegionSelected`]; every subscriber sees every message.
pub struct RegionBus {
    tx: broadcast::Sender<RegionSelected>,
}

impl RegionBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegionSelected> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers were reached. Nobody listening is fine.
    pub fn publish(&self, event: RegionSelected) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RegionBus {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Clone for RegionBus {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let bus = RegionBus::default();
        let reached = bus.publish(RegionSelected {
            region_id: "Lima".to_string(),
        });
        assert_eq!(reached, 0);
    }

    #[test]
    fn test_every_subscriber_receives() {
        let bus = RegionBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let event = RegionSelected {
            region_id: "Cusco".to_string(),
        };
        assert_eq!(bus.publish(event.clone()), 2);

        assert_eq!(a.try_recv().unwrap(), event);
        assert_eq!(b.try_recv().unwrap(), event);
        assert!(a.try_recv().is_err());
    }
}
