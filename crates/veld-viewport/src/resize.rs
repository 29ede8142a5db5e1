//! Resize notification with explicit subscription handles.
//!
//! The host publishes window dimensions into a [`ResizeBus`]; the viewport
//! holds a [`ResizeSubscription`] and polls it at frame time. Dropping or
//! cancelling the subscription unsubscribes, so teardown cannot leave a
//! listener behind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use veld_render::PhysicalSize;

#[derive(Debug, Default)]
struct BusInner {
    next_id: u64,
    // Latest unconsumed dimensions per subscriber; resizes coalesce.
    subscribers: HashMap<u64, Option<PhysicalSize>>,
}

/// Shared resize-notification source. Clones share the same subscriber set.
#[derive(Clone, Debug, Default)]
pub struct ResizeBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ResizeBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish new dimensions to every live subscriber.
    ///
    /// Consecutive publishes before a subscriber polls coalesce to the
    /// latest value.
    pub fn publish(&self, width: u32, height: u32) {
        let size = PhysicalSize { width, height };
        for slot in self.inner.borrow_mut().subscribers.values_mut() {
            *slot = Some(size);
        }
    }

    /// Subscribe to resize notifications. The returned handle unsubscribes
    /// when cancelled or dropped.
    pub fn subscribe(&self) -> ResizeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, None);
        ResizeSubscription {
            inner: Rc::clone(&self.inner),
            id,
            active: true,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// RAII handle for one resize subscription.
#[derive(Debug)]
pub struct ResizeSubscription {
    inner: Rc<RefCell<BusInner>>,
    id: u64,
    active: bool,
}

impl ResizeSubscription {
    /// Take the latest unconsumed dimensions, if any arrived since the
    /// last poll. Returns `None` once cancelled.
    pub fn take(&self) -> Option<PhysicalSize> {
        if !self.active {
            return None;
        }
        self.inner
            .borrow_mut()
            .subscribers
            .get_mut(&self.id)
            .and_then(Option::take)
    }

    /// Unsubscribe. Idempotent; also runs on drop.
    pub fn cancel(&mut self) {
        if self.active {
            self.inner.borrow_mut().subscribers.remove(&self.id);
            self.active = false;
        }
    }

    /// Whether this subscription is still registered with the bus.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_publish() {
        let bus = ResizeBus::new();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        assert!(sub.take().is_none());

        bus.publish(800, 600);
        assert_eq!(
            sub.take(),
            Some(PhysicalSize {
                width: 800,
                height: 600
            })
        );
        // Consumed; nothing left until the next publish.
        assert!(sub.take().is_none());
    }

    #[test]
    fn test_publishes_coalesce_to_latest() {
        let bus = ResizeBus::new();
        let sub = bus.subscribe();
        bus.publish(800, 600);
        bus.publish(400, 300);
        assert_eq!(
            sub.take(),
            Some(PhysicalSize {
                width: 400,
                height: 300
            })
        );
    }

    #[test]
    fn test_cancel_unsubscribes() {
        let bus = ResizeBus::new();
        let mut sub = bus.subscribe();
        sub.cancel();
        assert!(!sub.is_active());
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(800, 600);
        assert!(sub.take().is_none());

        // Cancelling again is harmless.
        sub.cancel();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = ResizeBus::new();
        {
            let _sub = bus.subscribe();
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_each_receive() {
        let bus = ResizeBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(1024, 768);
        assert!(a.take().is_some());
        assert!(b.take().is_some());
    }

    #[test]
    fn test_clone_shares_subscribers() {
        let bus = ResizeBus::new();
        let shared = bus.clone();
        let sub = bus.subscribe();
        shared.publish(640, 480);
        assert_eq!(
            sub.take(),
            Some(PhysicalSize {
                width: 640,
                height: 480
            })
        );
        assert_eq!(shared.subscriber_count(), 1);
    }
}
