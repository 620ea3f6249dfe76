use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The container changed size.
    Resized,
    /// Tables appeared, disappeared or moved inside the container.
    SubtreeMutated,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    queues: Vec<(u64, Vec<LayoutEvent>)>,
}

/// Fans layout events out to every live subscription. Single-threaded.
#[derive(Clone, Default)]
pub struct LayoutEventHub {
    inner: Rc<RefCell<Subscribers>>,
}

impl LayoutEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.queues.push((id, Vec::new()));

        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, event: LayoutEvent) {
        for (_, queue) in self.inner.borrow_mut().queues.iter_mut() {
            queue.push(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().queues.len()
    }
}

/// A registration with a [`LayoutEventHub`]. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    /// Events received since the last call, in arrival order.
    pub fn take_events(&self) -> Vec<LayoutEvent> {
        let Some(hub) = self.hub.upgrade() else {
            return Vec::new();
        };
        let mut inner = hub.borrow_mut();
        inner
            .queues
            .iter_mut()
            .find(|(id, _)| *id == self.id)
            .map(|(_, queue)| std::mem::take(queue))
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().queues.retain(|(id, _)| *id != self.id);
        }
    }
}
