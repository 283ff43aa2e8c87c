//! Typed publish/subscribe between the dashboard controls and its pages
//!
//! Controls publish what the user did; pages subscribe to the event types
//! they react to. Handlers run without the bus lock held, so a handler may
//! subscribe or publish events of another type.

use std::any::{Any, TypeId};
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use ahash::AHashMap;
use parking_lot::Mutex;
use tracing::trace;

use crate::state::Selection;

/// Something that can travel over the bus
pub trait Event: Any + Debug + Send + Sync {}

/// Metric, year or ranking mode changed
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged {
    pub selection: Selection,
}

/// A country polygon was picked on the globe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryPicked {
    pub name: String,
}

impl Event for SelectionChanged {}
impl Event for CountryPicked {}

/// Returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&dyn Any) + Send>;

/// Dashboard-wide event bus
#[derive(Default)]
pub struct EventBus {
    handlers: Mutex<AHashMap<TypeId, Vec<(SubscriptionId, Handler)>>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every published `E`, after the handlers already registered
    pub fn subscribe<E: Event>(&self, mut handler: impl FnMut(&E) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let erased: Handler = Box::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                handler(event);
            }
        });

        self.handlers
            .lock()
            .entry(TypeId::of::<E>())
            .or_default()
            .push((id, erased));
        id
    }

    /// Remove a handler. `false` if it is unknown or currently running.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock();
        for list in handlers.values_mut() {
            if let Some(index) = list.iter().position(|(existing, _)| *existing == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Deliver `event` to the handlers of its type and return how many ran
    pub fn publish<E: Event>(&self, event: E) -> usize {
        let type_id = TypeId::of::<E>();

        let mut running = match self.handlers.lock().remove(&type_id) {
            Some(list) => list,
            None => {
                trace!("No subscribers for {:?}", event);
                return 0;
            }
        };

        for (_, handler) in running.iter_mut() {
            handler(&event);
        }
        let reached = running.len();

        // keep handlers added while dispatching, after the existing ones
        let mut handlers = self.handlers.lock();
        if let Some(added) = handlers.remove(&type_id) {
            running.extend(added);
        }
        handlers.insert(type_id, running);

        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_publish_reaches_matching_subscribers_only() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<CountryPicked>(move |picked| sink.lock().push(picked.name.clone()));

        assert_eq!(bus.publish(CountryPicked { name: "Kenya".to_string() }), 1);
        assert_eq!(bus.publish(SelectionChanged { selection: Selection::default() }), 0);
        assert_eq!(*seen.lock(), vec!["Kenya".to_string()]);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));

        let sink = count.clone();
        let id = bus.subscribe::<CountryPicked>(move |_| *sink.lock() += 1);
        bus.publish(CountryPicked { name: "Chad".to_string() });

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.publish(CountryPicked { name: "Chad".to_string() }), 0);
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_handler_may_publish_and_subscribe() {
        let bus = Arc::new(EventBus::new());
        let years = Arc::new(Mutex::new(Vec::new()));

        let sink = years.clone();
        bus.subscribe::<SelectionChanged>(move |changed| sink.lock().push(changed.selection.year));

        let inner = bus.clone();
        bus.subscribe::<CountryPicked>(move |_| {
            inner.publish(SelectionChanged {
                selection: Selection { year: 2011, ..Selection::default() },
            });
            inner.subscribe::<CountryPicked>(|_| {});
        });

        assert_eq!(bus.publish(CountryPicked { name: "Peru".to_string() }), 1);
        assert_eq!(*years.lock(), vec![2011]);
        assert_eq!(bus.publish(CountryPicked { name: "Peru".to_string() }), 2);
    }
}
