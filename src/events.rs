//! Checklist change notifications
//!
//! In-process publish/subscribe keyed by category. Screens subscribe to the
//! category they show, the stats view subscribes to `Topic::All`. An instance
//! is constructed explicitly and shared by reference (`Arc`), so every test
//! gets its own registry.
//!
//! Listeners run synchronously on the emitting task, in registration order,
//! outside the registry lock. A panicking listener is logged and skipped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::domain::Category;

/// What a listener is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Category(Category),
    /// Every category emission
    All,
}

impl Topic {
    fn matches(&self, category: Category) -> bool {
        match self {
            Topic::All => true,
            Topic::Category(c) => *c == category,
        }
    }
}

/// Delivered to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistChanged {
    pub category: Category,
}

type Listener = Arc<dyn Fn(&ChecklistChanged) + Send + Sync>;

struct Registration {
    id: u64,
    topic: Topic,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

#[derive(Default)]
pub struct ChecklistEvents {
    registry: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // A listener never runs under this lock, so poisoning cannot leave it half-updated.
    registry.lock().unwrap_or_else(|e| e.into_inner())
}

impl ChecklistEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `topic`. The returned handle removes exactly
    /// this registration.
    pub fn subscribe<F>(&self, topic: Topic, listener: F) -> Subscription
    where
        F: Fn(&ChecklistChanged) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.registrations.push(Registration {
            id,
            topic,
            listener: Arc::new(listener),
        });
        log::debug!(
            "Subscribed to {:?}. Total listeners: {}",
            topic,
            registry.registrations.len()
        );

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notify listeners of `category` and of `Topic::All`. Returns how many
    /// listeners ran without panicking.
    pub fn emit(&self, category: Category) -> usize {
        let listeners: Vec<Listener> = lock(&self.registry)
            .registrations
            .iter()
            .filter(|r| r.topic.matches(category))
            .map(|r| r.listener.clone())
            .collect();

        log::debug!("Emitting {} change to {} listeners", category, listeners.len());
        let event = ChecklistChanged { category };
        let mut delivered = 0;
        for listener in listeners {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    log::error!(
                        "Error in checklist event listener for {}: {}",
                        category,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        delivered
    }

    /// Emit for every category that currently has at least one listener.
    /// A `Topic::All` listener counts as listening to every category.
    pub fn emit_all(&self) {
        let pending: Vec<Category> = {
            let registry = lock(&self.registry);
            Category::ALL
                .into_iter()
                .filter(|c| registry.registrations.iter().any(|r| r.topic.matches(*c)))
                .collect()
        };
        for category in pending {
            self.emit(category);
        }
    }

    /// Registrations for exactly `topic`
    pub fn listener_count(&self, topic: Topic) -> usize {
        lock(&self.registry)
            .registrations
            .iter()
            .filter(|r| r.topic == topic)
            .count()
    }
}

/// Handle returned by [`ChecklistEvents::subscribe`]. Dropping it keeps the
/// listener registered; call [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove this listener. Safe to call more than once.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = {
            let mut registry = lock(&registry);
            let before = registry.registrations.len();
            registry.registrations.retain(|r| r.id != self.id);
            (before != registry.registrations.len()).then(|| registry.registrations.len())
        };
        if let Some(remaining) = removed {
            log::debug!("Unsubscribed from checklist events. Total listeners: {}", remaining);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "listener panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&ChecklistChanged) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move |_: &ChecklistChanged| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let events = ChecklistEvents::new();
        let (count, listener) = counter();

        let sub = events.subscribe(Topic::Category(Category::Earthquake), listener);
        events.emit(Category::Earthquake);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sub.unsubscribe();
        events.emit(Category::Earthquake);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sub.unsubscribe();
        assert_eq!(events.listener_count(Topic::Category(Category::Earthquake)), 0);
    }

    #[test]
    fn test_emit_is_scoped_to_category() {
        let events = ChecklistEvents::new();
        let (fire, fire_listener) = counter();
        let (all, all_listener) = counter();
        events.subscribe(Topic::Category(Category::Fire), fire_listener);
        events.subscribe(Topic::All, all_listener);

        events.emit(Category::Flood);
        assert_eq!(fire.load(Ordering::SeqCst), 0);
        assert_eq!(all.load(Ordering::SeqCst), 1);

        events.emit(Category::Fire);
        assert_eq!(fire.load(Ordering::SeqCst), 1);
        assert_eq!(all.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_leaves_other_listeners() {
        let events = ChecklistEvents::new();
        let (a, listener_a) = counter();
        let (b, listener_b) = counter();
        let sub_a = events.subscribe(Topic::Category(Category::Fire), listener_a);
        let _sub_b = events.subscribe(Topic::Category(Category::Fire), listener_b);

        sub_a.unsubscribe();
        events.emit(Category::Fire);
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registration_order() {
        let events = ChecklistEvents::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            let topic = if n == 1 { Topic::All } else { Topic::Category(Category::Hurricane) };
            events.subscribe(topic, move |_| order.lock().unwrap().push(n));
        }

        events.emit(Category::Hurricane);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let events = ChecklistEvents::new();
        let (count, listener) = counter();
        events.subscribe(Topic::Category(Category::Fire), |_| panic!("boom"));
        events.subscribe(Topic::Category(Category::Fire), listener);

        let delivered = events.emit(Category::Fire);
        assert_eq!(delivered, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emit_all_targets_subscribed_categories() {
        let events = ChecklistEvents::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for category in [Category::Flood, Category::Fire] {
            let seen = seen.clone();
            events.subscribe(Topic::Category(category), move |e| {
                seen.lock().unwrap().push(e.category)
            });
        }

        events.emit_all();
        assert_eq!(*seen.lock().unwrap(), vec![Category::Fire, Category::Flood]);
    }

    #[test]
    fn test_emit_all_with_all_listener_covers_every_category() {
        let events = ChecklistEvents::new();
        let (count, listener) = counter();
        events.subscribe(Topic::All, listener);

        events.emit_all();
        assert_eq!(count.load(Ordering::SeqCst), Category::ALL.len());
    }

    #[test]
    fn test_late_subscriber_gets_no_replay() {
        let events = ChecklistEvents::new();
        events.emit(Category::Fire);

        let (count, listener) = counter();
        events.subscribe(Topic::Category(Category::Fire), listener);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_may_unsubscribe_during_emit() {
        let events = Arc::new(ChecklistEvents::new());
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let (count, listener) = counter();

        let inner = slot.clone();
        let sub = events.subscribe(Topic::Category(Category::Flood), move |e| {
            listener(e);
            if let Some(sub) = inner.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });
        *slot.lock().unwrap() = Some(sub);

        events.emit(Category::Flood);
        events.emit(Category::Flood);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
