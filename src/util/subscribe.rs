use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type ListenerError = Box<dyn Error + Send + Sync + 'static>;
pub type ListenerResult = Result<(), ListenerError>;
pub type Listener<T> = Arc<dyn Fn(&T) -> ListenerResult + Send + Sync + 'static>;

/// Handle returned when registering a listener; pass it back to remove the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of listeners notified synchronously, in registration order.
pub struct ListenerSet<T> {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Listener<T>)>>,
}

impl<T> ListenerSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&T) -> ListenerResult + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().unwrap().push((id, Arc::new(listener)));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every listener with `value`, stopping at the first error.
    ///
    /// The lock is released before listeners run so they may register further listeners.
    pub fn notify(&self, value: &T) -> ListenerResult {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(value)?;
        }
        Ok(())
    }
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_in_registration_order() {
        let set = ListenerSet::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = Arc::clone(&seen);
            set.add(move |value: &u32| {
                seen.lock().unwrap().push(format!("{tag}{value}"));
                Ok(())
            });
        }

        set.notify(&7).unwrap();
        assert_eq!(*seen.lock().unwrap(), ["a7", "b7"]);
    }

    #[test]
    fn first_error_stops_notification() {
        let set = ListenerSet::<u32>::new();
        let reached = Arc::new(Mutex::new(false));
        set.add(|_: &u32| Err("boom".into()));
        let flag = Arc::clone(&reached);
        set.add(move |_: &u32| {
            *flag.lock().unwrap() = true;
            Ok(())
        });

        let err = set.notify(&1).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(!*reached.lock().unwrap());
    }

    #[test]
    fn removed_listener_is_not_called() {
        let set = ListenerSet::<u32>::new();
        let id = set.add(|_: &u32| Err("should not run".into()));
        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert!(set.is_empty());
        set.notify(&1).unwrap();
    }
}
