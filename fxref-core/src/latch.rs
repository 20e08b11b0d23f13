//! Single-use settlement latch.
//!
//! Result delivery must happen at most once per fetch, even if more than one
//! code path tries to report an outcome. The first `settle` wins; later calls
//! are no-ops.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

type Callback<'a, T> = Box<dyn FnOnce(T) + Send + 'a>;

pub struct SettleOnce<'a, T> {
    settled: AtomicBool,
    callback: Mutex<Option<Callback<'a, T>>>,
}

impl<'a, T> SettleOnce<'a, T> {
    pub fn new(callback: impl FnOnce(T) + Send + 'a) -> Self {
        Self {
            settled: AtomicBool::new(false),
            callback: Mutex::new(Some(Box::new(callback))),
        }
    }

    /// Deliver `value` to the callback if nothing has been delivered yet.
    ///
    /// Returns `true` only for the call that actually ran the callback.
    pub fn settle(&self, value: T) -> bool {
        if self.settled.swap(true, Ordering::AcqRel) {
            return false;
        }
        let callback = self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match callback {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }
}

impl<T> fmt::Debug for SettleOnce<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettleOnce")
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn first_settlement_wins() {
        let seen = Mutex::new(Vec::new());
        let latch = SettleOnce::new(|v: u32| seen.lock().unwrap().push(v));

        assert!(!latch.is_settled());
        assert!(latch.settle(1));
        assert!(!latch.settle(2));
        assert!(latch.is_settled());
        drop(latch);

        assert_eq!(seen.into_inner().unwrap(), vec![1]);
    }

    #[test]
    fn racing_threads_deliver_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let latch = Arc::new(SettleOnce::new(move |_: usize| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || latch.settle(i))
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
