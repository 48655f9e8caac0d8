//! Single-flight execution keyed by name.
//!
//! At most one call per key runs at a time. Callers that arrive while a
//! call is in flight block until it finishes and receive a clone of its
//! result instead of starting their own. Once a call finishes the key is
//! free again, so a later caller starts fresh.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

enum State<V> {
    Pending,
    Done(V),
    Abandoned,
}

struct Flight<V> {
    state: Mutex<State<V>>,
    finished: Condvar,
}

/// Deduplicates concurrent calls by key.
pub struct SingleFlight<V> {
    flights: Mutex<HashMap<String, Arc<Flight<V>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<V: Clone> SingleFlight<V> {
    pub fn new() -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` unless a call for `key` is already in flight, in which case
    /// wait for that call and return its result.
    ///
    /// If the running call panics, waiting callers retry on their own.
    pub fn run<F>(&self, key: &str, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        let (flight, leader) = self.join(key);
        if leader {
            return self.lead(key, &flight, f);
        }

        match Self::wait(key, &flight) {
            Some(value) => value,
            None => self.run(key, f),
        }
    }

    /// Run `f` as a call of its own once no call for `key` is in flight.
    ///
    /// Unlike [`run`](Self::run), an earlier call's result is never
    /// substituted for `f`'s. Callers of `run` that arrive while `f` is
    /// running share its result.
    pub fn run_after<F>(&self, key: &str, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        loop {
            let (flight, leader) = self.join(key);
            if leader {
                return self.lead(key, &flight, f);
            }
            Self::wait(key, &flight);
        }
    }

    /// Whether a call for `key` is currently running.
    pub fn in_flight(&self, key: &str) -> bool {
        lock(&self.flights).contains_key(key)
    }

    /// The flight for `key`, and whether the caller started it.
    fn join(&self, key: &str) -> (Arc<Flight<V>>, bool) {
        let mut flights = lock(&self.flights);
        match flights.get(key) {
            Some(existing) => (Arc::clone(existing), false),
            None => {
                let flight = Arc::new(Flight {
                    state: Mutex::new(State::Pending),
                    finished: Condvar::new(),
                });
                flights.insert(key.to_string(), Arc::clone(&flight));
                (flight, true)
            }
        }
    }

    fn lead<F>(&self, key: &str, flight: &Arc<Flight<V>>, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut guard = LeaderGuard {
            owner: self,
            key,
            flight,
            done: false,
        };
        let value = f();
        guard.complete(value.clone());
        value
    }

    /// Block until `flight` ends. `None` if its leader panicked.
    fn wait(key: &str, flight: &Flight<V>) -> Option<V> {
        tracing::debug!("Waiting for in-flight '{}'", key);
        let mut state = lock(&flight.state);
        loop {
            match &*state {
                State::Done(value) => return Some(value.clone()),
                State::Abandoned => return None,
                State::Pending => {
                    state = flight
                        .finished
                        .wait(state)
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                }
            }
        }
    }

    fn release(&self, key: &str, flight: &Arc<Flight<V>>) {
        let mut flights = lock(&self.flights);
        if flights
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, flight))
        {
            flights.remove(key);
        }
    }
}

impl<V: Clone> Default for SingleFlight<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishes the leader's result, or marks the flight abandoned on unwind.
struct LeaderGuard<'a, V: Clone> {
    owner: &'a SingleFlight<V>,
    key: &'a str,
    flight: &'a Arc<Flight<V>>,
    done: bool,
}

impl<V: Clone> LeaderGuard<'_, V> {
    fn complete(&mut self, value: V) {
        *lock(&self.flight.state) = State::Done(value);
        self.done = true;
    }
}

impl<V: Clone> Drop for LeaderGuard<'_, V> {
    fn drop(&mut self) {
        if !self.done {
            *lock(&self.flight.state) = State::Abandoned;
        }
        self.owner.release(self.key, self.flight);
        self.flight.finished.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn single_caller_runs_once() {
        let flights = SingleFlight::new();
        assert_eq!(flights.run("maid", || 7), 7);
        assert!(!flights.in_flight("maid"));
    }

    #[test]
    fn sequential_calls_each_run() {
        let flights = SingleFlight::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            flights.run("maid", || calls.fetch_add(1, Ordering::SeqCst));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn concurrent_callers_share_one_run() {
        let flights = Arc::new(SingleFlight::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let flights = Arc::clone(&flights);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    flights.run("maid", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(300));
                        "resolved".to_string()
                    })
                })
            })
            .collect();

        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|r| r == "resolved"));
    }

    #[test]
    fn run_after_waits_then_runs_its_own_call() {
        let flights = Arc::new(SingleFlight::new());
        let started = Arc::new(Barrier::new(2));

        let first = {
            let flights = Arc::clone(&flights);
            let started = Arc::clone(&started);
            thread::spawn(move || {
                flights.run("maid", || {
                    started.wait();
                    thread::sleep(Duration::from_millis(300));
                    "first".to_string()
                })
            })
        };

        started.wait();
        assert!(flights.in_flight("maid"));
        let second = flights.run_after("maid", || "second".to_string());

        assert_eq!(second, "second");
        assert_eq!(first.join().unwrap(), "first");
        assert!(!flights.in_flight("maid"));
    }

    #[test]
    fn different_keys_do_not_block_each_other() {
        let flights = SingleFlight::new();
        let outer = flights.run("maid", || flights.run("cargo", || 1) + 1);
        assert_eq!(outer, 2);
    }

    #[test]
    fn panicking_leader_frees_the_key() {
        let flights = SingleFlight::<u32>::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            flights.run("maid", || panic!("boom"))
        }));
        assert!(result.is_err());
        assert!(!flights.in_flight("maid"));
        assert_eq!(flights.run("maid", || 3), 3);
    }
}
