use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Opaque pasteboard change counter. Any difference means the pasteboard was
/// written since the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChangeCount(i64);

impl ChangeCount {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// The last pasteboard change counter the app has accounted for.
///
/// Shared between the poller, which observes external changes, and the
/// clipboard writer, which records its own writes so they are not ingested
/// back as new history.
///
/// A write and the recording of its counter run under the same gate as the
/// poller's sample, so a tick can never land between the two.
#[derive(Debug, Default)]
pub struct ObservedChangeCount {
    value: AtomicI64,
    gate: Mutex<()>,
}

impl ObservedChangeCount {
    pub fn new(initial: ChangeCount) -> Self {
        Self {
            value: AtomicI64::new(initial.0),
            gate: Mutex::new(()),
        }
    }

    pub fn get(&self) -> ChangeCount {
        ChangeCount(self.value.load(Ordering::SeqCst))
    }

    /// Marks `count` as already seen.
    pub fn record(&self, count: ChangeCount) {
        self.value.store(count.0, Ordering::SeqCst);
    }

    /// Stores `current` and reports whether it differs from what was seen before.
    pub fn observe(&self, current: ChangeCount) -> bool {
        self.value.swap(current.0, Ordering::SeqCst) != current.0
    }

    /// Runs `f` with every other gated section held off. Blocking; call it
    /// from a blocking thread.
    pub fn exclusive<T>(&self, f: impl FnOnce() -> T) -> T {
        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Performs a pasteboard write and records the counter it returns before
    /// any sample can run.
    pub fn record_write<E>(
        &self,
        write: impl FnOnce() -> Result<ChangeCount, E>,
    ) -> Result<ChangeCount, E> {
        self.exclusive(|| {
            let count = write()?;
            self.record(count);
            Ok(count)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_reports_changes_once() {
        let observed = ObservedChangeCount::new(ChangeCount::new(3));
        assert!(!observed.observe(ChangeCount::new(3)));
        assert!(observed.observe(ChangeCount::new(4)));
        assert!(!observed.observe(ChangeCount::new(4)));
    }

    #[test]
    fn recorded_write_is_not_reported() {
        let observed = ObservedChangeCount::new(ChangeCount::new(1));
        observed.record(ChangeCount::new(2));
        assert!(!observed.observe(ChangeCount::new(2)));
        assert_eq!(observed.get(), ChangeCount::new(2));
    }

    #[test]
    fn sample_waits_for_write_to_be_recorded() {
        use std::sync::mpsc;
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let observed = Arc::new(ObservedChangeCount::new(ChangeCount::new(1)));
        let (started_tx, started_rx) = mpsc::channel();

        let writer = {
            let observed = Arc::clone(&observed);
            thread::spawn(move || {
                observed.record_write(|| {
                    started_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(50));
                    Ok::<_, ()>(ChangeCount::new(2))
                })
            })
        };

        started_rx.recv().unwrap();
        let changed = observed.exclusive(|| observed.observe(ChangeCount::new(2)));

        assert!(!changed);
        assert_eq!(writer.join().unwrap(), Ok(ChangeCount::new(2)));
    }

    #[test]
    fn failed_write_records_nothing() {
        let observed = ObservedChangeCount::new(ChangeCount::new(5));
        let result = observed.record_write(|| Err::<ChangeCount, _>("denied"));
        assert_eq!(result, Err("denied"));
        assert_eq!(observed.get(), ChangeCount::new(5));
    }
}
