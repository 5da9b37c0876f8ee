use crate::clipboard::TimestampMs;

pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;

    fn now(&self) -> TimestampMs {
        TimestampMs::from_epoch_millis(self.now_ms())
    }
}
