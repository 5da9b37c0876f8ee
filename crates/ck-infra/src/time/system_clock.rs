use std::time::{SystemTime, UNIX_EPOCH};

use ck_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    /// A wall clock set before 1970 reads as the epoch.
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
        assert!(SystemClock.now().as_millis() > 0);
    }
}
