use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant on the user's calendar. Calendar windows
    /// (this month, this year) are resolved against this offset.
    fn local_now(&self) -> DateTime<FixedOffset> {
        self.now().with_timezone(&Utc.fix())
    }
}

/// Real-time clock backed by the system time source and local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Clock pinned to a single instant, optionally seen from a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: now.with_timezone(&Utc.fix()),
        }
    }

    pub fn local(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }

    fn local_now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}
