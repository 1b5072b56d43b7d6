//! Injectable "now" for status derivation.

use crate::types::Date;
use std::{rc::Rc, sync::Arc};
use time::{OffsetDateTime, Time, UtcOffset};

///
/// Clock
///

pub trait Clock {
    fn now(&self) -> OffsetDateTime;

    /// Calendar date of `now` in the clock's own offset.
    fn today(&self) -> Date {
        Date::from_time_date(self.now().date())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

///
/// SystemClock
/// Wall-clock time, reported in a fixed offset (UTC unless configured).
///

#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    #[must_use]
    pub const fn utc() -> Self {
        Self {
            offset: UtcOffset::UTC,
        }
    }

    #[must_use]
    pub const fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

///
/// FixedClock
/// Always reports the same instant. Test default.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock {
    now: OffsetDateTime,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self { now }
    }

    /// Midnight UTC at the start of `date`.
    #[must_use]
    pub const fn at_date(date: Date) -> Self {
        Self {
            now: date.get().with_time(Time::MIDNIGHT).assume_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }
}
