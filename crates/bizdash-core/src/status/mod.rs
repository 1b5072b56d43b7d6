//! Derived (effective) status.
//!
//! Effective status is computed from the stored status plus the record's
//! relevant date and "today". It is never stored and never written back.

#[cfg(test)]
mod tests;

use crate::{
    DEFAULT_DUE_SOON_DAYS,
    clock::Clock,
    model::RecordModel,
    traits::{Record, StatusKind},
    types::Date,
};
use serde::Serialize;

/// Label of the derived due-soon status.
pub const DUE_SOON_LABEL: &str = "due_soon";

///
/// EffectiveStatus
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum EffectiveStatus<S> {
    /// Stored status passed through unchanged.
    Stored(S),
    /// Open record whose date falls inside the forward window.
    DueSoon,
    /// Open record whose date is strictly before today.
    Overdue,
}

impl<S: StatusKind> EffectiveStatus<S> {
    /// Display label; `Overdue` uses the model's domain label.
    #[must_use]
    pub fn label(self, model: &RecordModel) -> &'static str {
        match self {
            Self::Stored(status) => status.as_str(),
            Self::DueSoon => DUE_SOON_LABEL,
            Self::Overdue => model.overdue_label,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stored(status) if status.is_terminal())
    }

    #[must_use]
    pub const fn is_derived(self) -> bool {
        !matches!(self, Self::Stored(_))
    }
}

impl<S> From<S> for EffectiveStatus<S>
where
    S: StatusKind,
{
    fn from(status: S) -> Self {
        Self::Stored(status)
    }
}

///
/// StatusPolicy
/// Tunables for status derivation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusPolicy {
    /// Days after today (inclusive) that still count as due soon.
    pub due_soon_days: u32,
}

impl StatusPolicy {
    #[must_use]
    pub const fn new(due_soon_days: u32) -> Self {
        Self { due_soon_days }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DUE_SOON_DAYS)
    }
}

/// Derive the effective status from its inputs. Pure.
///
/// Rules, in order:
/// 1. terminal stored status → stored status, dates ignored
/// 2. no date → stored status
/// 3. date < today → `Overdue`
/// 4. today <= date <= today + window → `DueSoon`
/// 5. otherwise → stored status
#[must_use]
pub fn resolve_status<S: StatusKind>(
    stored: S,
    date: Option<Date>,
    today: Date,
    policy: StatusPolicy,
) -> EffectiveStatus<S> {
    if stored.is_terminal() {
        return EffectiveStatus::Stored(stored);
    }

    let Some(date) = date else {
        return EffectiveStatus::Stored(stored);
    };

    let days_left = today.days_until(date);
    if days_left < 0 {
        EffectiveStatus::Overdue
    } else if days_left <= i64::from(policy.due_soon_days) {
        EffectiveStatus::DueSoon
    } else {
        EffectiveStatus::Stored(stored)
    }
}

///
/// StatusResolver
///
/// Binds a clock and a policy. The clock is read on every call, so a
/// resolver shared across queries always sees the current day.
///

#[derive(Clone, Debug)]
pub struct StatusResolver<C> {
    clock: C,
    policy: StatusPolicy,
}

impl<C: Clock> StatusResolver<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_policy(clock, StatusPolicy::default())
    }

    #[must_use]
    pub const fn with_policy(clock: C, policy: StatusPolicy) -> Self {
        Self { clock, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> StatusPolicy {
        self.policy
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Effective status of one record against the clock's current day.
    #[must_use]
    pub fn resolve<R: Record>(&self, record: &R) -> EffectiveStatus<R::Status> {
        self.resolve_on(record, self.clock.today())
    }

    /// Effective status of one record against an explicit day. Used when
    /// a whole collection must be judged against one consistent "today".
    #[must_use]
    pub fn resolve_on<R: Record>(&self, record: &R, today: Date) -> EffectiveStatus<R::Status> {
        resolve_status(record.stored_status(), record.status_date(), today, self.policy)
    }
}
