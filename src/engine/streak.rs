//! Streak tracker: calendar-day continuity state machine.
//!
//! Day comparison uses calendar dates, not 24-hour windows, so a completion
//! at 23:58 followed by one at 00:05 still continues the streak. Dates are
//! UTC calendar days throughout; boundaries do not shift with local time.

use chrono::NaiveDate;

use crate::engine::types::UserStreak;

/// Advance the streak for activity on `today`.
///
/// Four transitions, keyed off `last_active`:
/// - never active: start at 1;
/// - already counted today: no change (idempotent re-entry guard);
/// - active yesterday: continue, current + 1;
/// - anything older: hard reset to 1, `longest` untouched.
///
/// `longest >= current` holds on every path.
pub fn touch(streak: &UserStreak, today: NaiveDate) -> UserStreak {
    let mut next = streak.clone();

    match streak.last_active {
        None => {
            next.current = 1;
            next.longest = streak.longest.max(1);
            next.last_active = Some(today);
        }
        Some(last) if last == today => {
            // Same-day re-entry: first touch of the day already counted.
        }
        Some(last) if Some(last) == today.pred_opt() => {
            next.current = streak.current + 1;
            next.longest = streak.longest.max(next.current);
            next.last_active = Some(today);
        }
        Some(_) => {
            // Gap of two or more days (or a clock rollback): no partial credit.
            next.current = 1;
            next.longest = streak.longest.max(1);
            next.last_active = Some(today);
        }
    }

    next
}
