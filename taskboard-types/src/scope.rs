use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use strum_macros::{Display, EnumString};

use crate::Task;

/// Time window a task list is narrowed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FilterScope {
    Today,
    #[strum(serialize = "next7days")]
    Next7Days,
    #[default]
    All,
}

impl FilterScope {
    /// Latest effective date a task may have to be in scope, `None` when unrestricted.
    ///
    /// "Today" ends at 23:59:59 of the calendar day of `now` in its own time zone.
    pub fn deadline<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        match self {
            Self::All => None,
            Self::Today => {
                let end_of_day = now.date_naive().and_hms_opt(23, 59, 59)?;
                let end_of_day = now
                    .timezone()
                    .from_local_datetime(&end_of_day)
                    .latest()
                    .map(|end| end.with_timezone(&Utc));
                Some(end_of_day.unwrap_or_else(|| now.with_timezone(&Utc)))
            }
            Self::Next7Days => Some(now.with_timezone(&Utc) + TimeDelta::days(7)),
        }
    }

    /// Undated tasks are only in scope when the scope is unrestricted.
    pub fn includes<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        match self.deadline(now) {
            None => true,
            Some(deadline) => task
                .effective_date()
                .is_some_and(|date| date <= deadline),
        }
    }

    pub fn apply<'a, Tz: TimeZone>(&self, tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| self.includes(task, now))
            .collect()
    }
}
