use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub title: String,
}

/// One day's habits as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DaySnapshot {
    pub completed_habit_ids: BTreeSet<HabitId>,
    pub possible_habits: Vec<Habit>,
}

impl DaySnapshot {
    pub fn contains(&self, id: &HabitId) -> bool {
        self.possible_habits.iter().any(|habit| &habit.id == id)
    }
}

/// Body of `GET /day`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayResponse {
    pub completed_habits: Vec<HabitId>,
    pub possible_habits: Vec<Habit>,
}

impl From<DayResponse> for DaySnapshot {
    fn from(response: DayResponse) -> Self {
        Self {
            completed_habit_ids: response.completed_habits.into_iter().collect(),
            possible_habits: response.possible_habits,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_owned(),
            message: message.into(),
        }
    }
}

pub fn progress_percentage(possible: usize, completed: usize) -> f64 {
    if possible == 0 {
        return 0.0;
    }
    completed as f64 / possible as f64 * 100.0
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

pub fn is_editable(date: NaiveDate) -> bool {
    is_editable_at(date, Local::now().naive_local())
}

/// A day stays editable until its last millisecond has passed.
pub fn is_editable_at(date: NaiveDate, now: NaiveDateTime) -> bool {
    end_of_day(date) >= now
}
