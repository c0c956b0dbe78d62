use crate::client::HabitService;
use crate::controller::DayViewController;
use crate::models::{HabitId, ViewPhase};
use chrono::{Local, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Day(DayView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub editable: bool,
    pub progress: f64,
    /// `None` when the day could not be loaded.
    pub habits: Option<Vec<HabitRow>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitRow {
    pub id: HabitId,
    pub title: String,
    pub checked: bool,
    pub disabled: bool,
}

impl DayView {
    pub fn show_past_notice(&self) -> bool {
        !self.editable
    }
}

pub fn screen<S: HabitService>(controller: &DayViewController<S>) -> Screen {
    screen_at(controller, Local::now().naive_local())
}

/// Derives what the day screen shows at `now`. Nothing is cached between calls.
pub fn screen_at<S: HabitService>(controller: &DayViewController<S>, now: NaiveDateTime) -> Screen {
    let date = match (controller.phase(), controller.date()) {
        (ViewPhase::Ready, Some(date)) => date,
        _ => return Screen::Loading,
    };

    let editable = controller.is_editable_at(now);
    let habits = controller.snapshot().map(|snapshot| {
        snapshot
            .possible_habits
            .iter()
            .map(|habit| HabitRow {
                id: habit.id.clone(),
                title: habit.title.clone(),
                checked: controller.is_checked(&habit.id),
                disabled: !editable,
            })
            .collect()
    });

    Screen::Day(DayView {
        date,
        editable,
        progress: controller.progress_percentage(),
        habits,
    })
}
