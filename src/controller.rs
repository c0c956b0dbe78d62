//! Day view state and the habit requests it has in flight.

use crate::client::HabitService;
use crate::errors::{HabitError, TransportFailure};
use crate::models::{self, DaySnapshot, HabitId, Notification, ViewPhase};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

#[derive(Debug)]
enum Completion {
    Snapshot {
        generation: u64,
        result: Result<DaySnapshot, TransportFailure>,
    },
    Toggle {
        habit_id: HabitId,
        result: Result<(), TransportFailure>,
    },
}

pub struct DayViewController<S> {
    service: Arc<S>,
    date: Option<NaiveDate>,
    phase: ViewPhase,
    snapshot: Option<DaySnapshot>,
    completed: BTreeSet<HabitId>,
    notifications: VecDeque<Notification>,
    generation: u64,
    tasks: JoinSet<Completion>,
}

impl<S: HabitService> DayViewController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            date: None,
            phase: ViewPhase::Loading,
            snapshot: None,
            completed: BTreeSet::new(),
            notifications: VecDeque::new(),
            generation: 0,
            tasks: JoinSet::new(),
        }
    }

    /// Starts loading `date`, cancelling whatever the previous day still had
    /// in flight. Must be called from within a tokio runtime.
    pub fn activate(&mut self, date: NaiveDate) {
        self.teardown();

        self.generation += 1;
        self.date = Some(date);
        self.phase = ViewPhase::Loading;
        self.snapshot = None;
        self.completed.clear();
        info!(%date, generation = self.generation, "loading day");

        let service = Arc::clone(&self.service);
        let generation = self.generation;
        self.tasks.spawn(async move {
            let result = service.fetch_day(date).await;
            Completion::Snapshot { generation, result }
        });
    }

    /// Flips `habit_id` locally and sends the toggle without waiting for it.
    /// Returns whether the habit is now checked.
    pub fn toggle(&mut self, habit_id: &HabitId) -> Result<bool, HabitError> {
        let snapshot = self.snapshot.as_ref().ok_or(HabitError::NoSnapshot)?;
        if !snapshot.contains(habit_id) {
            return Err(HabitError::InvalidHabitId(habit_id.clone()));
        }

        let checked = if self.completed.remove(habit_id) {
            false
        } else {
            self.completed.insert(habit_id.clone());
            true
        };
        debug!(%habit_id, checked, "toggled habit");

        let service = Arc::clone(&self.service);
        let habit_id = habit_id.clone();
        self.tasks.spawn(async move {
            let result = service.toggle_habit(&habit_id).await;
            Completion::Toggle { habit_id, result }
        });

        Ok(checked)
    }

    /// Applies every request that has already finished.
    pub fn poll(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            self.apply_joined(joined);
        }
    }

    /// Waits for the next outstanding request and applies it. Returns `false`
    /// when nothing is in flight.
    pub async fn settle_next(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(joined) => {
                self.apply_joined(joined);
                true
            }
            None => false,
        }
    }

    pub async fn settle(&mut self) {
        while self.settle_next().await {}
    }

    /// Cancels every outstanding request. Late responses are never applied.
    pub fn teardown(&mut self) {
        if !self.tasks.is_empty() {
            debug!(in_flight = self.tasks.len(), "cancelling requests");
        }
        self.tasks.abort_all();
        self.tasks.detach_all();
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&DaySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn completed(&self) -> &BTreeSet<HabitId> {
        &self.completed
    }

    pub fn is_checked(&self, habit_id: &HabitId) -> bool {
        self.completed.contains(habit_id)
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn progress_percentage(&self) -> f64 {
        match &self.snapshot {
            Some(snapshot) => {
                models::progress_percentage(snapshot.possible_habits.len(), self.completed.len())
            }
            None => 0.0,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.is_editable_at(Local::now().naive_local())
    }

    pub fn is_editable_at(&self, now: NaiveDateTime) -> bool {
        self.date
            .map(|date| models::is_editable_at(date, now))
            .unwrap_or(false)
    }

    fn apply_joined(&mut self, joined: Result<Completion, JoinError>) {
        match joined {
            Ok(completion) => self.apply(completion),
            Err(err) if err.is_cancelled() => {}
            Err(err) => {
                warn!("habit request task failed: {err}");
                self.notifications
                    .push_back(Notification::error(err.to_string()));
            }
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Snapshot { generation, .. } if generation != self.generation => {
                debug!(generation, current = self.generation, "dropping stale day");
            }
            Completion::Snapshot { result, .. } => {
                match result {
                    Ok(snapshot) => {
                        self.completed = scheduled_completions(&snapshot);
                        info!(
                            possible = snapshot.possible_habits.len(),
                            completed = self.completed.len(),
                            "day ready"
                        );
                        self.snapshot = Some(snapshot);
                    }
                    Err(err) => {
                        warn!("failed to load day: {err}");
                        self.notifications
                            .push_back(Notification::error(err.message));
                    }
                }
                self.phase = ViewPhase::Ready;
            }
            Completion::Toggle { habit_id, result } => {
                if let Err(err) = result {
                    warn!(%habit_id, "failed to toggle habit: {err}");
                    self.notifications
                        .push_back(Notification::error(err.message));
                }
            }
        }
    }
}

/// Completed ids the day actually schedules; anything else is dropped.
fn scheduled_completions(snapshot: &DaySnapshot) -> BTreeSet<HabitId> {
    snapshot
        .completed_habit_ids
        .iter()
        .filter(|id| {
            let known = snapshot.contains(id);
            if !known {
                warn!(habit_id = %id, "dropping completion for unscheduled habit");
            }
            known
        })
        .cloned()
        .collect()
}
