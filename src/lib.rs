pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod ui;
pub mod view;

pub use client::{HabitService, HttpHabitService};
pub use config::ClientConfig;
pub use controller::DayViewController;
pub use errors::{HabitError, TransportFailure};
pub use models::{DaySnapshot, Habit, HabitId, Notification, ViewPhase};
pub use view::Screen;
