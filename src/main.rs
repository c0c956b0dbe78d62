use chrono::{Local, NaiveDate};
use clap::Parser;
use habit_day::{view, ClientConfig, DayViewController, HabitId, HabitService, HttpHabitService};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "habit_day")]
#[command(about = "Show and check off one day's habits")]
#[command(version)]
struct Cli {
    /// Day to load, as YYYY-MM-DD (defaults to today)
    date: Option<NaiveDate>,

    /// Habit to toggle once the day has loaded; may be repeated
    #[arg(long = "toggle", value_name = "HABIT_ID")]
    toggles: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let service = Arc::new(HttpHabitService::new(&config)?);
    info!(base_url = %service.base_url(), "using habit service");

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let mut controller = DayViewController::new(service);

    controller.activate(date);
    print_screen(&controller);
    controller.settle().await;
    report_notifications(&mut controller);
    print_screen(&controller);

    if cli.toggles.is_empty() {
        return Ok(());
    }
    if !controller.is_editable() {
        warn!(%date, "day has already passed, skipping toggles");
        return Ok(());
    }

    for id in cli.toggles {
        match controller.toggle(&HabitId::new(id)) {
            Ok(_) => print_screen(&controller),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    controller.settle().await;
    report_notifications(&mut controller);
    print_screen(&controller);

    Ok(())
}

fn print_screen<S: HabitService>(controller: &DayViewController<S>) {
    println!("{}", habit_day::ui::render_screen(&view::screen(controller)));
}

fn report_notifications<S: HabitService>(controller: &mut DayViewController<S>) {
    for notification in controller.take_notifications() {
        eprintln!("{}: {}", notification.title, notification.message);
    }
}
