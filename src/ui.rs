use crate::view::{DayView, Screen};
use chrono::Datelike;

const BAR_WIDTH: usize = 20;
const PAST_NOTICE: &str = "You can't edit habits of a date that has already passed.";

pub fn render_screen(screen: &Screen) -> String {
    match screen {
        Screen::Loading => "loading...\n".to_owned(),
        Screen::Day(view) => render_day(view),
    }
}

fn render_day(view: &DayView) -> String {
    let mut out = String::new();
    out.push_str(&view.date.format("%A").to_string().to_lowercase());
    out.push('\n');
    out.push_str(&format!("{:02}/{:02}\n", view.date.day(), view.date.month()));
    out.push_str(&progress_bar(view.progress));
    out.push('\n');

    match &view.habits {
        Some(habits) => {
            for row in habits {
                let mark = if row.checked { 'x' } else { ' ' };
                out.push_str(&format!("[{mark}] {}\n", row.title));
            }
        }
        None => out.push_str("No habits to track for this day.\n"),
    }

    if view.show_past_notice() {
        out.push('\n');
        out.push_str(PAST_NOTICE);
        out.push('\n');
    }

    out
}

fn progress_bar(progress: f64) -> String {
    let clamped = progress.clamp(0.0, 100.0);
    let filled = (clamped / 100.0 * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        clamped.round() as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitId;
    use crate::view::HabitRow;
    use chrono::NaiveDate;

    fn row(id: &str, title: &str, checked: bool) -> HabitRow {
        HabitRow {
            id: HabitId::from(id),
            title: title.to_owned(),
            checked,
            disabled: false,
        }
    }

    #[test]
    fn renders_day_with_rows() {
        let view = DayView {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            editable: true,
            progress: 50.0,
            habits: Some(vec![row("h1", "Read", true), row("h2", "Run", false)]),
        };
        let text = render_screen(&Screen::Day(view));
        assert_eq!(
            text,
            "monday\n01/01\n[##########----------] 50%\n[x] Read\n[ ] Run\n"
        );
    }

    #[test]
    fn renders_empty_state_and_notice() {
        let view = DayView {
            date: NaiveDate::from_ymd_opt(2023, 12, 24).unwrap(),
            editable: false,
            progress: 0.0,
            habits: None,
        };
        let text = render_screen(&Screen::Day(view));
        assert!(text.starts_with("sunday\n24/12\n"));
        assert!(text.contains("No habits to track for this day."));
        assert!(text.ends_with(&format!("{PAST_NOTICE}\n")));
    }

    #[test]
    fn empty_day_renders_no_rows() {
        let view = DayView {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            editable: true,
            progress: 0.0,
            habits: Some(Vec::new()),
        };
        let text = render_screen(&Screen::Day(view));
        assert_eq!(text, "monday\n01/01\n[--------------------] 0%\n");
    }

    #[test]
    fn progress_rounds_for_display() {
        assert_eq!(progress_bar(100.0 / 3.0), "[#######-------------] 33%");
        assert_eq!(progress_bar(100.0), format!("[{}] 100%", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn loading_screen() {
        assert_eq!(render_screen(&Screen::Loading), "loading...\n");
    }
}
