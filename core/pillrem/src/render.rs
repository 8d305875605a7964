//! Reply をテキストに整形する（端末向け）

use crate::dispatch::Reply;
use crate::domain::dates::format_display_date;
use crate::domain::{ActionId, Settings, SettingKey};
use crate::usecase::{DayListing, MonthGrid, TodayView};
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Today(view) => render_today(view),
        Reply::Reconciled(s) => format!(
            "Reconciled {}: {} from today's medications, {} other record(s) kept{}\n",
            s.date,
            s.homepage,
            s.kept,
            if s.saved { "" } else { " (not saved)" }
        ),
        Reply::Month(grid) => render_month(grid),
        Reply::Day(listing) => render_day(listing),
        Reply::Edited(outcome, listing) => {
            let mut out = format!(
                "Updated: {} ({})\n",
                outcome.record.name, outcome.record.status
            );
            for reason in &outcome.rejected {
                let _ = writeln!(out, "  not applied: {}", reason);
            }
            out.push('\n');
            out.push_str(&render_day(listing));
            out
        }
        Reply::Settings(settings) => render_settings(settings),
        Reply::Export(outcome) => match &outcome.path {
            Some(_) => String::new(),
            None => outcome.csv.clone(),
        },
        Reply::Cancelled => "Cancelled.\n".to_string(),
        Reply::Help => help_text(),
    }
}

pub fn help_text() -> String {
    let mut out = String::from("Commands:\n");
    for action in ActionId::ALL {
        let _ = writeln!(out, "  {}", action.usage());
    }
    out
}

fn render_today(view: &TodayView) -> String {
    let mut out = format!("Today: {}\n", format_display_date(view.date));
    for (tod, entries) in &view.slots {
        let _ = writeln!(out, "{}", tod.label());
        if entries.is_empty() {
            out.push_str("  (no medications)\n");
            continue;
        }
        for e in entries {
            let status = e.status.map(|s| s.as_str()).unwrap_or("-");
            let _ = writeln!(
                out,
                "  {:<14} {:>8}  {:<7} {}",
                e.id,
                e.time.to_12h(),
                status,
                e.name
            );
        }
    }
    out
}

fn render_month(grid: &MonthGrid) -> String {
    let width = WEEKDAYS.len() * 5;
    let mut out = format!("{:^width$}\n", grid.title, width = width);
    for w in WEEKDAYS {
        let _ = write!(out, " {:>2}  ", w);
    }
    out = out.trim_end().to_string();
    out.push('\n');

    for week in &grid.weeks {
        let mut line = String::new();
        for cell in week {
            match cell {
                Some(c) => {
                    let active = if grid.active_date == Some(c.date) { '>' } else { ' ' };
                    let mark = if c.has_records() { '*' } else { ' ' };
                    let _ = write!(line, "{}{:>2}{} ", active, c.day, mark);
                }
                None => line.push_str("     "),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let with_records: Vec<_> = grid.cells().filter(|c| c.has_records()).collect();
    if !with_records.is_empty() {
        out.push('\n');
        for c in with_records {
            let _ = writeln!(out, "{:>3}: {}", c.day, c.lines.join(", "));
        }
    }
    out
}

fn render_day(listing: &DayListing) -> String {
    let mut out = format!("Records for {}\n", listing.title);
    if listing.is_empty() {
        out.push_str("  No medication records for this date.\n");
        return out;
    }
    for group in &listing.groups {
        let _ = writeln!(out, "{}", group.label());
        for row in &group.rows {
            let r = &row.record;
            let badge = if row.today_badge { "  [today]" } else { "" };
            let _ = writeln!(
                out,
                "  {:<14} {:>8}  {:<7} {}{}",
                r.id,
                r.time.to_12h(),
                r.status.as_str(),
                r.name,
                badge
            );
        }
    }
    out
}

fn render_settings(s: &Settings) -> String {
    let mut out = String::new();
    for key in SettingKey::ALL {
        let value = match key {
            SettingKey::Theme => format!("{:?}", s.theme),
            SettingKey::FontSize => format!("{}px", s.font_size),
            SettingKey::NotificationSound => format!("{:?}", s.notification_sound),
            SettingKey::TextToSpeech => format!("{:?}", s.text_to_speech),
            SettingKey::HighContrast => s.high_contrast.to_string(),
            SettingKey::PrimaryColor => format!(
                "{} (dark {}, light {})",
                s.primary_color, s.primary_dark, s.light_color
            ),
        };
        let _ = writeln!(out, "{:<18} {}", key.as_str(), value);
    }
    out
}
