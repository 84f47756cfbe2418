use chrono::{Datelike, NaiveDate, Weekday};

/// Get the current calendar date from the host clock
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    // JavaScript months are 0-indexed
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

/// Get the current wall-clock time as "HH:MM:SS"
pub fn current_time() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    format!(
        "{:02}:{:02}:{:02}",
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds()
    )
}

/// Czech weekday name for a grid column header
pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Pondělí",
        Weekday::Tue => "Úterý",
        Weekday::Wed => "Středa",
        Weekday::Thu => "Čtvrtek",
        Weekday::Fri => "Pátek",
        Weekday::Sat => "Sobota",
        Weekday::Sun => "Neděle",
    }
}

/// Short "12. 6." date for a grid column header
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}. {}.", date.day(), date.month())
}

/// Full "12. 6. 2024" date for labels and the record modal
pub fn format_full_date(date: NaiveDate) -> String {
    format!("{}. {}. {}", date.day(), date.month(), date.year())
}

/// "10. 6. 2024 – 16. 6. 2024" label for the displayed week
pub fn format_week_range(first: NaiveDate, last: NaiveDate) -> String {
    format!("{} – {}", format_full_date(first), format_full_date(last))
}
