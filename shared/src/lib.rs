use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee name filled into a record created from an empty grid cell.
pub const DEFAULT_EMPLOYEE: &str = "Jan Novák";

/// One physical dispensing unit tracked for cleaning compliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name (free text, e.g. "Pípa 1")
    pub name: String,
}

/// One logged cleaning event for a tap on a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningRecord {
    /// Store-assigned identifier
    pub id: i64,
    /// Tap this cleaning belongs to
    pub tap_id: i64,
    /// Calendar date of the cleaning, no time component
    pub date: NaiveDate,
    /// Wall-clock time as entered ("HH:MM:SS")
    pub time: String,
    /// Who performed the cleaning (free text)
    pub employee: String,
    /// Kind of cleaning performed
    #[serde(rename = "type")]
    pub cleaning_type: CleaningType,
}

/// Fixed set of cleaning kinds. Stored and serialized under the Czech
/// labels the schedule sheet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CleaningType {
    #[serde(rename = "Běžné")]
    Routine,
    #[serde(rename = "Hloubkové")]
    Deep,
    #[serde(rename = "Sanitace")]
    Sanitation,
}

impl CleaningType {
    pub const ALL: [CleaningType; 3] = [
        CleaningType::Routine,
        CleaningType::Deep,
        CleaningType::Sanitation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CleaningType::Routine => "Běžné",
            CleaningType::Deep => "Hloubkové",
            CleaningType::Sanitation => "Sanitace",
        }
    }

    pub fn from_label(label: &str) -> Option<CleaningType> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }
}

impl Default for CleaningType {
    fn default() -> Self {
        CleaningType::Routine
    }
}

impl fmt::Display for CleaningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request body for renaming a tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameTapRequest {
    pub name: String,
}

/// Request body for creating a cleaning record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCleaningRecordRequest {
    pub tap_id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub employee: String,
    #[serde(rename = "type")]
    pub cleaning_type: CleaningType,
}

/// Partial update of a cleaning record; fields left as `None` are untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCleaningRecordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub cleaning_type: Option<CleaningType>,
}

/// The composed 7-day-by-N-taps grid for one displayed week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// All taps, ordered by identifier
    pub taps: Vec<Tap>,
    /// Monday through Sunday of the displayed week
    pub days: Vec<ScheduleDay>,
}

/// One day column of the schedule grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    /// One cell per tap, in the same order as `WeekSchedule::taps`
    pub cells: Vec<ScheduleCell>,
}

/// One grid cell: the cleaning record for (day, tap), if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCell {
    pub tap_id: i64,
    pub record: Option<CleaningRecord>,
}

/// Monday-to-Sunday week containing `date`.
///
/// The week starts on Monday, so a Sunday reference shifts back six days.
/// Total for any valid date.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Shift a reference date by whole weeks (`weeks` may be negative).
pub fn advance_week(date: NaiveDate, weeks: i64) -> NaiveDate {
    date + Duration::days(7 * weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_of_midweek_reference() {
        // 2024-06-12 is a Wednesday
        let week = week_of(date(2024, 6, 12));
        assert_eq!(week[0], date(2024, 6, 10));
        assert_eq!(week[6], date(2024, 6, 16));
    }

    #[test]
    fn test_week_of_monday_reference() {
        let week = week_of(date(2024, 6, 10));
        assert_eq!(week[0], date(2024, 6, 10));
    }

    #[test]
    fn test_week_of_sunday_shifts_back_six_days() {
        let week = week_of(date(2024, 6, 16));
        assert_eq!(week[0], date(2024, 6, 10));
        assert_eq!(week[6], date(2024, 6, 16));
    }

    #[test]
    fn test_week_of_is_seven_consecutive_days_starting_monday() {
        // Sweep a month's worth of reference dates
        for offset in 0..31 {
            let reference = date(2024, 6, 1) + Duration::days(offset);
            let week = week_of(reference);

            assert_eq!(week[0].weekday(), chrono::Weekday::Mon);
            for i in 1..7 {
                assert_eq!(week[i] - week[i - 1], Duration::days(1));
            }
            assert!(week[0] <= reference && reference <= week[6]);
        }
    }

    #[test]
    fn test_week_of_idempotent_over_its_own_output() {
        let week = week_of(date(2024, 6, 12));
        for day in week {
            assert_eq!(week_of(day), week);
        }
    }

    #[test]
    fn test_week_of_across_year_boundary() {
        // 2025-01-01 is a Wednesday; its week starts in 2024
        let week = week_of(date(2025, 1, 1));
        assert_eq!(week[0], date(2024, 12, 30));
        assert_eq!(week[6], date(2025, 1, 5));
    }

    #[test]
    fn test_advance_week() {
        assert_eq!(advance_week(date(2024, 6, 12), 1), date(2024, 6, 19));
        assert_eq!(advance_week(date(2024, 6, 12), -1), date(2024, 6, 5));

        // Advancing then recomputing the week moves the displayed range
        let week = week_of(advance_week(date(2024, 6, 12), 1));
        assert_eq!(week[0], date(2024, 6, 17));
        assert_eq!(week[6], date(2024, 6, 23));
    }

    #[test]
    fn test_cleaning_type_labels() {
        assert_eq!(CleaningType::Routine.label(), "Běžné");
        assert_eq!(CleaningType::Deep.label(), "Hloubkové");
        assert_eq!(CleaningType::Sanitation.label(), "Sanitace");

        for t in CleaningType::ALL {
            assert_eq!(CleaningType::from_label(t.label()), Some(t));
        }
        assert_eq!(CleaningType::from_label("Jiné"), None);
    }

    #[test]
    fn test_cleaning_type_serializes_as_czech_label() {
        let json = serde_json::to_string(&CleaningType::Routine).unwrap();
        assert_eq!(json, "\"Běžné\"");

        let parsed: CleaningType = serde_json::from_str("\"Sanitace\"").unwrap();
        assert_eq!(parsed, CleaningType::Sanitation);
    }

    #[test]
    fn test_cleaning_record_wire_format_uses_type_key() {
        let record = CleaningRecord {
            id: 1,
            tap_id: 3,
            date: date(2024, 6, 11),
            time: "14:30:00".to_string(),
            employee: DEFAULT_EMPLOYEE.to_string(),
            cleaning_type: CleaningType::Routine,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Běžné");
        assert_eq!(json["date"], "2024-06-11");

        let back: CleaningRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
