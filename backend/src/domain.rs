use crate::db::DbConnection;
use anyhow::Result;
use chrono::NaiveDate;
use shared::{week_of, CleaningRecord, ScheduleCell, ScheduleDay, Tap, WeekSchedule};
use std::collections::HashMap;
use tracing::info;

/// In-memory index over the records fetched for one displayed week,
/// keyed by (date, tap id) for O(1) cell lookup.
///
/// The store does not enforce uniqueness per cell; when duplicates exist
/// the first-fetched record wins and later ones are never displayed.
pub struct RecordIndex {
    by_cell: HashMap<(NaiveDate, i64), CleaningRecord>,
}

impl RecordIndex {
    pub fn build(records: Vec<CleaningRecord>) -> Self {
        let mut by_cell = HashMap::new();
        for record in records {
            by_cell.entry((record.date, record.tap_id)).or_insert(record);
        }
        Self { by_cell }
    }

    pub fn lookup(&self, date: NaiveDate, tap_id: i64) -> Option<&CleaningRecord> {
        self.by_cell.get(&(date, tap_id))
    }
}

/// Compose the 7-day-by-N-taps grid for the week containing `reference`.
pub fn compose_week_schedule(
    reference: NaiveDate,
    taps: Vec<Tap>,
    records: Vec<CleaningRecord>,
) -> WeekSchedule {
    let index = RecordIndex::build(records);

    let days = week_of(reference)
        .into_iter()
        .map(|date| ScheduleDay {
            date,
            cells: taps
                .iter()
                .map(|tap| ScheduleCell {
                    tap_id: tap.id,
                    record: index.lookup(date, tap.id).cloned(),
                })
                .collect(),
        })
        .collect();

    WeekSchedule { taps, days }
}

/// Schedule service: fetches the week's data and composes the grid
#[derive(Clone)]
pub struct ScheduleService {
    db: DbConnection,
}

impl ScheduleService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Build the schedule for the week containing `reference`:
    /// fetch taps, fetch the week's records, then compose the grid.
    pub async fn week_schedule(&self, reference: NaiveDate) -> Result<WeekSchedule> {
        let week = week_of(reference);
        info!("Composing schedule for week {} .. {}", week[0], week[6]);

        let taps = self.db.list_taps().await?;
        let records = self.db.list_cleaning_records(week[0], week[6]).await?;
        info!("Fetched {} taps and {} records for the week", taps.len(), records.len());

        Ok(compose_week_schedule(reference, taps, records))
    }
}

/// Tap service: add-with-default-name and rename
#[derive(Clone)]
pub struct TapService {
    db: DbConnection,
}

impl TapService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Create a tap with a server-assigned default name ("Pípa N", where N
    /// continues the current count).
    pub async fn create_tap(&self) -> Result<Tap> {
        let existing = self.db.list_taps().await?;
        let name = format!("Pípa {}", existing.len() + 1);

        let tap = self.db.insert_tap(&name).await?;
        info!("Created tap {} ({})", tap.id, tap.name);
        Ok(tap)
    }

    /// Rename one tap. Returns false when the id is unknown.
    pub async fn rename_tap(&self, id: i64, name: &str) -> Result<bool> {
        let renamed = self.db.update_tap_name(id, name).await?;
        if renamed {
            info!("Renamed tap {} to '{}'", id, name);
        }
        Ok(renamed)
    }
}
