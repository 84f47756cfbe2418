use chrono::NaiveDate;
use shared::{CleaningRecord, CleaningType, CreateCleaningRecordRequest, Tap, UpdateCleaningRecordRequest};
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use thiserror::Error;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:cleaning.db";

/// Any failure coming out of the store: connectivity, query, constraint
/// violation. Callers log it and leave their local state unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("store returned a malformed row: {0}")]
    MalformedRow(String),
}

/// DbConnection manages the two persisted entities: taps and cleaning records
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self, StoreError> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self, StoreError> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self, StoreError> {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static TEST_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

        let test_id = TEST_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS taps (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // No uniqueness constraint on (tap_id, date): the grid shows the
        // first match and tolerates duplicates in the store.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cleaning_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tap_id INTEGER NOT NULL REFERENCES taps(id),
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                employee TEXT NOT NULL,
                type TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List all taps ordered by identifier ascending
    pub async fn list_taps(&self) -> Result<Vec<Tap>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM taps ORDER BY id")
            .fetch_all(&*self.pool)
            .await?;

        Ok(rows.iter().map(tap_from_row).collect())
    }

    /// Insert a tap; the store assigns the identifier
    pub async fn insert_tap(&self, name: &str) -> Result<Tap, StoreError> {
        let row = sqlx::query("INSERT INTO taps (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(&*self.pool)
            .await?;

        Ok(tap_from_row(&row))
    }

    /// Rename a tap. Returns false if no tap has the given identifier.
    pub async fn update_tap_name(&self, id: i64, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE taps SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List cleaning records whose date falls in [start, end], inclusive
    pub async fn list_cleaning_records(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CleaningRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, tap_id, date, time, employee, type FROM cleaning_records \
             WHERE date >= ? AND date <= ? ORDER BY id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Insert a cleaning record and return the created row in one round trip
    pub async fn insert_cleaning_record(
        &self,
        request: &CreateCleaningRecordRequest,
    ) -> Result<CleaningRecord, StoreError> {
        let row = sqlx::query(
            "INSERT INTO cleaning_records (tap_id, date, time, employee, type) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, tap_id, date, time, employee, type",
        )
        .bind(request.tap_id)
        .bind(request.date)
        .bind(&request.time)
        .bind(&request.employee)
        .bind(request.cleaning_type.label())
        .fetch_one(&*self.pool)
        .await?;

        record_from_row(&row)
    }

    /// Update the editable fields of a cleaning record. Fields left as
    /// `None` keep their stored value. Returns false if the id is unknown.
    pub async fn update_cleaning_record(
        &self,
        id: i64,
        update: &UpdateCleaningRecordRequest,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE cleaning_records SET \
             time = COALESCE(?, time), \
             employee = COALESCE(?, employee), \
             type = COALESCE(?, type) \
             WHERE id = ?",
        )
        .bind(update.time.as_deref())
        .bind(update.employee.as_deref())
        .bind(update.cleaning_type.map(|t| t.label()))
        .bind(id)
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Point read of a single cleaning record
    pub async fn get_cleaning_record(&self, id: i64) -> Result<Option<CleaningRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, tap_id, date, time, employee, type FROM cleaning_records WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(record_from_row(&r)?)),
            None => Ok(None),
        }
    }
}

fn tap_from_row(row: &SqliteRow) -> Tap {
    Tap {
        id: row.get("id"),
        name: row.get("name"),
    }
}

fn record_from_row(row: &SqliteRow) -> Result<CleaningRecord, StoreError> {
    let type_label: String = row.get("type");
    let cleaning_type = CleaningType::from_label(&type_label)
        .ok_or_else(|| StoreError::MalformedRow(format!("unknown cleaning type '{}'", type_label)))?;

    Ok(CleaningRecord {
        id: row.get("id"),
        tap_id: row.get("tap_id"),
        date: row.get("date"),
        time: row.get("time"),
        employee: row.get("employee"),
        cleaning_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DEFAULT_EMPLOYEE;

    // Setup a new test database for each test
    async fn setup_test() -> DbConnection {
        DbConnection::init_test().await.expect("Failed to create test database")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_request(tap_id: i64, date: NaiveDate) -> CreateCleaningRecordRequest {
        CreateCleaningRecordRequest {
            tap_id,
            date,
            time: "14:30:00".to_string(),
            employee: DEFAULT_EMPLOYEE.to_string(),
            cleaning_type: CleaningType::Routine,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_taps_ordered_by_id() {
        let db = setup_test().await;

        let first = db.insert_tap("Pípa 1").await.expect("Failed to insert tap");
        let second = db.insert_tap("Pípa 2").await.expect("Failed to insert tap");
        assert!(first.id < second.id);

        let taps = db.list_taps().await.expect("Failed to list taps");
        assert_eq!(taps.len(), 2);
        assert_eq!(taps[0], first);
        assert_eq!(taps[1], second);
    }

    #[tokio::test]
    async fn test_rename_tap_touches_only_that_tap() {
        let db = setup_test().await;

        let tap_a = db.insert_tap("Pípa 1").await.unwrap();
        let tap_b = db.insert_tap("Pípa 2").await.unwrap();

        let record = db
            .insert_cleaning_record(&create_request(tap_a.id, date(2024, 6, 11)))
            .await
            .unwrap();

        let renamed = db.update_tap_name(tap_a.id, "Tap A").await.expect("Rename failed");
        assert!(renamed);

        let taps = db.list_taps().await.unwrap();
        assert_eq!(taps[0].name, "Tap A");
        assert_eq!(taps[1].name, tap_b.name);

        // Cleaning records are unaffected by the rename
        let records = db
            .list_cleaning_records(date(2024, 6, 10), date(2024, 6, 16))
            .await
            .unwrap();
        assert_eq!(records, vec![record]);
    }

    #[tokio::test]
    async fn test_rename_unknown_tap_reports_no_match() {
        let db = setup_test().await;

        let renamed = db.update_tap_name(999, "Tap X").await.expect("Query failed");
        assert!(!renamed);
    }

    #[tokio::test]
    async fn test_insert_record_returns_created_row() {
        let db = setup_test().await;
        let tap = db.insert_tap("Pípa 1").await.unwrap();

        let request = create_request(tap.id, date(2024, 6, 11));
        let record = db.insert_cleaning_record(&request).await.expect("Insert failed");

        assert!(record.id > 0);
        assert_eq!(record.tap_id, tap.id);
        assert_eq!(record.date, date(2024, 6, 11));
        assert_eq!(record.time, "14:30:00");
        assert_eq!(record.employee, DEFAULT_EMPLOYEE);
        assert_eq!(record.cleaning_type, CleaningType::Routine);
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trip() {
        let db = setup_test().await;
        let tap = db.insert_tap("Pípa 1").await.unwrap();

        let created = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 11)))
            .await
            .unwrap();

        let records = db
            .list_cleaning_records(date(2024, 6, 10), date(2024, 6, 16))
            .await
            .expect("List failed");
        assert_eq!(records, vec![created]);
    }

    #[tokio::test]
    async fn test_list_records_range_is_inclusive() {
        let db = setup_test().await;
        let tap = db.insert_tap("Pípa 1").await.unwrap();

        let monday = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 10)))
            .await
            .unwrap();
        let sunday = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 16)))
            .await
            .unwrap();
        // Just outside the displayed week on both sides
        db.insert_cleaning_record(&create_request(tap.id, date(2024, 6, 9)))
            .await
            .unwrap();
        db.insert_cleaning_record(&create_request(tap.id, date(2024, 6, 17)))
            .await
            .unwrap();

        let records = db
            .list_cleaning_records(date(2024, 6, 10), date(2024, 6, 16))
            .await
            .unwrap();
        assert_eq!(records, vec![monday, sunday]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_unset_fields() {
        let db = setup_test().await;
        let tap = db.insert_tap("Pípa 1").await.unwrap();
        let record = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 11)))
            .await
            .unwrap();

        let update = UpdateCleaningRecordRequest {
            employee: Some("Petra Svobodová".to_string()),
            ..Default::default()
        };
        let updated = db.update_cleaning_record(record.id, &update).await.expect("Update failed");
        assert!(updated);

        let stored = db
            .get_cleaning_record(record.id)
            .await
            .expect("Point read failed")
            .expect("Record should exist");
        assert_eq!(stored.employee, "Petra Svobodová");
        assert_eq!(stored.time, record.time);
        assert_eq!(stored.cleaning_type, record.cleaning_type);
    }

    #[tokio::test]
    async fn test_update_all_editable_fields() {
        let db = setup_test().await;
        let tap = db.insert_tap("Pípa 1").await.unwrap();
        let record = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 11)))
            .await
            .unwrap();

        let update = UpdateCleaningRecordRequest {
            time: Some("08:15:00".to_string()),
            employee: Some("Karel Dvořák".to_string()),
            cleaning_type: Some(CleaningType::Deep),
        };
        assert!(db.update_cleaning_record(record.id, &update).await.unwrap());

        let stored = db.get_cleaning_record(record.id).await.unwrap().unwrap();
        assert_eq!(stored.time, "08:15:00");
        assert_eq!(stored.employee, "Karel Dvořák");
        assert_eq!(stored.cleaning_type, CleaningType::Deep);
        // Identity fields never change through the modal path
        assert_eq!(stored.tap_id, record.tap_id);
        assert_eq!(stored.date, record.date);
    }

    #[tokio::test]
    async fn test_update_unknown_record_reports_no_match() {
        let db = setup_test().await;

        let update = UpdateCleaningRecordRequest {
            time: Some("08:15:00".to_string()),
            ..Default::default()
        };
        let updated = db.update_cleaning_record(424242, &update).await.expect("Query failed");
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_get_nonexistent_record() {
        let db = setup_test().await;

        let result = db.get_cleaning_record(1).await.expect("Query failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_cell_records_are_allowed_by_the_store() {
        // The store enforces no uniqueness on (tap, date); the display
        // layer resolves duplicates with first-match lookup.
        let db = setup_test().await;
        let tap = db.insert_tap("Pípa 1").await.unwrap();

        let first = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 11)))
            .await
            .unwrap();
        let second = db
            .insert_cleaning_record(&create_request(tap.id, date(2024, 6, 11)))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        let records = db
            .list_cleaning_records(date(2024, 6, 11), date(2024, 6, 11))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
    }
}
