use std::{collections::HashSet, str::FromStr};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::AgendaStore,
    error::{AppError, AppResult},
    models::{Event, Exhibitor, LabelCount, SavedSlot, Talk},
};

const TALK_COLUMNS: &str =
    "t.id, t.title, t.description, t.track, t.start_time, t.end_time, t.location, t.event_id";
const EXHIBITOR_COLUMNS: &str = "e.id, e.name, e.description, e.sector, e.stand, e.event_id";

/// Creates a SQLite connection pool
///
/// The database file is created if it does not exist yet. Foreign keys are
/// enforced on every connection.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates a migrated in-memory database
///
/// Each SQLite in-memory connection is its own database, so the pool holds
/// exactly one connection that never expires.
pub async fn create_memory_pool() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Turns a foreign-key violation into `NotFound`; the referenced row is gone
fn missing_reference(error: sqlx::Error, message: String) -> AppError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_foreign_key_violation() {
            return AppError::NotFound(message);
        }
    }
    AppError::Database(error)
}

/// [`AgendaStore`] backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AgendaStore for SqliteStore {
    async fn track_counts(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<LabelCount>> {
        let rows = sqlx::query_as::<_, LabelCount>(
            r#"
            SELECT t.track AS label, COUNT(*) AS count
            FROM user_talks ut
            JOIN talks t ON ut.talk_id = t.id
            WHERE ut.user_id = ?1 AND (?2 IS NULL OR t.event_id = ?2)
            GROUP BY t.track
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn sector_counts(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<LabelCount>> {
        let rows = sqlx::query_as::<_, LabelCount>(
            r#"
            SELECT e.sector AS label, COUNT(*) AS count
            FROM user_exhibitors ue
            JOIN exhibitors e ON ue.exhibitor_id = e.id
            WHERE ue.user_id = ?1 AND (?2 IS NULL OR e.event_id = ?2)
            GROUP BY e.sector
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn saved_talk_slots(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<SavedSlot>> {
        let rows = sqlx::query_as::<_, SavedSlot>(
            r#"
            SELECT t.start_time, t.end_time
            FROM user_talks ut
            JOIN talks t ON ut.talk_id = t.id
            WHERE ut.user_id = ?1 AND (?2 IS NULL OR t.event_id = ?2)
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn saved_talk_ids(&self, user_id: i64) -> AppResult<HashSet<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT talk_id FROM user_talks WHERE user_id = ?1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().collect())
    }

    async fn saved_exhibitor_ids(&self, user_id: i64) -> AppResult<HashSet<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT exhibitor_id FROM user_exhibitors WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn talks(&self, event_id: Option<i64>) -> AppResult<Vec<Talk>> {
        let sql = format!(
            "SELECT {TALK_COLUMNS} FROM talks t WHERE (?1 IS NULL OR t.event_id = ?1) ORDER BY t.id"
        );
        let talks = sqlx::query_as::<_, Talk>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(talks)
    }

    async fn exhibitors(&self, event_id: Option<i64>) -> AppResult<Vec<Exhibitor>> {
        let sql = format!(
            "SELECT {EXHIBITOR_COLUMNS} FROM exhibitors e WHERE (?1 IS NULL OR e.event_id = ?1) ORDER BY e.id"
        );
        let exhibitors = sqlx::query_as::<_, Exhibitor>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(exhibitors)
    }

    async fn saved_talks(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<Talk>> {
        let sql = format!(
            r#"
            SELECT {TALK_COLUMNS}
            FROM user_talks ut
            JOIN talks t ON ut.talk_id = t.id
            WHERE ut.user_id = ?1 AND (?2 IS NULL OR t.event_id = ?2)
            ORDER BY t.start_time, t.id
            "#
        );
        let talks = sqlx::query_as::<_, Talk>(&sql)
            .bind(user_id)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(talks)
    }

    async fn saved_exhibitors(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<Exhibitor>> {
        let sql = format!(
            r#"
            SELECT {EXHIBITOR_COLUMNS}
            FROM user_exhibitors ue
            JOIN exhibitors e ON ue.exhibitor_id = e.id
            WHERE ue.user_id = ?1 AND (?2 IS NULL OR e.event_id = ?2)
            ORDER BY e.name, e.id
            "#
        );
        let exhibitors = sqlx::query_as::<_, Exhibitor>(&sql)
            .bind(user_id)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(exhibitors)
    }

    async fn talk_exists(&self, talk_id: i64) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM talks WHERE id = ?1")
            .bind(talk_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn exhibitor_exists(&self, exhibitor_id: i64) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM exhibitors WHERE id = ?1")
            .bind(exhibitor_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn insert_saved_talk(&self, user_id: i64, talk_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_talks (user_id, talk_id) VALUES (?1, ?2)
            ON CONFLICT (user_id, talk_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(talk_id)
        .execute(&self.pool)
        .await
        .map_err(|e| missing_reference(e, format!("Talk {} does not exist", talk_id)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn insert_saved_exhibitor(&self, user_id: i64, exhibitor_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_exhibitors (user_id, exhibitor_id) VALUES (?1, ?2)
            ON CONFLICT (user_id, exhibitor_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(exhibitor_id)
        .execute(&self.pool)
        .await
        .map_err(|e| missing_reference(e, format!("Exhibitor {} does not exist", exhibitor_id)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_saved_talk(&self, user_id: i64, talk_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_talks WHERE user_id = ?1 AND talk_id = ?2")
            .bind(user_id)
            .bind(talk_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_saved_exhibitor(&self, user_id: i64, exhibitor_id: i64) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM user_exhibitors WHERE user_id = ?1 AND exhibitor_id = ?2")
                .bind(user_id)
                .bind(exhibitor_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn events(&self) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, start_date, end_date, location, description
            FROM events
            ORDER BY start_date IS NULL, start_date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn event(&self, event_id: i64) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, start_date, end_date, location, description FROM events WHERE id = ?1",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn event_talks(&self, event_id: i64) -> AppResult<Vec<Talk>> {
        let sql = format!(
            "SELECT {TALK_COLUMNS} FROM talks t WHERE t.event_id = ?1 ORDER BY t.start_time, t.id"
        );
        let talks = sqlx::query_as::<_, Talk>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(talks)
    }

    async fn event_exhibitors(&self, event_id: i64) -> AppResult<Vec<Exhibitor>> {
        let sql = format!(
            "SELECT {EXHIBITOR_COLUMNS} FROM exhibitors e WHERE e.event_id = ?1 ORDER BY e.name, e.id"
        );
        let exhibitors = sqlx::query_as::<_, Exhibitor>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(exhibitors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> SqliteStore {
        let pool = create_memory_pool().await.unwrap();

        sqlx::raw_sql(
            r#"
            INSERT INTO events (id, name, start_date) VALUES
                (1, 'Advanced Factories', '2025-04-08'),
                (2, 'Composites Expo', NULL),
                (3, 'Industry Days', '2025-03-01');

            INSERT INTO talks (id, title, track, start_time, end_time, event_id) VALUES
                (1, 'AI in Industrial Processes', 'AI & Data', '11:00', '11:45', 1),
                (2, 'Future of Manufacturing', 'Automation', '10:00', '10:45', 1),
                (3, 'Untracked Keynote', NULL, '09:00', '09:30', 1),
                (4, 'Digital Twins Explained', 'AI & Data', '14:00', '14:45', 2);

            INSERT INTO exhibitors (id, name, sector, stand, event_id) VALUES
                (1, 'RoboTech Solutions', 'Robotics', 'A12', 1),
                (2, 'DataForge AI', 'AI & Data', 'C03', 1),
                (3, 'GreenComposites', NULL, 'B18', 2);
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        SqliteStore::new(pool)
    }

    #[tokio::test]
    async fn test_duplicate_save_is_reported() {
        let store = seeded_store().await;

        assert!(store.insert_saved_talk(7, 1).await.unwrap());
        assert!(!store.insert_saved_talk(7, 1).await.unwrap());
        assert!(store.insert_saved_talk(8, 1).await.unwrap());

        assert!(store.insert_saved_exhibitor(7, 2).await.unwrap());
        assert!(!store.insert_saved_exhibitor(7, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = seeded_store().await;
        store.insert_saved_talk(7, 1).await.unwrap();

        assert!(store.delete_saved_talk(7, 1).await.unwrap());
        assert!(!store.delete_saved_talk(7, 1).await.unwrap());
        assert!(!store.delete_saved_exhibitor(7, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_track_counts_scoped_and_global() {
        let store = seeded_store().await;
        for talk_id in [1, 3, 4] {
            store.insert_saved_talk(7, talk_id).await.unwrap();
        }

        let mut global = store.track_counts(7, None).await.unwrap();
        global.sort_by(|a, b| a.label.cmp(&b.label));
        assert_eq!(
            global,
            vec![
                LabelCount { label: None, count: 1 },
                LabelCount { label: Some("AI & Data".to_string()), count: 2 },
            ]
        );

        let scoped = store.track_counts(7, Some(2)).await.unwrap();
        assert_eq!(
            scoped,
            vec![LabelCount { label: Some("AI & Data".to_string()), count: 1 }]
        );
    }

    #[tokio::test]
    async fn test_sector_counts_ignore_other_users() {
        let store = seeded_store().await;
        store.insert_saved_exhibitor(7, 1).await.unwrap();
        store.insert_saved_exhibitor(8, 2).await.unwrap();

        let counts = store.sector_counts(7, None).await.unwrap();
        assert_eq!(
            counts,
            vec![LabelCount { label: Some("Robotics".to_string()), count: 1 }]
        );
    }

    #[tokio::test]
    async fn test_saved_ids_are_not_scoped() {
        let store = seeded_store().await;
        store.insert_saved_talk(7, 1).await.unwrap();
        store.insert_saved_talk(7, 4).await.unwrap();

        let ids = store.saved_talk_ids(7).await.unwrap();
        assert_eq!(ids, HashSet::from([1, 4]));
    }

    #[tokio::test]
    async fn test_saved_talk_slots_scoped() {
        let store = seeded_store().await;
        store.insert_saved_talk(7, 2).await.unwrap();
        store.insert_saved_talk(7, 4).await.unwrap();

        let slots = store.saved_talk_slots(7, Some(1)).await.unwrap();
        assert_eq!(
            slots,
            vec![SavedSlot {
                start_time: Some("10:00".to_string()),
                end_time: Some("10:45".to_string()),
            }]
        );
        assert_eq!(store.saved_talk_slots(7, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_catalog_in_id_order() {
        let store = seeded_store().await;

        let ids: Vec<i64> = store.talks(None).await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let ids: Vec<i64> = store.talks(Some(1)).await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let ids: Vec<i64> = store.exhibitors(Some(2)).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn test_agenda_ordering() {
        let store = seeded_store().await;
        for talk_id in [1, 2, 3] {
            store.insert_saved_talk(7, talk_id).await.unwrap();
        }
        store.insert_saved_exhibitor(7, 1).await.unwrap();
        store.insert_saved_exhibitor(7, 2).await.unwrap();

        let titles: Vec<String> = store
            .saved_talks(7, Some(1))
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Untracked Keynote",
                "Future of Manufacturing",
                "AI in Industrial Processes"
            ]
        );

        let names: Vec<String> = store
            .saved_exhibitors(7, None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["DataForge AI", "RoboTech Solutions"]);
    }

    #[tokio::test]
    async fn test_events_undated_last() {
        let store = seeded_store().await;

        let ids: Vec<i64> = store.events().await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        assert!(store.event(2).await.unwrap().is_some());
        assert!(store.event(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_lookups() {
        let store = seeded_store().await;

        assert!(store.talk_exists(1).await.unwrap());
        assert!(!store.talk_exists(42).await.unwrap());
        assert!(store.exhibitor_exists(3).await.unwrap());
        assert!(!store.exhibitor_exists(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_of_missing_row_is_not_found() {
        let store = seeded_store().await;

        // Talk 42 never existed; talk 2 is deleted after the caller looked it up
        assert!(matches!(
            store.insert_saved_talk(7, 42).await,
            Err(AppError::NotFound(_))
        ));

        sqlx::query("DELETE FROM talks WHERE id = 2")
            .execute(&store.pool)
            .await
            .unwrap();
        assert!(matches!(
            store.insert_saved_talk(7, 2).await,
            Err(AppError::NotFound(_))
        ));

        assert!(matches!(
            store.insert_saved_exhibitor(7, 42).await,
            Err(AppError::NotFound(_))
        ));
    }
}
