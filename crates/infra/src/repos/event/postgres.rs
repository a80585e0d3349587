use super::IEventRepo;
use agenda_domain::{CalendarEvent, EventStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    start_ts: i64,
    end_ts: Option<i64>,
    color: Option<String>,
    status: String,
    location: Option<String>,
    created: i64,
    updated: i64,
}

impl From<EventRaw> for CalendarEvent {
    fn from(raw: EventRaw) -> Self {
        Self {
            id: raw.event_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            start_ts: raw.start_ts,
            end_ts: raw.end_ts,
            color: raw.color,
            status: raw
                .status
                .parse::<EventStatus>()
                .expect("Valid event status stored in the database"),
            location: raw.location,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calendar_events
            (event_uid, user_uid, title, description, start_ts, end_ts, color, status, location, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.start_ts)
        .bind(e.end_ts)
        .bind(&e.color)
        .bind(e.status.as_str())
        .bind(&e.location)
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE calendar_events
            SET title = $2,
            description = $3,
            start_ts = $4,
            end_ts = $5,
            color = $6,
            status = $7,
            location = $8,
            updated = $9
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.start_ts)
        .bind(e.end_ts)
        .bind(&e.color)
        .bind(e.status.as_str())
        .bind(&e.location)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|e| e.into())
    }

    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<CalendarEvent>> {
        let event_ids = event_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let events = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.event_uid = ANY($1)
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<CalendarEvent> {
        sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.user_uid = $1
            ORDER BY e.start_ts
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.into())
        .collect()
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        sqlx::query_as::<_, EventRaw>(
            r#"
            DELETE FROM calendar_events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|e| e.into())
    }
}
