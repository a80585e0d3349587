use super::IReminderRepo;
use crate::repos::shared::DeleteResult;
use agenda_domain::{DeliveryOutcome, DeliveryStatus, Reminder, ReminderChannel, TimeUnit, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    event_uid: Uuid,
    user_uid: Uuid,
    channel: String,
    lead_amount: i64,
    lead_unit: String,
    status: String,
    fire_at: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            event_id: raw.event_uid.into(),
            user_id: raw.user_uid.into(),
            channel: raw
                .channel
                .parse::<ReminderChannel>()
                .expect("Valid reminder channel stored in the database"),
            lead_amount: raw.lead_amount,
            lead_unit: raw
                .lead_unit
                .parse::<TimeUnit>()
                .expect("Valid lead unit stored in the database"),
            status: raw
                .status
                .parse::<DeliveryStatus>()
                .expect("Valid delivery status stored in the database"),
            fire_at: raw.fire_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, event_uid, user_uid, channel, lead_amount, lead_unit, status, fire_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.event_id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.channel.as_str())
        .bind(reminder.lead_amount)
        .bind(reminder.lead_unit.as_str())
        .bind(reminder.status.as_str())
        .bind(reminder.fire_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET channel = $2,
            lead_amount = $3,
            lead_unit = $4,
            status = $5,
            fire_at = $6
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.channel.as_str())
        .bind(reminder.lead_amount)
        .bind(reminder.lead_unit.as_str())
        .bind(reminder.status.as_str())
        .bind(reminder.fire_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|r| r.into())
    }

    async fn find_by_event(&self, event_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.event_uid = $1
            ORDER BY r.fire_at, r.reminder_uid
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.fire_at, r.reminder_uid
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn find_due_before(&self, before: i64) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status = 'PENDING' AND r.fire_at <= $1
            ORDER BY r.fire_at, r.reminder_uid
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn mark_delivered(
        &self,
        reminder_id: &ID,
        outcome: DeliveryOutcome,
    ) -> anyhow::Result<Option<Reminder>> {
        // The status guard makes the transition first writer wins when
        // scans overlap
        let reminder = sqlx::query_as::<_, ReminderRaw>(
            r#"
            UPDATE reminders AS r
            SET status = $2
            WHERE r.reminder_uid = $1 AND r.status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(DeliveryStatus::from(outcome).as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|r| r.into())
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders AS r
            WHERE r.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
