use crate::reminder::send_due_reminders::SendDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use agenda_infra::AgendaContext;
use std::time::Duration;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Scans for due reminders once every minute, aligned to minute
/// boundaries so that a reminder fires as close to its `fire_at` as
/// the scan granularity allows.
pub fn start_send_reminders_job(ctx: AgendaContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                if let Ok(report) = execute(SendDueRemindersUseCase, &context).await {
                    if report.sent > 0 || report.failed > 0 || report.skipped > 0 {
                        info!(
                            "Reminder scan done. Sent: {}, failed: {}, skipped: {}",
                            report.sent, report.failed, report.skipped
                        );
                    }
                }
            });
        }
    });
}
