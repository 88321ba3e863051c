use std::sync::Arc;

use sqlx::PgPool;

pub mod jobs;
pub mod notify;
pub mod schedule;

pub use notify::{LogNotifier, Notify, SmtpNotifier};
pub use schedule::{DailyTime, spawn_daily};

/// Spawns the three daily lifecycle jobs: expiry warnings at 09:00,
/// overdue reminders at 10:00 and the expiry sweep at midnight (UTC).
pub fn spawn_all(pool: Arc<PgPool>, notifier: Arc<dyn Notify>) {
    {
        let pool = pool.clone();
        let notifier = notifier.clone();
        spawn_daily("subscription expiry warnings", DailyTime::at(9, 0), move || {
            let pool = pool.clone();
            let notifier = notifier.clone();
            async move {
                jobs::warn_expiring_subscriptions(&pool, notifier.as_ref())
                    .await
                    .map(|_| ())
            }
        });
    }

    {
        let pool = pool.clone();
        spawn_daily("overdue invoice reminders", DailyTime::at(10, 0), move || {
            let pool = pool.clone();
            let notifier = notifier.clone();
            async move {
                jobs::remind_overdue_invoices(&pool, notifier.as_ref())
                    .await
                    .map(|_| ())
            }
        });
    }

    spawn_daily("subscription expiry sweep", DailyTime::at(0, 0), move || {
        let pool = pool.clone();
        async move { jobs::sweep_expired_subscriptions(&pool).await.map(|_| ()) }
    });
}
