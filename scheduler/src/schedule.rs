use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use common::error::Res;

/// A fixed wall-clock time of day, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTime {
    hour: u32,
    minute: u32,
}

impl DailyTime {
    /// # Panics
    ///
    /// Panics if the time is not a valid hour/minute pair.
    pub const fn at(hour: u32, minute: u32) -> Self {
        assert!(hour < 24 && minute < 60);
        DailyTime { hour, minute }
    }

    /// The next instant strictly after `now` at this time of day.
    pub fn next_run(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut candidate = now
            .date_naive()
            .and_hms_opt(self.hour, self.minute, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(|| now + Duration::days(1));
        if candidate <= now {
            candidate += Duration::days(1);
        }
        candidate
    }
}

/// Runs `job` once a day at `time`, forever. A failing run is logged and
/// the loop carries on; the next run happens on schedule regardless.
pub fn spawn_daily<F, Fut>(name: &'static str, time: DailyTime, job: F) -> tokio::task::JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Res<()>> + Send,
{
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = time.next_run(now);
            let wait = (next - now).to_std().unwrap_or_default();
            log::debug!("Job '{}' scheduled for {}", name, next);
            tokio::time::sleep(wait).await;

            log::info!("Running scheduled job '{}'", name);
            if let Err(err) = job().await {
                log::error!("Scheduled job '{}' failed: {}", name, err);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn next_run_is_later_today_when_the_time_is_ahead() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 7, 30, 0).unwrap();
        let next = DailyTime::at(9, 0).next_run(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn next_run_rolls_to_tomorrow_when_the_time_has_passed() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 1).unwrap();
        let next = DailyTime::at(9, 0).next_run(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 6, 11, 9, 0, 0).unwrap());
    }

    #[test]
    fn next_run_at_the_exact_moment_is_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();
        let next = DailyTime::at(0, 0).next_run(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 6, 11, 0, 0, 0).unwrap());
    }
}
