use chrono::Utc;
use common::error::Res;
use sqlx::PgPool;

use crate::notify::Notify;

/// Warning window before a subscription's end date.
const EXPIRY_WARNING_DAYS: i64 = 7;

/// Notifies owners of subscriptions ending within the warning window.
/// The notified flag is only set after a successful send, so a failed
/// notification is retried on the next run. Returns the number notified.
pub async fn warn_expiring_subscriptions(pool: &PgPool, notifier: &dyn Notify) -> Res<usize> {
    let now = Utc::now();
    let expiring = db::subscription::expiring_unnotified(pool, now, EXPIRY_WARNING_DAYS).await?;

    let mut notified = 0;
    for sub in &expiring {
        let days_left = (sub.end_date - now).num_days().max(0);
        match notifier.subscription_expiring(sub, days_left) {
            Ok(()) => {
                db::subscription::mark_notified(pool, sub.id).await?;
                notified += 1;
            }
            Err(err) => {
                log::error!(
                    "Failed to send expiry warning for subscription {}: {}",
                    sub.id,
                    err
                );
            }
        }
    }

    if notified > 0 {
        log::info!("Sent {} subscription expiry warning(s)", notified);
    }
    Ok(notified)
}

/// Reminds customers about unpaid invoices past their due date. One
/// reminder per invoice, flagged after a successful send.
pub async fn remind_overdue_invoices(pool: &PgPool, notifier: &dyn Notify) -> Res<usize> {
    let overdue = db::invoice::overdue_unsent(pool, Utc::now()).await?;

    let mut reminded = 0;
    for invoice in &overdue {
        match notifier.invoice_overdue(invoice) {
            Ok(()) => {
                db::invoice::mark_reminder_sent(pool, invoice.id).await?;
                reminded += 1;
            }
            Err(err) => {
                log::error!(
                    "Failed to send overdue reminder for invoice {}: {}",
                    invoice.id,
                    err
                );
            }
        }
    }

    if reminded > 0 {
        log::info!("Sent {} overdue invoice reminder(s)", reminded);
    }
    Ok(reminded)
}

/// Flips lapsed active subscriptions to expired. The subscription gate
/// checks end_date itself, so this sweep only keeps stored statuses and
/// reports honest; access is cut off the moment end_date passes either way.
pub async fn sweep_expired_subscriptions(pool: &PgPool) -> Res<u64> {
    let swept = db::subscription::sweep_expired(pool, Utc::now()).await?;
    if swept > 0 {
        log::info!("Marked {} subscription(s) as expired", swept);
    }
    Ok(swept)
}
