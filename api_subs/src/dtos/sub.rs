use chrono::{DateTime, Utc};
use db::models::subscription::{PlanKind, SubscriptionStatus};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::plan::BillingPeriod;

/// Admin listing filters, straight from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<SubscriptionStatus>,
    pub plan: Option<PlanKind>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub customer_id: Uuid,
    pub plan: PlanKind,
    pub amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub auto_renew: bool,
}

/// Renewal body. Everything is optional; omitted fields carry over from
/// the subscription being renewed.
#[derive(Debug, Default, Deserialize)]
pub struct RenewRequest {
    pub plan: Option<PlanKind>,
    pub amount: Option<i64>,
    pub duration: Option<BillingPeriod>,
}
