use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::subscription::{PlanKind, SubscriptionStatus};

pub struct NewSubscription {
    pub customer_id: Uuid,
    pub plan: PlanKind,
    pub amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub auto_renew: bool,
}

/// Optional admin listing filters.
#[derive(Debug, Default)]
pub struct SubscriptionFilter {
    pub status: Option<SubscriptionStatus>,
    pub plan: Option<PlanKind>,
}
