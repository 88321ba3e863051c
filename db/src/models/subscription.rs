use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "plan_kind", rename_all = "lowercase")]
pub enum PlanKind {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
}

/// A time-boxed paid entitlement gating tenant-scoped API access.
/// At most one row per account is `active`; renewal and admin creation
/// expire prior active rows and insert the new one in one transaction.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Subscription {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub plan: PlanKind,
    pub amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub auto_renew: bool,
    pub notified_7days: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row: subscription joined with its owning customer.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SubscriptionWithCustomer {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub plan: PlanKind,
    pub amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub auto_renew: bool,
    pub notified_7days: bool,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
}

/// Row handed to the expiry-warning job: subscription plus owner contact.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpiringSubscription {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub plan: PlanKind,
    pub end_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
}
