use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ServiceInvoice {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub service_type: String,
    pub amount: i64,
    pub issue_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: InvoiceStatus,
    pub reminder_sent: bool,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Invoice joined up the ownership chain for listing and detail views.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct InvoiceWithContext {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub service_type: String,
    pub amount: i64,
    pub issue_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: InvoiceStatus,
    pub reminder_sent: bool,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub unit_number: String,
    pub floor_number: i32,
    pub building_name: String,
}

/// Row handed to the overdue-invoice job: invoice plus customer contact.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverdueInvoice {
    pub id: Uuid,
    pub service_type: String,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub unit_number: String,
    pub building_name: String,
    pub customer_name: String,
    pub customer_email: String,
}
