use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::invoice::InvoiceStatus;

pub struct NewInvoice {
    pub unit_id: Uuid,
    pub service_type: String,
    pub amount: i64,
    pub issue_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: InvoiceStatus,
}

#[derive(Debug, Default)]
pub struct InvoicePatch {
    pub service_type: Option<String>,
    pub amount: Option<i64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl InvoicePatch {
    pub fn is_empty(&self) -> bool {
        self.service_type.is_none()
            && self.amount.is_none()
            && self.issue_date.is_none()
            && self.due_date.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }
}

/// Optional listing filters, all ANDed together.
#[derive(Debug, Default)]
pub struct InvoiceFilter {
    pub building_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
