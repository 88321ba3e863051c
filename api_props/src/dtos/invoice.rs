use chrono::{DateTime, Utc};
use db::models::invoice::InvoiceStatus;
use serde::Deserialize;
use uuid::Uuid;

/// Listing filters from the query string, all ANDed together.
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListQuery {
    pub building_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub unit_id: Uuid,
    pub service_type: String,
    pub amount: i64,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub service_type: Option<String>,
    pub amount: Option<i64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub status: Option<InvoiceStatus>,
}
