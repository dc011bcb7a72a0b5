//! Get Invoice Handler

use std::sync::Arc;

use hireline_app::domain::{
    invoices::records::{InvoiceLineRecord, InvoiceRecord},
    users::records::Role,
};
use salvo::{oapi::{ToSchema, extract::PathParam}, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, invoices::errors::into_status_error, state::State};

/// Invoice Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvoiceLineResponse {
    pub description: String,
    pub quantity: u32,

    /// Unit price in minor currency units
    pub unit_price: u64,

    /// Line total in minor currency units
    pub total: u64,
}

impl From<InvoiceLineRecord> for InvoiceLineResponse {
    fn from(line: InvoiceLineRecord) -> Self {
        InvoiceLineResponse {
            description: line.description,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total,
        }
    }
}

/// Invoice Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvoiceResponse {
    pub uuid: Uuid,

    /// Human-readable invoice number
    pub invoice_number: String,

    pub order_uuid: Uuid,
    pub vendor_uuid: Uuid,
    pub customer_uuid: Uuid,

    /// Invoice total in minor currency units
    pub amount: u64,

    /// Settlement status: pending or paid
    pub status: String,

    pub issued_at: String,

    /// Due date, ISO-8601; the order's rental start
    pub due_date: String,

    pub lines: Vec<InvoiceLineResponse>,
    pub created_at: String,
}

impl From<InvoiceRecord> for InvoiceResponse {
    fn from(invoice: InvoiceRecord) -> Self {
        InvoiceResponse {
            uuid: invoice.uuid.into(),
            invoice_number: invoice.invoice_number,
            order_uuid: invoice.order_uuid.into(),
            vendor_uuid: invoice.vendor_uuid.into(),
            customer_uuid: invoice.customer_uuid.into(),
            amount: invoice.amount,
            status: invoice.status.to_string(),
            issued_at: invoice.issued_at.to_string(),
            due_date: invoice.due_date.to_string(),
            lines: invoice.lines.into_iter().map(Into::into).collect(),
            created_at: invoice.created_at.to_string(),
        }
    }
}

/// Get Invoice Handler
///
/// Returns an invoice. Only the billed customer, the invoicing vendor, and
/// admins may read it.
#[endpoint(
    tags("invoices"),
    summary = "Get Invoice",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    invoice: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<InvoiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let invoice = state
        .app
        .invoices
        .get_invoice(invoice.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let is_party = invoice.vendor_uuid == user.uuid || invoice.customer_uuid == user.uuid;

    if !is_party && user.role != Role::Admin {
        return Err(StatusError::forbidden().brief("Not a party to this invoice"));
    }

    Ok(Json(invoice.into()))
}
