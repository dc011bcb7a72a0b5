//! Invoice Handlers

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update_status;

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use hireline_app::domain::{
        invoices::records::{InvoiceLineRecord, InvoiceLineUuid, InvoiceRecord, InvoiceStatus, InvoiceUuid},
        orders::records::OrderUuid,
        users::records::UserUuid,
    };

    pub(super) fn make_invoice(
        uuid: InvoiceUuid,
        vendor: UserUuid,
        customer: UserUuid,
    ) -> InvoiceRecord {
        InvoiceRecord {
            uuid,
            invoice_number: "INV-20240610-ABC123".to_string(),
            order_uuid: OrderUuid::new(),
            vendor_uuid: vendor,
            customer_uuid: customer,
            amount: 20_00,
            status: InvoiceStatus::Pending,
            issued_at: Timestamp::UNIX_EPOCH,
            due_date: date(2024, 6, 10),
            lines: vec![InvoiceLineRecord {
                uuid: InvoiceLineUuid::new(),
                invoice_uuid: uuid,
                description: "Drill".to_string(),
                quantity: 2,
                unit_price: 10_00,
                total: 20_00,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
