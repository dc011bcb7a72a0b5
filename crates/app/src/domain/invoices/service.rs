//! Invoices service.
//!
//! Invoices are generated when an order is confirmed: the order's items are
//! grouped by the vendor owning each product, and each vendor group that has
//! not already been invoiced for the order gets one invoice.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};
use tracing::error;

use crate::{
    database::Db,
    domain::{
        invoices::{
            errors::InvoicesServiceError,
            records::{InvoiceLineRecord, InvoiceRecord, InvoiceStatus, InvoiceUuid},
            repository::PgInvoicesRepository,
        },
        orders::{
            PgOrderItemsRepository, PgOrdersRepository,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
        },
        products::{PgProductsRepository, records::ProductRecord},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgInvoicesService {
    db: Db,
    repository: PgInvoicesRepository,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgInvoicesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgInvoicesRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Create the invoice for one vendor's share of an order.
    ///
    /// Returns `Ok(None)` when the (order, vendor) pair is already
    /// invoiced. The existence check and the insert run in the same
    /// transaction but nothing serialises concurrent callers.
    async fn invoice_vendor_group(
        &self,
        order: &OrderRecord,
        vendor: UserUuid,
        group: &[(OrderItemRecord, ProductRecord)],
    ) -> Result<Option<InvoiceRecord>, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .find_invoice_for_order_and_vendor(&mut tx, order.uuid, vendor)
            .await?;

        if existing.is_some() {
            tx.commit().await?;

            return Ok(None);
        }

        let amount: u64 = group
            .iter()
            .map(|(item, _)| u64::from(item.quantity) * item.price_at_booking)
            .sum();

        let uuid = InvoiceUuid::new();
        let number = invoice_number(Zoned::now().date());

        let mut invoice = self
            .repository
            .create_invoice(
                &mut tx,
                uuid,
                &number,
                order.uuid,
                vendor,
                order.customer_uuid,
                amount,
                order.start_date,
            )
            .await?;

        for (item, product) in group {
            let line = self
                .repository
                .create_invoice_line(
                    &mut tx,
                    uuid,
                    &product.name,
                    item.quantity,
                    item.price_at_booking,
                )
                .await?;

            invoice.lines.push(line);
        }

        tx.commit().await?;

        Ok(Some(invoice))
    }

    async fn attach_lines(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        invoices: &mut [InvoiceRecord],
    ) -> Result<(), sqlx::Error> {
        let invoice_uuids: Vec<InvoiceUuid> =
            invoices.iter().map(|invoice| invoice.uuid).collect();

        let lines = self
            .repository
            .get_invoice_lines_for_invoices(tx, &invoice_uuids)
            .await?;

        let mut by_invoice: BTreeMap<InvoiceUuid, Vec<InvoiceLineRecord>> = BTreeMap::new();

        for line in lines {
            by_invoice.entry(line.invoice_uuid).or_default().push(line);
        }

        for invoice in invoices {
            if let Some(lines) = by_invoice.remove(&invoice.uuid) {
                invoice.lines = lines;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl InvoicesService for PgInvoicesService {
    async fn generate_for_order(
        &self,
        order: OrderUuid,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;

        let items = self
            .items_repository
            .get_order_items(&mut tx, order.uuid)
            .await?;

        let mut groups: BTreeMap<UserUuid, Vec<(OrderItemRecord, ProductRecord)>> =
            BTreeMap::new();

        for item in items {
            let product = self
                .products_repository
                .get_product(&mut tx, item.product_uuid)
                .await?;

            groups.entry(product.vendor_uuid).or_default().push((item, product));
        }

        tx.commit().await?;

        let mut created = Vec::new();

        for (vendor, group) in groups {
            match self.invoice_vendor_group(&order, vendor, &group).await {
                Ok(Some(invoice)) => created.push(invoice),
                // Already invoiced for this (order, vendor) pair.
                Ok(None) => {}
                // Best effort per vendor group: invoices already created for
                // this order stay in place, the remaining groups still run.
                Err(source) => {
                    error!(
                        "failed to create invoice for vendor {vendor} on order {order}: {source}",
                        order = order.uuid,
                    );
                }
            }
        }

        Ok(created)
    }

    async fn get_invoice(
        &self,
        invoice: InvoiceUuid,
    ) -> Result<InvoiceRecord, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut invoice = self.repository.get_invoice(&mut tx, invoice).await?;

        invoice.lines = self
            .repository
            .get_invoice_lines(&mut tx, invoice.uuid)
            .await?;

        tx.commit().await?;

        Ok(invoice)
    }

    async fn list_invoices_for_vendor(
        &self,
        vendor: UserUuid,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut invoices = self
            .repository
            .list_invoices_for_vendor(&mut tx, vendor)
            .await?;

        self.attach_lines(&mut tx, &mut invoices).await?;

        tx.commit().await?;

        Ok(invoices)
    }

    async fn list_invoices_for_customer(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut invoices = self
            .repository
            .list_invoices_for_customer(&mut tx, customer)
            .await?;

        self.attach_lines(&mut tx, &mut invoices).await?;

        tx.commit().await?;

        Ok(invoices)
    }

    async fn update_status(
        &self,
        invoice: InvoiceUuid,
        status: InvoiceStatus,
    ) -> Result<InvoiceRecord, InvoicesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut updated = self
            .repository
            .update_invoice_status(&mut tx, invoice, status)
            .await?;

        updated.lines = self
            .repository
            .get_invoice_lines(&mut tx, updated.uuid)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

/// Human-readable invoice number, e.g. `INV-20260806-X4K2PQ`.
fn invoice_number(issued_on: Date) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();

    format!("INV-{}-{suffix}", issued_on.strftime("%Y%m%d"))
}

#[automock]
#[async_trait]
pub trait InvoicesService: Send + Sync {
    /// Generate invoices for every vendor involved in the order that has
    /// not been invoiced for it yet. Returns the invoices created by this
    /// call; an empty vector means every vendor was already invoiced.
    async fn generate_for_order(
        &self,
        order: OrderUuid,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError>;

    /// Retrieve a single invoice with its lines.
    async fn get_invoice(&self, invoice: InvoiceUuid)
    -> Result<InvoiceRecord, InvoicesServiceError>;

    /// Invoices addressed to the given vendor, newest first.
    async fn list_invoices_for_vendor(
        &self,
        vendor: UserUuid,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError>;

    /// Invoices billed to the given customer, newest first.
    async fn list_invoices_for_customer(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<InvoiceRecord>, InvoicesServiceError>;

    /// Moves an invoice to the given settlement status.
    async fn update_status(
        &self,
        invoice: InvoiceUuid,
        status: InvoiceStatus,
    ) -> Result<InvoiceRecord, InvoicesServiceError>;
}
