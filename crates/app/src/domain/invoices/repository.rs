//! Invoices Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    invoices::records::{
        InvoiceLineRecord, InvoiceLineUuid, InvoiceRecord, InvoiceStatus, InvoiceUuid,
    },
    orders::records::OrderUuid,
    users::records::UserUuid,
};

const CREATE_INVOICE_SQL: &str = include_str!("sql/create_invoice.sql");
const CREATE_INVOICE_LINE_SQL: &str = include_str!("sql/create_invoice_line.sql");
const GET_INVOICE_SQL: &str = include_str!("sql/get_invoice.sql");
const FIND_INVOICE_FOR_ORDER_AND_VENDOR_SQL: &str =
    include_str!("sql/find_invoice_for_order_and_vendor.sql");
const LIST_INVOICES_FOR_VENDOR_SQL: &str = include_str!("sql/list_invoices_for_vendor.sql");
const LIST_INVOICES_FOR_CUSTOMER_SQL: &str = include_str!("sql/list_invoices_for_customer.sql");
const GET_INVOICE_LINES_SQL: &str = include_str!("sql/get_invoice_lines.sql");
const GET_INVOICE_LINES_FOR_INVOICES_SQL: &str =
    include_str!("sql/get_invoice_lines_for_invoices.sql");
const UPDATE_INVOICE_STATUS_SQL: &str = include_str!("sql/update_invoice_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInvoicesRepository;

impl PgInvoicesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[expect(clippy::too_many_arguments, reason = "one bind per invoice column")]
    pub(crate) async fn create_invoice(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceUuid,
        invoice_number: &str,
        order: OrderUuid,
        vendor: UserUuid,
        customer: UserUuid,
        amount: u64,
        due_date: Date,
    ) -> Result<InvoiceRecord, sqlx::Error> {
        let amount_i64 = i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, InvoiceRecord>(CREATE_INVOICE_SQL)
            .bind(invoice.into_uuid())
            .bind(invoice_number)
            .bind(order.into_uuid())
            .bind(vendor.into_uuid())
            .bind(customer.into_uuid())
            .bind(amount_i64)
            .bind(SqlxDate::from(due_date))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_invoice_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceUuid,
        description: &str,
        quantity: u32,
        unit_price: u64,
    ) -> Result<InvoiceLineRecord, sqlx::Error> {
        let unit_price_i64 = i64::try_from(unit_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "unit_price".to_string(),
            source: Box::new(e),
        })?;

        let total = unit_price_i64.saturating_mul(i64::from(quantity));

        query_as::<Postgres, InvoiceLineRecord>(CREATE_INVOICE_LINE_SQL)
            .bind(InvoiceLineUuid::new().into_uuid())
            .bind(invoice.into_uuid())
            .bind(description)
            .bind(i64::from(quantity))
            .bind(unit_price_i64)
            .bind(total)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_invoice(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceUuid,
    ) -> Result<InvoiceRecord, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(GET_INVOICE_SQL)
            .bind(invoice.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_invoice_for_order_and_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        vendor: UserUuid,
    ) -> Result<Option<InvoiceRecord>, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(FIND_INVOICE_FOR_ORDER_AND_VENDOR_SQL)
            .bind(order.into_uuid())
            .bind(vendor.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_invoices_for_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
    ) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(LIST_INVOICES_FOR_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_invoices_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(LIST_INVOICES_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_invoice_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceUuid,
    ) -> Result<Vec<InvoiceLineRecord>, sqlx::Error> {
        query_as::<Postgres, InvoiceLineRecord>(GET_INVOICE_LINES_SQL)
            .bind(invoice.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_invoice_lines_for_invoices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoices: &[InvoiceUuid],
    ) -> Result<Vec<InvoiceLineRecord>, sqlx::Error> {
        let invoice_uuids: Vec<Uuid> = invoices
            .iter()
            .map(|invoice| invoice.into_uuid())
            .collect();

        query_as::<Postgres, InvoiceLineRecord>(GET_INVOICE_LINES_FOR_INVOICES_SQL)
            .bind(invoice_uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_invoice_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice: InvoiceUuid,
        status: InvoiceStatus,
    ) -> Result<InvoiceRecord, sqlx::Error> {
        query_as::<Postgres, InvoiceRecord>(UPDATE_INVOICE_STATUS_SQL)
            .bind(invoice.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

fn try_get_u64(row: &PgRow, index: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(index)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for InvoiceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<InvoiceStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: InvoiceUuid::from_uuid(row.try_get("uuid")?),
            invoice_number: row.try_get("invoice_number")?,
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            vendor_uuid: UserUuid::from_uuid(row.try_get("vendor_uuid")?),
            customer_uuid: UserUuid::from_uuid(row.try_get("customer_uuid")?),
            amount: try_get_u64(row, "amount")?,
            status,
            issued_at: row.try_get::<SqlxTimestamp, _>("issued_at")?.to_jiff(),
            due_date: row.try_get::<SqlxDate, _>("due_date")?.to_jiff(),
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for InvoiceLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: InvoiceLineUuid::from_uuid(row.try_get("uuid")?),
            invoice_uuid: InvoiceUuid::from_uuid(row.try_get("invoice_uuid")?),
            description: row.try_get("description")?,
            quantity,
            unit_price: try_get_u64(row, "unit_price")?,
            total: try_get_u64(row, "total")?,
        })
    }
}
