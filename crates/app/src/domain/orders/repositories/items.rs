//! Order Items Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::{
        data::NewOrderItem,
        records::{OrderItemRecord, OrderItemUuid, OrderStatus, OrderUuid},
        reservation::ActiveReservation,
    },
    products::records::ProductUuid,
};

use super::orders::{try_bind_amount, try_get_amount};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const GET_ORDER_ITEMS_FOR_ORDERS_SQL: &str = include_str!("../sql/get_order_items_for_orders.sql");
const LIST_ACTIVE_RESERVATIONS_SQL: &str = include_str!("../sql/list_active_reservations.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(i64::from(item.quantity))
            .bind(try_bind_amount(item.price_at_booking)?)
            .bind(item.start_date.map(SqlxDate::from))
            .bind(item.end_date.map(SqlxDate::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items_for_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let order_uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_FOR_ORDERS_SQL)
            .bind(order_uuids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Every order item for the product whose parent order is in an
    /// active status, together with the order-level fallback window.
    ///
    /// Date filtering deliberately stays out of this query: the effective
    /// interval of each item is resolved in application code, so overlaps
    /// that exist only at the item level are never missed.
    pub(crate) async fn list_active_reservations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ActiveReservation>, sqlx::Error> {
        let statuses: Vec<String> = OrderStatus::ACTIVE
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();

        query_as::<Postgres, ActiveReservation>(LIST_ACTIVE_RESERVATIONS_SQL)
            .bind(product.into_uuid())
            .bind(statuses)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity,
            price_at_booking: try_get_amount(row, "price_at_booking")?,
            start_date: row
                .try_get::<Option<SqlxDate>, _>("start_date")?
                .map(SqlxDate::to_jiff),
            end_date: row
                .try_get::<Option<SqlxDate>, _>("end_date")?
                .map(SqlxDate::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveReservation {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            quantity,
            item_start: row
                .try_get::<Option<SqlxDate>, _>("item_start")?
                .map(SqlxDate::to_jiff),
            item_end: row
                .try_get::<Option<SqlxDate>, _>("item_end")?
                .map(SqlxDate::to_jiff),
            order_start: row.try_get::<SqlxDate, _>("order_start")?.to_jiff(),
            order_end: row.try_get::<SqlxDate, _>("order_end")?.to_jiff(),
        })
    }
}
