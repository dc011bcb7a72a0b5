//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, NewOrderItem},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }

    async fn attach_items(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .items_repository
            .get_order_items_for_orders(tx, &order_uuids)
            .await?;

        let mut by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in orders {
            if let Some(items) = by_order.remove(&order.uuid) {
                order.items = items;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let today = Zoned::now().date();

        let (start_date, end_date) =
            order_range(&order.items, today).map_err(|_| OrdersServiceError::InvalidData)?;

        let mut tx = self.db.begin().await?;

        let uuid = OrderUuid::new();

        let mut created = self
            .orders_repository
            .create_order(&mut tx, uuid, &order, OrderStatus::Quote, start_date, end_date)
            .await?;

        for item in &order.items {
            let record = self
                .items_repository
                .create_order_item(&mut tx, uuid, item)
                .await?;

            created.items.push(record);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders_repository.get_order(&mut tx, order).await?;

        order.items = self
            .items_repository
            .get_order_items(&mut tx, order.uuid)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders_for_customer(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_orders_for_customer(&mut tx, customer)
            .await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders_for_vendor(
        &self,
        vendor: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_orders_for_vendor(&mut tx, vendor)
            .await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        updated.items = self
            .items_repository
            .get_order_items(&mut tx, updated.uuid)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

/// Order-level rental window: the earliest item start to the latest item
/// end. When no item carries dates at all, the window defaults to a
/// one-day rental starting tomorrow.
fn order_range(items: &[NewOrderItem], today: Date) -> Result<(Date, Date), jiff::Error> {
    let start = items.iter().filter_map(|item| item.start_date).min();
    let end = items.iter().filter_map(|item| item.end_date).max();

    let start = match start {
        Some(start) => start,
        None => today.tomorrow()?,
    };

    let end = match end {
        Some(end) => end,
        None => start.tomorrow()?,
    };

    Ok((start, end))
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates an order with its items. No availability enforcement
    /// happens here; the availability check is advisory and separate.
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by the given customer, newest first.
    async fn list_orders_for_customer(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders containing at least one product owned by the given vendor,
    /// newest first.
    async fn list_orders_for_vendor(
        &self,
        vendor: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Moves an order to the given status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{domain::products::records::ProductUuid, test::TestContext};

    use super::*;

    fn item(product: ProductUuid, quantity: u32, dates: Option<(Date, Date)>) -> NewOrderItem {
        NewOrderItem {
            product_uuid: product,
            quantity,
            price_at_booking: 15_00,
            start_date: dates.map(|(start, _)| start),
            end_date: dates.map(|(_, end)| end),
        }
    }

    fn new_order(customer: UserUuid, items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            customer_uuid: customer,
            items,
            total_amount: 0,
            shipping_address: None,
            contact_phone: None,
            notes: None,
        }
    }

    #[test]
    fn order_range_spans_min_start_to_max_end() -> TestResult {
        let items = vec![
            item(
                ProductUuid::new(),
                1,
                Some((date(2024, 6, 10), date(2024, 6, 12))),
            ),
            item(
                ProductUuid::new(),
                1,
                Some((date(2024, 6, 8), date(2024, 6, 11))),
            ),
        ];

        let (start, end) = order_range(&items, date(2024, 6, 1))?;

        assert_eq!(start, date(2024, 6, 8));
        assert_eq!(end, date(2024, 6, 12));

        Ok(())
    }

    #[test]
    fn order_range_defaults_to_one_day_rental_starting_tomorrow() -> TestResult {
        let items = vec![item(ProductUuid::new(), 1, None)];

        let (start, end) = order_range(&items, date(2024, 6, 1))?;

        assert_eq!(start, date(2024, 6, 2));
        assert_eq!(end, date(2024, 6, 3));

        Ok(())
    }

    #[test]
    fn order_range_with_starts_only_ends_a_day_after_the_earliest_start() -> TestResult {
        let mut only_start = item(ProductUuid::new(), 1, None);
        only_start.start_date = Some(date(2024, 6, 20));

        let (start, end) = order_range(&[only_start], date(2024, 6, 1))?;

        assert_eq!(start, date(2024, 6, 20));
        assert_eq!(end, date(2024, 6, 21));

        Ok(())
    }

    #[tokio::test]
    async fn place_order_persists_items_and_derived_dates() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = ctx.create_vendor().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_product(vendor, 5).await;

        let order = ctx
            .orders
            .place_order(new_order(
                customer,
                vec![
                    item(product.uuid, 2, Some((date(2024, 6, 10), date(2024, 6, 12)))),
                    item(product.uuid, 1, Some((date(2024, 6, 11), date(2024, 6, 15)))),
                ],
            ))
            .await?;

        assert_eq!(order.customer_uuid, customer);
        assert_eq!(order.status, OrderStatus::Quote);
        assert_eq!(order.start_date, date(2024, 6, 10));
        assert_eq!(order.end_date, date(2024, 6, 15));
        assert_eq!(order.items.len(), 2);

        let fetched = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(fetched.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_without_items_returns_empty_order() {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer().await;

        let result = ctx.orders.place_order(new_order(customer, vec![])).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyOrder)),
            "expected EmptyOrder, got {result:?}"
        );
    }

    #[tokio::test]
    async fn place_order_with_zero_quantity_returns_invalid_data() {
        let ctx = TestContext::new().await;
        let vendor = ctx.create_vendor().await;
        let customer = ctx.create_customer().await;

        let product = ctx.create_product(vendor, 5).await;

        let result = ctx
            .orders
            .place_order(new_order(customer, vec![item(product.uuid, 0, None)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn place_order_with_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer().await;

        let result = ctx
            .orders
            .place_order(new_order(customer, vec![item(ProductUuid::new(), 1, None)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_status_transitions_the_order() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = ctx.create_vendor().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_product(vendor, 5).await;

        let order = ctx
            .orders
            .place_order(new_order(customer, vec![item(product.uuid, 1, None)]))
            .await?;

        let confirmed = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Confirmed)
            .await?;

        assert_eq!(confirmed.status, OrderStatus::Confirmed);
        assert_eq!(confirmed.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .update_status(OrderUuid::new(), OrderStatus::Confirmed)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_orders_for_customer_excludes_other_customers() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = ctx.create_vendor().await;
        let customer_a = ctx.create_customer().await;
        let customer_b = ctx.create_customer().await;
        let product = ctx.create_product(vendor, 5).await;

        let mine = ctx
            .orders
            .place_order(new_order(customer_a, vec![item(product.uuid, 1, None)]))
            .await?;

        ctx.orders
            .place_order(new_order(customer_b, vec![item(product.uuid, 1, None)]))
            .await?;

        let orders = ctx.orders.list_orders_for_customer(customer_a).await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().map(|o| o.uuid), Some(mine.uuid));
        assert_eq!(orders.first().map(|o| o.items.len()), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_for_vendor_matches_product_ownership() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor_a = ctx.create_vendor().await;
        let vendor_b = ctx.create_vendor().await;
        let customer = ctx.create_customer().await;

        let product_a = ctx.create_product(vendor_a, 5).await;
        let product_b = ctx.create_product(vendor_b, 5).await;

        let with_mine = ctx
            .orders
            .place_order(new_order(customer, vec![item(product_a.uuid, 1, None)]))
            .await?;

        ctx.orders
            .place_order(new_order(customer, vec![item(product_b.uuid, 1, None)]))
            .await?;

        let orders = ctx.orders.list_orders_for_vendor(vendor_a).await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().map(|o| o.uuid), Some(with_mine.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_for_vendor_without_products_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = ctx.create_vendor().await;

        let orders = ctx.orders.list_orders_for_vendor(vendor).await?;

        assert!(orders.is_empty());

        Ok(())
    }
}
