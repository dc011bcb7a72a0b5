//! Availability service: the reservation ledger query.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        availability::{errors::AvailabilityServiceError, records::Availability},
        orders::{PgOrderItemsRepository, reservation::{DateRange, reserved_quantity}},
        products::{PgProductsRepository, records::ProductUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgAvailabilityService {
    db: Db,
    products_repository: PgProductsRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgAvailabilityService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products_repository: PgProductsRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl AvailabilityService for PgAvailabilityService {
    async fn check_availability(
        &self,
        product: ProductUuid,
        range: DateRange,
        quantity: u32,
    ) -> Result<Availability, AvailabilityServiceError> {
        if quantity == 0 {
            return Err(AvailabilityServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let product = self.products_repository.get_product(&mut tx, product).await?;

        let reservations = self
            .items_repository
            .list_active_reservations(&mut tx, product.uuid)
            .await?;

        tx.commit().await?;

        let reserved = reserved_quantity(&reservations, range);

        // May be negative when the ledger is overbooked; the comparison
        // must still come out false, so stay in signed arithmetic.
        let remaining = i64::from(product.total_stock) - i64::from(reserved);

        Ok(Availability {
            available: remaining >= i64::from(quantity),
            reserved,
            total: product.total_stock,
        })
    }
}

#[automock]
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Answer whether `quantity` units of the product are free over the
    /// requested window.
    ///
    /// Read-only and advisory: the result reflects the ledger at query
    /// time and nothing prevents a competing booking from landing before
    /// a follow-up order does.
    async fn check_availability(
        &self,
        product: ProductUuid,
        range: DateRange,
        quantity: u32,
    ) -> Result<Availability, AvailabilityServiceError>;
}
