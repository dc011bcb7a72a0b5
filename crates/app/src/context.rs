//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenCodec},
    database::{self, Db},
    domain::{
        availability::{AvailabilityService, PgAvailabilityService},
        invoices::{InvoicesService, PgInvoicesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub availability: Arc<dyn AvailabilityService>,
    pub invoices: Arc<dyn InvoicesService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, codec: TokenCodec) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            availability: Arc::new(PgAvailabilityService::new(db.clone())),
            invoices: Arc::new(PgInvoicesService::new(db)),
            users: Arc::new(PgUsersService::new(pool.clone())),
            auth: Arc::new(PgAuthService::new(pool, codec)),
        })
    }
}
