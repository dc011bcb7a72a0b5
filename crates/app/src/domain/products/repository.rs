//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid, RentalPeriod},
    },
    users::records::UserUuid,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_PRODUCTS_FOR_VENDOR_SQL: &str = include_str!("sql/list_products_for_vendor.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<&str>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products_for_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_FOR_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(vendor.into_uuid())
            .bind(&product.name)
            .bind(&product.category)
            .bind(try_into_amount(product.base_price, "base_price")?)
            .bind(product.rental_period.as_str())
            .bind(i64::from(product.total_stock))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&update.name)
            .bind(&update.category)
            .bind(try_into_amount(update.base_price, "base_price")?)
            .bind(update.rental_period.as_str())
            .bind(i64::from(update.total_stock))
            .bind(update.is_rentable)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_into_amount(value: u64, index: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let base_price_i64: i64 = row.try_get("base_price")?;

        let base_price = u64::try_from(base_price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "base_price".to_string(),
            source: Box::new(e),
        })?;

        let total_stock_i32: i32 = row.try_get("total_stock")?;

        let total_stock = u32::try_from(total_stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_stock".to_string(),
            source: Box::new(e),
        })?;

        let rental_period = row
            .try_get::<String, _>("rental_period")?
            .parse::<RentalPeriod>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "rental_period".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            vendor_uuid: UserUuid::from_uuid(row.try_get("vendor_uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            base_price,
            rental_period,
            total_stock,
            is_rentable: row.try_get("is_rentable")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
