//! Order metadata repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use store_decision_core::{OrderId, OrderStoreMetadata, ShippingMethod, StoreId};

use crate::orders::{OrderMetadataError, OrderMetadataStore};

/// Order metadata in the `order_store_metadata` table.
#[derive(Debug, Clone)]
pub struct PgOrderMetadataStore {
    pool: PgPool,
}

impl PgOrderMetadataStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_store(raw: &str) -> Result<StoreId, OrderMetadataError> {
    StoreId::parse(raw).map_err(|e| {
        OrderMetadataError::DataCorruption(format!("invalid store in database: {e}"))
    })
}

#[async_trait]
impl OrderMetadataStore for PgOrderMetadataStore {
    async fn upsert(&self, metadata: &OrderStoreMetadata) -> Result<(), OrderMetadataError> {
        sqlx::query(
            r"
            INSERT INTO order_store_metadata (
                order_id, store_final, effective_store_final, is_future_date,
                payment_account_stripe, payment_account_pagarme, shipping_method,
                pickup_store, pickup_store_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (order_id) DO UPDATE SET
                store_final = EXCLUDED.store_final,
                effective_store_final = EXCLUDED.effective_store_final,
                is_future_date = EXCLUDED.is_future_date,
                payment_account_stripe = EXCLUDED.payment_account_stripe,
                payment_account_pagarme = EXCLUDED.payment_account_pagarme,
                shipping_method = EXCLUDED.shipping_method,
                pickup_store = EXCLUDED.pickup_store,
                pickup_store_id = EXCLUDED.pickup_store_id,
                updated_at = NOW()
            ",
        )
        .bind(metadata.order_id)
        .bind(metadata.store_final.name())
        .bind(metadata.effective_store_final.name())
        .bind(metadata.is_future_date)
        .bind(&metadata.stripe_account)
        .bind(&metadata.pagarme_account)
        .bind(metadata.shipping_method.as_str())
        .bind(metadata.pickup_store.map(StoreId::name))
        .bind(metadata.pickup_store_id.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<OrderStoreMetadata>, OrderMetadataError> {
        let row = sqlx::query(
            r"
            SELECT order_id, store_final, effective_store_final, is_future_date,
                   payment_account_stripe, payment_account_pagarme, shipping_method,
                   pickup_store, pickup_store_id
            FROM order_store_metadata
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let pickup_store = row
            .try_get::<Option<String>, _>("pickup_store")?
            .as_deref()
            .map(parse_store)
            .transpose()?;

        Ok(Some(OrderStoreMetadata {
            order_id: row.try_get("order_id")?,
            store_final: parse_store(row.try_get("store_final")?)?,
            effective_store_final: parse_store(row.try_get("effective_store_final")?)?,
            is_future_date: row.try_get("is_future_date")?,
            stripe_account: row.try_get("payment_account_stripe")?,
            pagarme_account: row.try_get("payment_account_pagarme")?,
            shipping_method: ShippingMethod::from_request(Some(row.try_get("shipping_method")?)),
            pickup_store,
            pickup_store_id: row.try_get("pickup_store_id")?,
        }))
    }
}
