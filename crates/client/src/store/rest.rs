//! `PostgREST` client for the hosted data store.

use std::sync::Arc;

use order_desk_core::{Customer, CustomerId, NewOrder, NewOrderLine, Order, OrderId, Product};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{DataStore, StoreError};
use crate::config::DeskConfig;

const REST_PREFIX: &str = "rest/v1/";

/// Client for the data store's REST interface.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct RestDataStore {
    inner: Arc<RestDataStoreInner>,
}

struct RestDataStoreInner {
    client: reqwest::Client,
    base: Url,
}

#[derive(Deserialize)]
struct InsertedId {
    id: OrderId,
}

impl RestDataStore {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value, the base URL
    /// cannot be extended with the REST prefix, or the HTTP client fails to
    /// build.
    pub fn new(config: &DeskConfig) -> Result<Self, StoreError> {
        let key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| StoreError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| StoreError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(RestDataStoreInner {
                client: builder.build()?,
                base: rest_base(&config.api_url)?,
            }),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.inner
            .base
            .join(table)
            .map_err(|e| StoreError::Parse(format!("Invalid table path {table}: {e}")))
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table)?;
        debug!(%url, ?query, "GET");

        let response = self.inner.client.get(url).query(query).send().await?;
        let body = read_success_body(response).await?;
        parse_rows(&body)
    }

    async fn insert<B: serde::Serialize + Sync>(
        &self,
        table: &str,
        query: &[(&str, &str)],
        prefer: &'static str,
        row: &B,
    ) -> Result<String, StoreError> {
        let url = self.table_url(table)?;
        debug!(%url, prefer, "POST");

        let response = self
            .inner
            .client
            .post(url)
            .query(query)
            .header("Prefer", prefer)
            // PostgREST bulk insert shape: an array of rows
            .json(&[row])
            .send()
            .await?;
        read_success_body(response).await
    }
}

impl DataStore for RestDataStore {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products: Vec<Product> = self.get_rows("products", &[("select", "*")]).await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn lookup_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let filter = format!("eq.{id}");
        let customers: Vec<Customer> = self
            .get_rows(
                "customers",
                &[("select", "id,customer_name,email"), ("id", filter.as_str())],
            )
            .await?;
        Ok(customers.into_iter().next())
    }

    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        let body = self
            .insert(
                "orders",
                &[("select", "id")],
                "return=representation",
                order,
            )
            .await?;
        let rows: Vec<InsertedId> = parse_rows(&body)?;
        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| StoreError::MissingRow("orders".to_string()))
    }

    #[instrument(skip(self, line), fields(order_id = %line.order_id, product_id = %line.product_id))]
    async fn create_order_line(&self, line: &NewOrderLine) -> Result<(), StoreError> {
        self.insert("orderproductmap", &[], "return=minimal", line)
            .await
            .map(|_| ())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.get_rows(
            "orders",
            &[
                ("select", "id,created_at,customer_id,orderdescription"),
                ("order", "created_at.desc"),
            ],
        )
        .await
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// `https://host[/path]` becomes `https://host[/path]/rest/v1/`.
fn rest_base(api_url: &Url) -> Result<Url, StoreError> {
    let mut base = api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(REST_PREFIX)
        .map_err(|e| StoreError::Parse(format!("Invalid API URL {api_url}: {e}")))
}

/// Turn a non-success response into a [`StoreError`], otherwise return the body.
async fn read_success_body(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(StoreError::RateLimited(retry_after));
    }

    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Data store returned non-success status"
        );
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: api_message(&body),
        });
    }

    Ok(body)
}

/// `PostgREST` errors carry a JSON `message`; fall back to the raw body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn parse_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))
}
