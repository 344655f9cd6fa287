//! Client state wired from configuration.

use order_desk_core::{Customer, Order};
use tracing::{debug, warn};

use crate::cart::CartStore;
use crate::config::DeskConfig;
use crate::error::DeskError;
use crate::local::FileStore;
use crate::search::Catalog;
use crate::store::{DataStore, RestDataStore};
use crate::submit::{OrderSubmitter, resolve_customer};

/// Everything one client session needs: configuration, the remote store and
/// the cart persisted under the configured data directory.
pub struct DeskState {
    config: DeskConfig,
    store: RestDataStore,
    cart: CartStore<FileStore>,
}

impl DeskState {
    /// Build the data store client and load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the data
    /// directory cannot be created.
    pub fn open(config: DeskConfig) -> Result<Self, DeskError> {
        let store = RestDataStore::new(&config).map_err(DeskError::Client)?;
        let local = FileStore::open(&config.data_dir)?;
        debug!(dir = %local.dir().display(), "Local store opened");
        let cart = CartStore::load(local);

        Ok(Self {
            config,
            store,
            cart,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &DeskConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &RestDataStore {
        &self.store
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<FileStore> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<FileStore> {
        &mut self.cart
    }

    /// Fetch the product catalog.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::FetchFailed`] if the listing fails.
    pub async fn catalog(&self) -> Result<Catalog, DeskError> {
        Catalog::fetch(&self.store).await
    }

    /// Look up the configured customer.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::FetchFailed`] if the lookup fails.
    pub async fn customer(&self) -> Result<Option<Customer>, DeskError> {
        resolve_customer(&self.store, self.config.customer_id).await
    }

    /// List stored orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::FetchFailed`] if the listing fails.
    pub async fn orders(&self) -> Result<Vec<Order>, DeskError> {
        self.store.list_orders().await.map_err(|e| {
            warn!(error = %e, "Order history fetch failed");
            DeskError::FetchFailed(e)
        })
    }

    /// A submitter using the configured order description, plus the cart it
    /// submits from.
    pub fn submitter(&mut self) -> (OrderSubmitter<'_, RestDataStore>, &mut CartStore<FileStore>) {
        let submitter =
            OrderSubmitter::with_description(&self.store, self.config.order_description.clone());
        (submitter, &mut self.cart)
    }
}
