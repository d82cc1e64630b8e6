//! Catalog data access: product CRUD and paginated listing.
//!
//! The client keeps a local reflection of the last fetched page so the UI
//! layer can render without a reload after every write: `list` replaces the
//! cache wholesale, `create`/`update`/`delete` patch it incrementally. The
//! cache is advisory read-after-write state, not a consistency guarantee —
//! the server remains authoritative and a fresh `list` supersedes it all.

pub mod types;

use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

use crate::errors::{check, ApiError};
use self::types::{Product, ProductPage, ProductQuery};

/// Façade over `/products` holding the observable client-side state:
/// current item list, current page metadata, loading flag, last error
/// message. Every operation brackets itself: loading on + error cleared,
/// network call, then success mutation or a stored readable message — and
/// failures always re-raise so callers keep full error visibility.
pub struct CatalogClient {
    http: ClientWithMiddleware,
    base: String,
    products: Vec<Product>,
    page: Option<ProductPage>,
    loading: bool,
    error: Option<String>,
}

impl CatalogClient {
    pub fn new(http: ClientWithMiddleware, api_url: &str) -> Self {
        Self {
            http,
            base: format!("{api_url}/products"),
            products: Vec::new(),
            page: None,
            loading: false,
            error: None,
        }
    }

    // ── Observable state ─────────────────────────────────────

    /// Items of the current page, as last mutated by an operation.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Metadata of the last successful listing, if any.
    pub fn page(&self) -> Option<&ProductPage> {
        self.page.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Readable message from the last failed operation, cleared when a new
    /// operation starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Operations ───────────────────────────────────────────

    /// Fetches one page of products. On success both the item list and the
    /// page metadata are replaced wholesale with the server's response.
    pub async fn list(&mut self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        self.begin();
        match self.fetch_page(query).await {
            Ok(page) => {
                self.products = page.content.clone();
                self.page = Some(page.clone());
                self.loading = false;
                debug!(
                    returned = page.content.len(),
                    total = page.total_elements,
                    page = page.number,
                    "product page loaded"
                );
                Ok(page)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Fetches a single product. Does not touch the cached list or page.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Product, ApiError> {
        self.begin();
        match self.fetch_one(id).await {
            Ok(product) => {
                self.loading = false;
                Ok(product)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Creates a product. On success the created item is prepended to the
    /// local list and the cached total count grows by one (when a page has
    /// been fetched before).
    pub async fn create(&mut self, payload: &Product) -> Result<Product, ApiError> {
        self.begin();
        match self.post_product(payload).await {
            Ok(created) => {
                self.products.insert(0, created.clone());
                if let Some(p) = self.page.as_mut() {
                    p.total_elements += 1;
                }
                self.loading = false;
                Ok(created)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Updates a product. On success the matching local item (by id) is
    /// replaced in place; page metadata is untouched.
    pub async fn update(&mut self, id: i64, payload: &Product) -> Result<Product, ApiError> {
        self.begin();
        match self.put_product(id, payload).await {
            Ok(updated) => {
                for item in &mut self.products {
                    if item.id == updated.id {
                        *item = updated.clone();
                    }
                }
                self.loading = false;
                Ok(updated)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Deletes a product. On success the matching local item is removed and
    /// the cached total count shrinks by one, floored at zero. Deleting an
    /// id that is not in the local list still floors the count, removing
    /// nothing.
    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.begin();
        match self.delete_product(id).await {
            Ok(()) => {
                self.products.retain(|p| p.id != Some(id));
                if let Some(p) = self.page.as_mut() {
                    p.total_elements = p.total_elements.saturating_sub(1);
                }
                self.loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    // ── Bracket + network plumbing ───────────────────────────

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, err: ApiError) -> ApiError {
        self.error = Some(err.readable_message());
        self.loading = false;
        err
    }

    async fn fetch_page(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let resp = self
            .http
            .get(&self.base)
            .query(&query.to_params())
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn fetch_one(&self, id: i64) -> Result<Product, ApiError> {
        let resp = self.http.get(format!("{}/{id}", self.base)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn post_product(&self, payload: &Product) -> Result<Product, ApiError> {
        let resp = self.http.post(&self.base).json(payload).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn put_product(&self, id: i64, payload: &Product) -> Result<Product, ApiError> {
        let resp = self
            .http
            .put(format!("{}/{id}", self.base))
            .json(payload)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(format!("{}/{id}", self.base))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}
