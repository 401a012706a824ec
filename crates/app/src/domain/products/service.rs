//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    domain::products::{
        data::{NewProduct, ProductFilter, ProductSort, ProductUpdate},
        errors::ProductsServiceError,
        records::{CategorySummary, ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
    pagination::{Page, PageRequest},
};

/// Default catalog page size.
pub const DEFAULT_PRODUCTS_PAGE_LIMIT: u32 = 12;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgProductsRepository::new(pool),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let products = self.repository.list_products(&filter, sort, page).await?;
        let total = self.repository.count_products(&filter).await?;

        Ok(Page::new(products, page, total))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        Ok(self.repository.get_product(product).await?)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        self.repository.create_product(&product).await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate()?;

        self.repository.update_product(product, &update).await
    }

    async fn set_stock(
        &self,
        product: ProductUuid,
        in_stock: bool,
    ) -> Result<ProductRecord, ProductsServiceError> {
        Ok(self.repository.set_stock(product, in_stock).await?)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let rows_affected = self.repository.delete_product(product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }

    async fn categories(&self) -> Result<Vec<CategorySummary>, ProductsServiceError> {
        Ok(self.repository.categories().await?)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Filtered, sorted, paginated catalog listing.
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Patch a product. Absent fields are left untouched.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    async fn set_stock(
        &self,
        product: ProductUuid,
        in_stock: bool,
    ) -> Result<ProductRecord, ProductsServiceError>;

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Product counts per category, largest first.
    async fn categories(&self) -> Result<Vec<CategorySummary>, ProductsServiceError>;
}
