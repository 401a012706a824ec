//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    domain::products::{
        ProductsServiceError,
        data::{Category, NewProduct, ProductFilter, ProductSort, ProductUpdate, Size},
        records::{CategorySummary, ProductRecord, ProductUuid},
    },
    pagination::PageRequest,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_STOCK_SQL: &str = include_str!("sql/set_stock.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const PRODUCT_CATEGORIES_SQL: &str = include_str!("sql/product_categories.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_products(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let offset = i64::try_from(page.offset())?;

        let products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(Category::as_str))
            .bind(filter.search_pattern())
            .bind(sort.as_str())
            .bind(i64::from(page.limit()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub(crate) async fn count_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<u64, ProductsServiceError> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(filter.category.map(Category::as_str))
            .bind(filter.search_pattern())
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count)?)
    }

    pub(crate) async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = i64::try_from(product.price)?;
        let original_price = product.original_price.map(i64::try_from).transpose()?;

        let created = query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(product.category.as_str())
            .bind(&product.image)
            .bind(&product.short_description)
            .bind(&product.full_description)
            .bind(&product.features)
            .bind(price)
            .bind(original_price)
            .bind(i16::from(product.discount))
            .bind(product.in_stock)
            .bind(size_names(&product.sizes))
            .bind(&product.colors)
            .bind(&product.material)
            .bind(product.blouse_length.as_deref())
            .bind(product.saree_length.as_deref())
            .bind(&product.care_instructions)
            .bind(&product.tags)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    pub(crate) async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = update.price.map(i64::try_from).transpose()?;
        let original_price = update.original_price.map(i64::try_from).transpose()?;

        let updated = query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.category.map(Category::as_str))
            .bind(update.image.as_deref())
            .bind(update.short_description.as_deref())
            .bind(update.full_description.as_deref())
            .bind(update.features.as_deref())
            .bind(price)
            .bind(original_price)
            .bind(update.discount.map(i16::from))
            .bind(update.in_stock)
            .bind(update.sizes.as_deref().map(size_names))
            .bind(update.colors.as_deref())
            .bind(update.material.as_deref())
            .bind(update.blouse_length.as_deref())
            .bind(update.saree_length.as_deref())
            .bind(update.care_instructions.as_deref())
            .bind(update.tags.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    pub(crate) async fn set_stock(
        &self,
        product: ProductUuid,
        in_stock: bool,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(in_stock)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn delete_product(&self, product: ProductUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn categories(&self) -> Result<Vec<CategorySummary>, sqlx::Error> {
        query_as::<Postgres, CategorySummary>(PRODUCT_CATEGORIES_SQL)
            .fetch_all(&self.pool)
            .await
    }
}

fn size_names(sizes: &[Size]) -> Vec<&'static str> {
    sizes.iter().map(|size| size.as_str()).collect()
}

fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category = row
            .try_get::<String, _>("category")?
            .parse()
            .map_err(|error| decode_error("category", error))?;

        let sizes = row
            .try_get::<Vec<String>, _>("sizes")?
            .iter()
            .map(|size| size.parse::<Size>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| decode_error("sizes", error))?;

        let price = u64::try_from(row.try_get::<i64, _>("price")?)
            .map_err(|error| decode_error("price", error))?;

        let original_price = row
            .try_get::<Option<i64>, _>("original_price")?
            .map(u64::try_from)
            .transpose()
            .map_err(|error| decode_error("original_price", error))?;

        let discount = u8::try_from(row.try_get::<i16, _>("discount")?)
            .map_err(|error| decode_error("discount", error))?;

        let review_count = u32::try_from(row.try_get::<i32, _>("review_count")?)
            .map_err(|error| decode_error("review_count", error))?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            name: row.try_get("name")?,
            category,
            image: row.try_get("image")?,
            short_description: row.try_get("short_description")?,
            full_description: row.try_get("full_description")?,
            features: row.try_get("features")?,
            price,
            original_price,
            discount,
            in_stock: row.try_get("in_stock")?,
            sizes,
            colors: row.try_get("colors")?,
            material: row.try_get("material")?,
            blouse_length: row.try_get("blouse_length")?,
            saree_length: row.try_get("saree_length")?,
            care_instructions: row.try_get("care_instructions")?,
            tags: row.try_get("tags")?,
            rating: row.try_get("rating")?,
            review_count,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategorySummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category = row
            .try_get::<String, _>("category")?
            .parse()
            .map_err(|error| decode_error("category", error))?;

        let count = u64::try_from(row.try_get::<i64, _>("count")?)
            .map_err(|error| decode_error("count", error))?;

        Ok(Self { category, count })
    }
}
