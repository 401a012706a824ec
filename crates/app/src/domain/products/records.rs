//! Product Records

use jiff::Timestamp;

use crate::{
    domain::products::data::{Category, Size},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: Category,
    pub image: String,
    pub short_description: String,
    pub full_description: String,
    pub features: Vec<String>,
    pub price: u64,
    pub original_price: Option<u64>,
    pub discount: u8,
    pub in_stock: bool,
    pub sizes: Vec<Size>,
    pub colors: Vec<String>,
    pub material: String,
    pub blouse_length: Option<String>,
    pub saree_length: Option<String>,
    pub care_instructions: Vec<String>,
    pub tags: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub count: u64,
}
