//! Product Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sowraashi_app::domain::products::records::{CategorySummary, ProductRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,
    pub name: String,
    pub category: String,

    /// Public URL of the product image
    pub image: String,
    pub short_description: String,
    pub full_description: String,
    pub features: Vec<String>,

    /// The price of the product in paise
    pub price: u64,
    pub original_price: Option<u64>,

    /// Discount percentage
    pub discount: u8,
    pub in_stock: bool,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub material: String,
    pub blouse_length: Option<String>,
    pub saree_length: Option<String>,
    pub care_instructions: Vec<String>,
    pub tags: Vec<String>,
    pub rating: f64,
    pub review_count: u32,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            category: product.category.to_string(),
            image: product.image,
            short_description: product.short_description,
            full_description: product.full_description,
            features: product.features,
            price: product.price,
            original_price: product.original_price,
            discount: product.discount,
            in_stock: product.in_stock,
            sizes: product.sizes.iter().map(ToString::to_string).collect(),
            colors: product.colors,
            material: product.material,
            blouse_length: product.blouse_length,
            saree_length: product.saree_length,
            care_instructions: product.care_instructions,
            tags: product.tags,
            rating: product.rating,
            review_count: product.review_count,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// A product wrapped with a confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductMessageResponse {
    pub message: String,
    pub product: ProductResponse,
}

impl ProductMessageResponse {
    pub(crate) fn new(message: &str, product: ProductRecord) -> Self {
        Self {
            message: message.to_owned(),
            product: product.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// Category identifier, e.g. `party-wear`
    pub id: String,

    /// Display label
    pub name: String,

    /// Products in this category
    pub count: u64,
}

impl From<CategorySummary> for CategoryResponse {
    fn from(summary: CategorySummary) -> Self {
        CategoryResponse {
            id: summary.category.to_string(),
            name: summary.category.display_name(),
            count: summary.count,
        }
    }
}
