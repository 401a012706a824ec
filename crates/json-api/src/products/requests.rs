//! Product form decoding.

use sowraashi_app::domain::products::{
    data::{Category, NewProduct, ProductUpdate, Size},
    records::ProductUuid,
};

use crate::forms::{FieldError, FormFields};

/// Product fields as submitted by the admin form; every field optional
/// until the target command says otherwise.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ProductForm {
    name: Option<String>,
    category: Option<Category>,
    short_description: Option<String>,
    full_description: Option<String>,
    features: Option<Vec<String>>,
    price: Option<u64>,
    original_price: Option<u64>,
    discount: Option<u8>,
    in_stock: Option<bool>,
    sizes: Option<Vec<Size>>,
    colors: Option<Vec<String>>,
    material: Option<String>,
    blouse_length: Option<String>,
    saree_length: Option<String>,
    care_instructions: Option<Vec<String>>,
    tags: Option<Vec<String>>,
}

impl ProductForm {
    pub(crate) fn parse(fields: &FormFields<'_>) -> Result<Self, FieldError> {
        let sizes = fields
            .list::<String>("sizes")?
            .map(|sizes| {
                sizes
                    .iter()
                    .map(|size| size.parse::<Size>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|error| FieldError::invalid("sizes", error))?;

        Ok(Self {
            name: fields.text("name"),
            category: fields.parse("category")?,
            short_description: fields.text("shortDescription"),
            full_description: fields.text("fullDescription"),
            features: fields.list("features")?,
            price: fields.parse("price")?,
            original_price: fields.parse("originalPrice")?,
            discount: fields.parse("discount")?,
            in_stock: fields.parse("inStock")?,
            sizes,
            colors: fields.list("colors")?,
            material: fields.text("material"),
            blouse_length: fields.text("blouseLength"),
            saree_length: fields.text("sareeLength"),
            care_instructions: fields.list("careInstructions")?,
            tags: fields.list("tags")?,
        })
    }

    /// The label used to name the uploaded image on disk.
    pub(crate) fn image_label(&self) -> &str {
        self.name.as_deref().unwrap_or("product")
    }

    pub(crate) fn into_new_product(self, image: String) -> Result<NewProduct, FieldError> {
        Ok(NewProduct {
            uuid: ProductUuid::new(),
            name: self.name.ok_or(FieldError::Missing("name"))?,
            category: self.category.ok_or(FieldError::Missing("category"))?,
            image,
            short_description: self
                .short_description
                .ok_or(FieldError::Missing("shortDescription"))?,
            full_description: self
                .full_description
                .ok_or(FieldError::Missing("fullDescription"))?,
            features: self.features.unwrap_or_default(),
            price: self.price.ok_or(FieldError::Missing("price"))?,
            original_price: self.original_price,
            discount: self.discount.unwrap_or(0),
            in_stock: self.in_stock.unwrap_or(true),
            sizes: self.sizes.unwrap_or_default(),
            colors: self.colors.unwrap_or_default(),
            material: self.material.ok_or(FieldError::Missing("material"))?,
            blouse_length: self.blouse_length,
            saree_length: self.saree_length,
            care_instructions: self.care_instructions.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        })
    }

    pub(crate) fn into_update(self, image: Option<String>) -> ProductUpdate {
        ProductUpdate {
            name: self.name,
            category: self.category,
            image,
            short_description: self.short_description,
            full_description: self.full_description,
            features: self.features,
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            in_stock: self.in_stock,
            sizes: self.sizes,
            colors: self.colors,
            material: self.material,
            blouse_length: self.blouse_length,
            saree_length: self.saree_length,
            care_instructions: self.care_instructions,
            tags: self.tags,
        }
    }
}
