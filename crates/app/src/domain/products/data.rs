//! Product Data

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::products::{ProductsServiceError, records::ProductUuid};

/// Longest allowed short description, in characters.
pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 200;

/// Highest allowed discount percentage.
pub const MAX_DISCOUNT_PERCENT: u8 = 100;

#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Silk,
    Cotton,
    Georgette,
    Crepe,
    Chiffon,
    Satin,
    Jacquard,
    Embroidery,
    Printed,
    Bridal,
    PartyWear,
    Casual,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Self::Silk,
        Self::Cotton,
        Self::Georgette,
        Self::Crepe,
        Self::Chiffon,
        Self::Satin,
        Self::Jacquard,
        Self::Embroidery,
        Self::Printed,
        Self::Bridal,
        Self::PartyWear,
        Self::Casual,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Silk => "silk",
            Self::Cotton => "cotton",
            Self::Georgette => "georgette",
            Self::Crepe => "crepe",
            Self::Chiffon => "chiffon",
            Self::Satin => "satin",
            Self::Jacquard => "jacquard",
            Self::Embroidery => "embroidery",
            Self::Printed => "printed",
            Self::Bridal => "bridal",
            Self::PartyWear => "party-wear",
            Self::Casual => "casual",
        }
    }

    /// Human readable label: the identifier with its first letter upper-cased.
    #[must_use]
    pub fn display_name(self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();

        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: value.to_string(),
            })
    }
}

/// Garment sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    FreeSize,
}

impl Size {
    pub const ALL: [Size; 7] = [
        Self::Xs,
        Self::S,
        Self::M,
        Self::L,
        Self::Xl,
        Self::Xxl,
        Self::FreeSize,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
            Self::FreeSize => "Free Size",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "size",
                value: value.to_string(),
            })
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    PriceLow,
    PriceHigh,
    #[default]
    Newest,
    Rating,
}

impl ProductSort {
    /// Map a query value to a sort, falling back to newest first.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("price-low") => Self::PriceLow,
            Some("price-high") => Self::PriceHigh,
            Some("rating") => Self::Rating,
            Some(_) | None => Self::Newest,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Newest => "newest",
            Self::Rating => "rating",
        }
    }
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl ProductFilter {
    /// The search term as a `LIKE` pattern with wildcards in user input escaped.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|term| !term.is_empty())?;

        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');

        for ch in term.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }

        pattern.push('%');

        Some(pattern)
    }
}

/// New Product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
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
}

impl NewProduct {
    /// Check field constraints before touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidData`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        require_text(&self.name, "name is required")?;
        require_text(&self.image, "image is required")?;
        require_text(&self.full_description, "full description is required")?;
        require_text(&self.material, "material is required")?;
        check_short_description(&self.short_description)?;
        check_discount(self.discount)
    }
}

/// Product Update
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub image: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub features: Option<Vec<String>>,
    pub price: Option<u64>,
    pub original_price: Option<u64>,
    pub discount: Option<u8>,
    pub in_stock: Option<bool>,
    pub sizes: Option<Vec<Size>>,
    pub colors: Option<Vec<String>>,
    pub material: Option<String>,
    pub blouse_length: Option<String>,
    pub saree_length: Option<String>,
    pub care_instructions: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidData`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if let Some(name) = &self.name {
            require_text(name, "name cannot be blank")?;
        }

        if let Some(image) = &self.image {
            require_text(image, "image cannot be blank")?;
        }

        if let Some(material) = &self.material {
            require_text(material, "material cannot be blank")?;
        }

        if let Some(short_description) = &self.short_description {
            check_short_description(short_description)?;
        }

        self.discount.map_or(Ok(()), check_discount)
    }
}

fn require_text(value: &str, reason: &'static str) -> Result<(), ProductsServiceError> {
    if value.trim().is_empty() {
        Err(ProductsServiceError::InvalidData(reason))
    } else {
        Ok(())
    }
}

fn check_short_description(value: &str) -> Result<(), ProductsServiceError> {
    require_text(value, "short description is required")?;

    if value.chars().count() > SHORT_DESCRIPTION_MAX_CHARS {
        return Err(ProductsServiceError::InvalidData(
            "short description cannot exceed 200 characters",
        ));
    }

    Ok(())
}

fn check_discount(discount: u8) -> Result<(), ProductsServiceError> {
    if discount > MAX_DISCOUNT_PERCENT {
        return Err(ProductsServiceError::InvalidData(
            "discount must be between 0 and 100",
        ));
    }

    Ok(())
}
