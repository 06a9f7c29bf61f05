//! Products Data

use crate::domain::products::{ProductsServiceError, records::ProductUuid};

/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
}

/// Editable catalog fields shared by creates and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub model: String,
    pub image: String,
    pub description: String,
    pub category: String,

    /// Price charged at checkout, in minor units.
    pub price: u64,

    /// Reference price shown struck through next to `price`.
    pub discount_price: Option<u64>,
    pub in_stock: bool,
    pub rating: f32,
    pub reviews: u32,
}

impl ProductDetails {
    /// Check the fields the database can't express as constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidData`] for blank names or categories and for
    /// ratings outside `0.0..=5.0`.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ProductsServiceError::InvalidData);
        }

        Ok(())
    }
}

/// Normalise a category filter; `None` means every category.
#[must_use]
pub fn category_filter(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|category| !category.is_empty() && !category.eq_ignore_ascii_case(ALL_CATEGORIES))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            name: "Desk Lamp".to_string(),
            model: "DL-100".to_string(),
            image: "https://example.com/lamp.png".to_string(),
            description: "A lamp".to_string(),
            category: "lighting".to_string(),
            price: 2_500,
            discount_price: Some(3_499),
            in_stock: true,
            rating: 4.5,
            reviews: 12,
        }
    }

    #[test]
    fn valid_details_pass() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn rating_outside_five_stars_is_rejected() {
        let details = ProductDetails {
            rating: 5.5,
            ..details()
        };

        assert!(matches!(
            details.validate(),
            Err(ProductsServiceError::InvalidData)
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        let details = ProductDetails {
            name: "   ".to_string(),
            ..details()
        };

        assert!(matches!(
            details.validate(),
            Err(ProductsServiceError::InvalidData)
        ));
    }

    #[test]
    fn all_and_blank_categories_disable_the_filter() {
        assert_eq!(category_filter(None), None);
        assert_eq!(category_filter(Some("all")), None);
        assert_eq!(category_filter(Some("ALL")), None);
        assert_eq!(category_filter(Some("  ")), None);
        assert_eq!(
            category_filter(Some(" lighting ")).as_deref(),
            Some("lighting")
        );
    }
}
