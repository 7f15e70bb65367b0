use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, unique within one catalog snapshot.
pub type ProductId = i64;

/// Category name as served by the API or found on a product.
pub type Category = String;

const NOT_AVAILABLE: &str = "N/A";
const NO_DESCRIPTION: &str = "No description";

/// A catalog product.
///
/// Field names on the wire follow the catalog API (`price_in_RS`,
/// `weight_in_KG`); everything except `id`, `name` and `price` is optional
/// and defaults to absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Currency-agnostic amount, accepted as a JSON number or decimal string.
    #[serde(rename = "price_in_RS")]
    pub price: Decimal,
    #[serde(default)]
    pub manufacture_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(rename = "weight_in_KG", default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    /// Minimal product with only the required fields set.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            manufacture_date: None,
            expiry_date: None,
            weight_kg: None,
            category: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Canonical form used once a product enters a store: strings trimmed,
    /// blank optional strings collapsed to `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            price: self.price,
            manufacture_date: non_blank(self.manufacture_date),
            expiry_date: non_blank(self.expiry_date),
            weight_kg: self.weight_kg.filter(|w| w.is_finite()),
            category: non_blank(self.category),
        }
    }

    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    #[must_use]
    pub fn category_or_na(&self) -> &str {
        self.category.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn manufacture_date_or_na(&self) -> &str {
        self.manufacture_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn expiry_date_or_na(&self) -> &str {
        self.expiry_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Weight for display. A zero weight counts as unknown.
    #[must_use]
    pub fn weight_or_na(&self) -> String {
        match self.weight_kg {
            Some(w) if w != 0.0 => w.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
