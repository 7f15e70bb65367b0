use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::products::Product;
use crate::DatasetError;

/// A static product dataset, as stored in `config/products.yaml`.
#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub products: Vec<Product>,
}

/// Load and validate a static product dataset from a YAML file.
///
/// Products are normalized before validation, so a blank name is rejected
/// even if it is only whitespace in the file.
///
/// # Errors
///
/// Returns `DatasetError` if the file cannot be read, parsed, or fails validation.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_dataset(&content)
}

/// Parse and validate a dataset from YAML text.
///
/// # Errors
///
/// Returns `DatasetError` if the text cannot be parsed or fails validation.
pub fn parse_dataset(content: &str) -> Result<Dataset, DatasetError> {
    let mut dataset: Dataset = serde_yaml::from_str(content)?;
    dataset.products = dataset
        .products
        .into_iter()
        .map(Product::normalized)
        .collect();
    validate_dataset(&dataset)?;
    Ok(dataset)
}

fn validate_dataset(dataset: &Dataset) -> Result<(), DatasetError> {
    let mut seen_ids = HashSet::new();

    for product in &dataset.products {
        if product.name.is_empty() {
            return Err(DatasetError::Validation(format!(
                "product {} must have a non-empty name",
                product.id
            )));
        }

        if product.price < Decimal::ZERO {
            return Err(DatasetError::Validation(format!(
                "product '{}' has negative price {}",
                product.name, product.price
            )));
        }

        if !seen_ids.insert(product.id) {
            return Err(DatasetError::Validation(format!(
                "duplicate product id {} (product '{}')",
                product.id, product.name
            )));
        }
    }

    Ok(())
}
