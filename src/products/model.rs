//! Product records as the backend sends them, and their merged form.

use crate::api::FetchError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::warn;

/// Opaque product identifier. The backend uses numbers or strings; numbers
/// are kept as received, including floats and values beyond `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(Number),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n.into())
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_owned())
    }
}

/// A downloadable file attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Download {
    pub name: String,
    pub file: String,
}

/// One catalog entry. Fields the crate does not use are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub gl_number: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub current_version: Option<Value>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads: Vec<Download>,
    #[serde(default)]
    pub store_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        gl_number: impl Into<String>,
        product_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            gl_number: gl_number.into(),
            product_type: product_type.into(),
            name: name.into(),
            current_version: None,
            icon: None,
            downloads: Vec::new(),
            store_url: None,
            extra: Map::new(),
        }
    }

    pub fn with_downloads(mut self, downloads: Vec<Download>) -> Self {
        self.downloads = downloads;
        self
    }
}

/// All entries sharing one GL number, merged. `ids` holds every member id in
/// first-seen order; the other fields come from the first member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub ids: Vec<ProductId>,
    pub gl_number: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_version: Option<Value>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub downloads: Vec<Download>,
    #[serde(default)]
    pub store_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Product> for ProductGroup {
    fn from(p: Product) -> Self {
        Self {
            ids: vec![p.id],
            gl_number: p.gl_number,
            product_type: p.product_type,
            name: p.name,
            current_version: p.current_version,
            icon: p.icon,
            downloads: p.downloads,
            store_url: p.store_url,
            extra: p.extra,
        }
    }
}

/// A parsed product collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCollection {
    products: Vec<Product>,
}

impl ProductCollection {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parses a collection payload, either an array or an id-keyed object.
    ///
    /// Entries that are not valid products are skipped and logged. A payload
    /// that is neither an array nor an object is rejected.
    pub fn from_json(payload: &Value) -> Result<Self, FetchError> {
        let entries: Vec<(String, &Value)> = match payload {
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            other => {
                return Err(FetchError::Malformed(format!(
                    "expected an array or object of products, got {}",
                    json_kind(other)
                )))
            }
        };

        let mut products = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            match Product::deserialize(entry) {
                Ok(product) => products.push(product),
                Err(e) => warn!(key = %key, error = %e, "Skipping malformed product"),
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProductCollection {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
