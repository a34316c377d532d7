use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::analytics::endpoint::{check_limit, AnalyticsQuery, ApiCall};
use crate::shared::analytics::{GatewayError, ValidationError};

/// Default page size of the product list.
pub const DEFAULT_PRODUCT_LIMIT: u32 = 100;
/// Upper bound accepted by `/api/products`.
pub const MAX_PRODUCT_LIMIT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub is_active: bool,
}

impl Store {
    /// "Centro (São Paulo/SP)"
    pub fn display_name(&self) -> String {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => format!("{} ({}/{})", self.name, city, state),
            (Some(city), None) => format!("{} ({})", self.name, city),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Product count per category, largest first, ties by name. Products without a
/// known category are counted under `uncategorized`.
pub fn products_per_category(
    categories: &[Category],
    products: &[Product],
    uncategorized: &str,
) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for product in products {
        let name = product
            .category_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| uncategorized.to_string());
        *counts.entry(name).or_default() += 1;
    }
    let mut rows: Vec<(String, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

/// `GET /api/stores` (active stores only).
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoresQuery;

impl AnalyticsQuery for StoresQuery {
    type Response = Vec<Store>;
    const NAME: &'static str = "stores";

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::get("/api/stores"))
    }
}

/// `GET /api/channels`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChannelsQuery;

impl AnalyticsQuery for ChannelsQuery {
    type Response = Vec<Channel>;
    const NAME: &'static str = "channels";

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::get("/api/channels"))
    }
}

/// `GET /api/categories`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoriesQuery;

impl AnalyticsQuery for CategoriesQuery {
    type Response = Vec<Category>;
    const NAME: &'static str = "categories";

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::get("/api/categories"))
    }
}

/// `GET /api/products?limit=N`
#[derive(Debug, Clone, Serialize)]
pub struct ProductsQuery {
    pub limit: u32,
}

impl Default for ProductsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PRODUCT_LIMIT,
        }
    }
}

impl AnalyticsQuery for ProductsQuery {
    type Response = Vec<Product>;
    const NAME: &'static str = "products";

    fn validate(&self) -> Result<(), ValidationError> {
        check_limit("limit", self.limit, 1, MAX_PRODUCT_LIMIT)
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::get("/api/products").param("limit", self.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::HttpMethod;

    #[test]
    fn test_products_plan() {
        let call = ProductsQuery { limit: 50 }.plan().unwrap();
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.path, "/api/products");
        assert_eq!(call.query, vec![("limit".to_string(), "50".to_string())]);
        assert!(call.body.is_none());
    }

    #[test]
    fn test_products_limit_bounds() {
        assert!(ProductsQuery { limit: 0 }.plan().is_err());
        assert!(ProductsQuery { limit: 501 }.plan().is_err());
        assert!(ProductsQuery::default().plan().is_ok());
    }

    #[test]
    fn test_reference_payloads_decode() {
        let stores: Vec<Store> = serde_json::from_str(
            r#"[{"id":1,"name":"Centro","city":"São Paulo","state":"SP","is_active":true},
                {"id":2,"name":"Norte","city":null,"state":null,"is_active":true}]"#,
        )
        .unwrap();
        assert_eq!(stores[0].display_name(), "Centro (São Paulo/SP)");
        assert_eq!(stores[1].display_name(), "Norte");

        let channels: Vec<Channel> =
            serde_json::from_str(r#"[{"id":3,"name":"iFood","type":"D"}]"#).unwrap();
        assert_eq!(channels[0].kind, "D");

        let products: Vec<Product> =
            serde_json::from_str(r#"[{"id":9,"name":"X-Burger","category_id":null}]"#).unwrap();
        assert_eq!(products[0].category_id, None);
    }

    #[test]
    fn test_reference_keys_are_distinct() {
        assert_ne!(StoresQuery.query_key(), ChannelsQuery.query_key());
        assert_ne!(
            ProductsQuery { limit: 10 }.query_key(),
            ProductsQuery { limit: 20 }.query_key()
        );
    }

    #[test]
    fn test_products_per_category() {
        let categories = vec![
            Category { id: 1, name: "Lanches".into(), kind: "P".into() },
            Category { id: 2, name: "Bebidas".into(), kind: "P".into() },
        ];
        let product = |id: i64, category_id: Option<i64>| Product {
            id,
            name: format!("P{}", id),
            category_id,
        };
        let products = vec![
            product(1, Some(2)),
            product(2, Some(1)),
            product(3, Some(2)),
            product(4, None),
            product(5, Some(99)),
            product(6, Some(1)),
        ];
        assert_eq!(
            products_per_category(&categories, &products, "Outros"),
            vec![
                ("Bebidas".to_string(), 2),
                ("Lanches".to_string(), 2),
                ("Outros".to_string(), 2),
            ]
        );
    }
}
