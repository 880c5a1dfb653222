//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use warunk_app::domain::{
    products::models::{Product, ProductField, ProductQuery},
    query::{
        DEFAULT_PAGE_SIZE, Filter, FilterOp, FilterValue, Page, PageRequest, Sort, SortDirection,
    },
};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Products on the requested page
    pub products: Vec<ProductResponse>,

    /// Number of active products matching the filters
    pub total: u64,

    pub page: u32,
    pub per_page: u32,
}

impl From<Page<Product>> for ProductsResponse {
    fn from(page: Page<Product>) -> Self {
        ProductsResponse {
            products: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page.number(),
            per_page: page.page.size(),
        }
    }
}

/// Catalog listing parameters as received on the query string.
#[derive(Debug, Default)]
pub(crate) struct CatalogParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl CatalogParams {
    pub(crate) fn into_query(self) -> Result<ProductQuery, StatusError> {
        let page = PageRequest::new(
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
            self.page.unwrap_or(1),
        )
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        let mut filters = Vec::new();

        if let Some(category) = self.category.filter(|value| !value.is_empty()) {
            filters.push(Filter::new(
                ProductField::Category,
                FilterOp::Eq,
                FilterValue::Text(category),
            ));
        }

        if let Some(q) = self.q.filter(|value| !value.is_empty()) {
            filters.push(Filter::new(
                ProductField::Name,
                FilterOp::Contains,
                FilterValue::Text(q),
            ));
        }

        let sort = self
            .sort
            .map(|field| {
                Ok::<_, StatusError>(Sort {
                    field: parse_sort_field(&field)?,
                    direction: parse_direction(self.order.as_deref())?,
                })
            })
            .transpose()?;

        Ok(ProductQuery {
            filters,
            sort,
            page,
        })
    }
}

fn parse_sort_field(value: &str) -> Result<ProductField, StatusError> {
    match value {
        "name" => Ok(ProductField::Name),
        "category" => Ok(ProductField::Category),
        "price" => Ok(ProductField::Price),
        "stock" => Ok(ProductField::Stock),
        "created_at" => Ok(ProductField::CreatedAt),
        _ => Err(StatusError::bad_request().brief(format!("cannot sort by {value:?}"))),
    }
}

fn parse_direction(value: Option<&str>) -> Result<SortDirection, StatusError> {
    match value {
        None => Ok(SortDirection::default()),
        Some(order) if order.eq_ignore_ascii_case("asc") => Ok(SortDirection::Asc),
        Some(order) if order.eq_ignore_ascii_case("desc") => Ok(SortDirection::Desc),
        Some(order) => Err(StatusError::bad_request().brief(format!("unknown order {order:?}"))),
    }
}

/// Product Index Handler
///
/// Returns one page of active products, newest first unless a sort is given.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    category: QueryParam<String, false>,
    q: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    order: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = CatalogParams {
        page: page.into_inner(),
        per_page: per_page.into_inner(),
        category: category.into_inner(),
        q: q.into_inner(),
        sort: sort.into_inner(),
        order: order.into_inner(),
    }
    .into_query()?;

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
