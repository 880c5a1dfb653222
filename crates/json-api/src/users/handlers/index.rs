//! User Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use warunk_app::domain::{
    query::{
        DEFAULT_PAGE_SIZE, Filter, FilterOp, FilterValue, Page, PageRequest, Sort, SortDirection,
    },
    users::models::{Role, User, UserField, UserQuery},
};

use crate::{extensions::*, profile::UserResponse, state::State, users::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,

    /// Number of active accounts matching the filters
    pub total: u64,

    pub page: u32,
    pub per_page: u32,
}

impl From<Page<User>> for UsersResponse {
    fn from(page: Page<User>) -> Self {
        UsersResponse {
            users: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page.number(),
            per_page: page.page.size(),
        }
    }
}

/// User listing parameters as received on the query string.
#[derive(Debug, Default)]
struct UserParams {
    page: Option<u32>,
    per_page: Option<u32>,
    q: Option<String>,
    role: Option<String>,
    sort: Option<String>,
    order: Option<String>,
}

impl UserParams {
    fn into_query(self) -> Result<UserQuery, StatusError> {
        let page = PageRequest::new(
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
            self.page.unwrap_or(1),
        )
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        let mut filters = Vec::new();

        if let Some(role) = self.role.filter(|value| !value.is_empty()) {
            let role = role
                .parse::<Role>()
                .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

            filters.push(Filter::new(
                UserField::Role,
                FilterOp::Eq,
                FilterValue::Text(role.as_str().to_string()),
            ));
        }

        if let Some(q) = self.q.filter(|value| !value.is_empty()) {
            filters.push(Filter::new(
                UserField::Username,
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

        Ok(UserQuery {
            filters,
            sort,
            page,
        })
    }
}

fn parse_sort_field(value: &str) -> Result<UserField, StatusError> {
    match value {
        "name" => Ok(UserField::Name),
        "username" => Ok(UserField::Username),
        "email" => Ok(UserField::Email),
        "role" => Ok(UserField::Role),
        "created_at" => Ok(UserField::CreatedAt),
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

/// User Index Handler
///
/// Admin listing of active accounts, newest first unless a sort is given.
/// `q` matches part of the username.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of users"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging, role or sort"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    q: QueryParam<String, false>,
    role: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    order: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = UserParams {
        page: page.into_inner(),
        per_page: per_page.into_inner(),
        q: q.into_inner(),
        role: role.into_inner(),
        sort: sort.into_inner(),
        order: order.into_inner(),
    }
    .into_query()?;

    let users = state
        .app
        .users
        .list_users(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into()))
}
