//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use warunk_app::auth::IssuedToken;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    pub username: String,

    /// When the token stops being accepted
    pub expires_at: String,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        LoginResponse {
            token: issued.token,
            username: issued.username,
            expires_at: issued.expires_at.to_string(),
        }
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Username or password is incorrect"),
        (status_code = StatusCode::FORBIDDEN, description = "Account not verified"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.login",
    skip(json, depot),
    fields(username = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("username", tracing::field::display(&request.username));

    let issued = state
        .app
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(into_status_error)?;

    tracing::info!(username = %issued.username, "issued token");

    Ok(Json(issued.into()))
}
