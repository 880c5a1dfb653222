//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use warunk_app::domain::users::models::Registration;

use crate::{extensions::*, profile::UserResponse, state::State, users::into_status_error};

/// Register Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            name: request.name,
            username: request.username,
            email: request.email,
            password: request.password,
            password_confirm: request.password_confirm,
        }
    }
}

/// Register Handler
///
/// Creates an unverified buyer account with an empty balance.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Username or email already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.register",
    skip(json, depot, res),
    fields(username = tracing::field::Empty, user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("username", tracing::field::display(&request.username));

    let user = state
        .app
        .users
        .register(request.into())
        .await
        .map_err(into_status_error)?;

    span.record("user_uuid", tracing::field::display(user.uuid));

    res.status_code(StatusCode::CREATED);

    tracing::info!(user_uuid = %user.uuid, "registered user");

    Ok(Json(user.into()))
}
