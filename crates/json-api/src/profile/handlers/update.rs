//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use warunk_app::domain::users::models::ProfileUpdate;

use crate::{extensions::*, profile::UserResponse, state::State, users::into_status_error};

/// Update Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            username: request.username,
            email: request.email,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::CONFLICT, description = "Username or email already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profile.update",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user));

    let user = state
        .app
        .users
        .update_profile(principal.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user.uuid, "updated profile");

    Ok(Json(user.into()))
}
