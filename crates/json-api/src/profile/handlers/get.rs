//! Get Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::users::models::User;

use crate::{extensions::*, state::State, users::into_status_error};

/// Public view of an account. Password hash and activation code are never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,

    /// `User` or `Admin`
    pub role: String,

    pub verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            verified: user.verified,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Get Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .get_user(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
