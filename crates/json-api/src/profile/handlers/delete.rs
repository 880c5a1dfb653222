//! Delete Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, users::into_status_error};

/// Password confirmation for destructive actions.
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct PasswordConfirmation {
    pub password: String,
}

/// Delete Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Delete Account",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Account deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Password is incorrect"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profile.delete",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PasswordConfirmation>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user));

    state
        .app
        .users
        .delete_account(principal.user, json.into_inner().password)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %principal.user, "deleted account");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use warunk_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{BUYER, Mocks, TEST_USER_UUID};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        Mocks {
            users,
            ..Mocks::default()
        }
        .service_as(BUYER, Router::with_path("profile").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_account_success() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_account()
            .once()
            .withf(|user, password| *user == TEST_USER_UUID && password == "rahasia123")
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/profile")
            .json(&json!({ "password": "rahasia123" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_account_wrong_password_returns_403() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_account()
            .once()
            .return_once(|_, _| Err(UsersServiceError::IncorrectPassword));

        let res = TestClient::delete("http://example.com/profile")
            .json(&json!({ "password": "salah" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
