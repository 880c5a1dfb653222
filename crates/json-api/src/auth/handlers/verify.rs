//! Verify Account Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, profile::UserResponse, state::State, users::into_status_error};

/// Verify Account Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyRequest {
    /// Six digit code issued at registration
    pub activation_code: u32,
}

/// Verify Account Handler
#[endpoint(
    tags("auth"),
    summary = "Verify Account",
    responses(
        (status_code = StatusCode::OK, description = "Account verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Activation code is empty or wrong"),
        (status_code = StatusCode::CONFLICT, description = "Email already verified"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.verify",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .verify_account(json.into_inner().activation_code)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user.uuid));
    tracing::info!(user_uuid = %user.uuid, "verified account");

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use warunk_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        Mocks {
            users,
            ..Mocks::default()
        }
        .public_service(Router::with_path("auth/verify").post(handler))
    }

    #[tokio::test]
    async fn test_verify_success() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_verify_account()
            .once()
            .withf(|code| *code == 123_456)
            .return_once(|_| Ok(make_user(TEST_USER_UUID)));

        let mut res = TestClient::post("http://example.com/auth/verify")
            .json(&json!({ "activation_code": 123_456 }))
            .send(&make_service(users))
            .await;

        let user: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(user.verified, "expected verified user");

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_wrong_code_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_verify_account()
            .once()
            .return_once(|_| Err(UsersServiceError::ActivationCodeWrong));

        let res = TestClient::post("http://example.com/auth/verify")
            .json(&json!({ "activation_code": 999_999 }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_twice_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_verify_account()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyVerified));

        let res = TestClient::post("http://example.com/auth/verify")
            .json(&json!({ "activation_code": 123_456 }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
