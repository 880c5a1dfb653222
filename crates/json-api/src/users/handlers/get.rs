//! Get User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, profile::UserResponse, state::State, users::into_status_error};

/// Get User Handler
///
/// Admin lookup of an active account.
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed UUID"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use warunk_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{ADMIN, Mocks, TEST_USER_UUID, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        Mocks {
            users,
            ..Mocks::default()
        }
        .service_as(ADMIN, Router::with_path("admin/users/{user}").get(handler))
    }

    #[tokio::test]
    async fn test_get_user_returns_account() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|uuid| Ok(make_user(uuid)));

        let mut res = TestClient::get(format!("http://example.com/admin/users/{TEST_USER_UUID}"))
            .send(&make_service(users))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, TEST_USER_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/admin/users/{TEST_USER_UUID}"))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_invalid_uuid_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_get_user().never();

        let res = TestClient::get("http://example.com/admin/users/123")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
