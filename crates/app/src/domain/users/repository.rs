//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar,
};

use crate::{
    database::from_db_int,
    domain::{
        query::{Sort, SortDirection},
        users::models::{ProfileUpdate, Role, User, UserField, UserQuery, UserUuid},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const FIND_USER_BY_ACTIVATION_CODE_SQL: &str =
    include_str!("sql/find_user_by_activation_code.sql");
const MARK_USER_VERIFIED_SQL: &str = include_str!("sql/mark_user_verified.sql");
const UPDATE_USER_PROFILE_SQL: &str = include_str!("sql/update_user_profile.sql");
const SOFT_DELETE_USER_SQL: &str = include_str!("sql/soft_delete_user.sql");
const USERNAME_TAKEN_SQL: &str = include_str!("sql/username_taken.sql");
const EMAIL_TAKEN_SQL: &str = include_str!("sql/email_taken.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");

const DEFAULT_SORT: Sort<UserField> = Sort {
    field: UserField::CreatedAt,
    direction: SortDirection::Desc,
};

/// Columns written when creating a user.
#[derive(Debug, Clone)]
pub(crate) struct NewUserRecord<'a> {
    pub uuid: UserUuid,
    pub name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub verified: bool,
    pub activation_code: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUserRecord<'_>,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid)
            .bind(user.name)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .bind(user.verified)
            .bind(activation_code_to_db(user.activation_code)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_activation_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        activation_code: u32,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_BY_ACTIVATION_CODE_SQL)
            .bind(activation_code_to_db(activation_code)?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_user_verified(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(MARK_USER_VERIFIED_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_USER_PROFILE_SQL)
            .bind(user)
            .bind(&update.name)
            .bind(&update.username)
            .bind(&update.email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn soft_delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_USER_SQL)
            .bind(user)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn username_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        except: Option<UserUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(USERNAME_TAKEN_SQL)
            .bind(username)
            .bind(except)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn email_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        except: Option<UserUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(EMAIL_TAKEN_SQL)
            .bind(email)
            .bind(except)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_query: &UserQuery,
    ) -> Result<Vec<User>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(LIST_USERS_SQL);

        user_query.push_filters(&mut builder);
        user_query.push_order_and_page(&mut builder, DEFAULT_SORT, "users.uuid");

        builder.build_query_as::<User>().fetch_all(&mut **tx).await
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_query: &UserQuery,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_USERS_SQL);

        user_query.push_filters(&mut builder);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        from_db_int(count, "count")
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let activation_code: i32 = row.try_get("activation_code")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: role.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            verified: row.try_get("verified")?,
            activation_code: u32::try_from(activation_code).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "activation_code".to_string(),
                    source: Box::new(e),
                }
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

fn activation_code_to_db(activation_code: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(activation_code).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
