//! Typed list queries: filters, sorting and pagination.
//!
//! Repositories translate a [`ListQuery`] into SQL with [`QueryBuilder`], binding
//! every filter value. Column names come from [`QueryField::column`] and are never
//! taken from caller input.

use std::fmt::Debug;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;
use uuid::Uuid;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("page size must be between 1 and {MAX_PAGE_SIZE}")]
    PageSize,

    #[error("page number must be at least 1")]
    PageNumber,

    #[error("filter value does not match the type of field {0}")]
    ValueMismatch(&'static str),

    #[error("contains filters are only supported on text fields, not {0}")]
    ContainsOnNonText(&'static str),
}

/// Value type stored in a filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Uuid,
    Timestamp,
}

/// A column that list queries may filter and sort on.
pub trait QueryField: Copy + Debug + Send + Sync {
    /// Fully qualified SQL column expression.
    fn column(self) -> &'static str;

    fn kind(self) -> ValueKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Case-insensitive substring match.
    Contains,
}

impl FilterOp {
    const fn sql(self) -> &'static str {
        match self {
            Self::Eq => " = ",
            Self::Ne => " <> ",
            Self::Lt => " < ",
            Self::Lte => " <= ",
            Self::Gt => " > ",
            Self::Gte => " >= ",
            Self::Contains => " ILIKE ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Uuid(Uuid),
    Timestamp(Timestamp),
}

impl FilterValue {
    const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<F> {
    pub field: F,
    pub op: FilterOp,
    pub value: FilterValue,
}

impl<F: QueryField> Filter<F> {
    pub fn new(field: F, op: FilterOp, value: FilterValue) -> Self {
        Self { field, op, value }
    }

    fn validate(&self) -> Result<(), QueryError> {
        if self.value.kind() != self.field.kind() {
            return Err(QueryError::ValueMismatch(self.field.column()));
        }

        if self.op == FilterOp::Contains && self.field.kind() != ValueKind::Text {
            return Err(QueryError::ContainsOnNonText(self.field.column()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    const fn sql(self) -> &'static str {
        match self {
            Self::Asc => " ASC",
            Self::Desc => " DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    size: u32,
    number: u32,
}

impl PageRequest {
    pub fn new(size: u32, number: u32) -> Result<Self, QueryError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(QueryError::PageSize);
        }

        if number == 0 {
            return Err(QueryError::PageNumber);
        }

        Ok(Self { size, number })
    }

    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAGE_SIZE,
            number: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub filters: Vec<Filter<F>>,
    pub sort: Option<Sort<F>>,
    pub page: PageRequest,
}

impl<F> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            page: PageRequest::default(),
        }
    }
}

impl<F: QueryField> ListQuery<F> {
    /// Check every filter value against its field type.
    pub fn validate(&self) -> Result<(), QueryError> {
        self.filters.iter().try_for_each(Filter::validate)
    }

    /// Append `AND <column> <op> $n` for each filter. The base statement must
    /// already contain a `WHERE` clause.
    pub(crate) fn push_filters(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for filter in &self.filters {
            builder.push(" AND ");
            builder.push(filter.field.column());
            builder.push(filter.op.sql());

            match (&filter.value, filter.op) {
                (FilterValue::Text(text), FilterOp::Contains) => {
                    builder.push_bind(format!("%{}%", escape_like(text)));
                }
                (FilterValue::Text(text), _) => {
                    builder.push_bind(text.clone());
                }
                (FilterValue::Integer(value), _) => {
                    builder.push_bind(*value);
                }
                (FilterValue::Uuid(value), _) => {
                    builder.push_bind(*value);
                }
                (FilterValue::Timestamp(value), _) => {
                    builder.push_bind(SqlxTimestamp::from(*value));
                }
            }
        }
    }

    /// Append `ORDER BY`, a tie breaker for stable paging, and `LIMIT`/`OFFSET`.
    pub(crate) fn push_order_and_page(
        &self,
        builder: &mut QueryBuilder<'_, Postgres>,
        default_sort: Sort<F>,
        tie_breaker: &'static str,
    ) {
        let sort = self.sort.unwrap_or(default_sort);

        builder.push(" ORDER BY ");
        builder.push(sort.field.column());
        builder.push(sort.direction.sql());
        builder.push(", ");
        builder.push(tie_breaker);
        builder.push(sort.direction.sql());

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(self.page.size()));
        builder.push(" OFFSET ");
        builder.push_bind(self.page.offset());
    }
}

/// Result page with the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: PageRequest,
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for character in value.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(character);
    }

    escaped
}
