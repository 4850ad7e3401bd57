//! Pagination query string shared by the list endpoints.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Sort direction; accepts `asc`/`desc` in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(SortOrder::default());
        }
        raw.trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown sort order '{raw}'")))
    }
}

/// `?page=&limit=&field=&sort=`
///
/// Missing values fall back to page 1, 10 items, ascending. `field` is left
/// to the domain, which maps it onto its own closed set of sortable columns.
/// The resulting offset must fit a signed 64-bit SQL `OFFSET`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[validate(schema(function = "validate_page_window"))]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: u64,
    /// Page size
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100)]
    pub limit: u64,
    /// Column to order by
    pub field: Option<String>,
    #[param(inline)]
    pub sort: SortOrder,
}

impl PageQuery {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Rows to skip; only meaningful once the query has been validated
    pub fn offset(&self) -> u64 {
        self.checked_offset().unwrap_or(MAX_OFFSET)
    }

    /// `None` when the offset overflows or does not fit an SQL `BIGINT`
    pub fn checked_offset(&self) -> Option<u64> {
        self.page
            .checked_sub(1)?
            .checked_mul(self.limit)
            .filter(|offset| *offset <= MAX_OFFSET)
    }

    /// The requested sort column, treating `field=` as absent
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }
}

fn validate_page_window(query: &PageQuery) -> Result<(), ValidationError> {
    if query.page >= 1 && query.checked_offset().is_none() {
        return Err(ValidationError::new("page_out_of_range")
            .with_message("page * limit exceeds the largest supported offset".into()));
    }
    Ok(())
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            field: None,
            sort: SortOrder::Asc,
        }
    }
}

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        query
            .validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(query)
    }
}
