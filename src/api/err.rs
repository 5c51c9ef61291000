//! API error handling.
//!
//! All resolvers that can fail return `ApiResult`. The error carries a coarse
//! "kind" which is passed to the client in the `extensions` of the GraphQL
//! error.

use juniper::{FieldError, IntoFieldError, ScalarValue, graphql_value};

use crate::{prelude::*, store::StoreError};


pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) msg: String,
    pub(crate) kind: ApiErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// The store cannot allocate another id for this kind of record.
    IdsExhausted,
}

impl ApiErrorKind {
    fn kind_str(&self) -> &str {
        match self {
            Self::IdsExhausted => "IDS_EXHAUSTED",
        }
    }

    fn message_prefix(&self) -> &str {
        match self {
            Self::IdsExhausted => "Cannot add record",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(src: StoreError) -> Self {
        warn!("Store error: {src}");
        let kind = match src {
            StoreError::IdsExhausted { .. } => ApiErrorKind::IdsExhausted,
        };

        Self { msg: src.to_string(), kind }
    }
}

impl<S: ScalarValue> IntoFieldError<S> for ApiError {
    fn into_field_error(self) -> FieldError<S> {
        let msg = format!("{}: {}", self.kind.message_prefix(), self.msg);
        FieldError::new(msg, graphql_value!({ "kind": (self.kind.kind_str()) }))
    }
}
