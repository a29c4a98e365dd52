use std::borrow::Cow;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AccountsServiceError;

/// Request body whose validation reports fields in a fixed order.
pub trait ValidatedBody: DeserializeOwned + Validate {
    /// Fields in the order their first failure should be reported.
    const FIELDS: &'static [&'static str];
}

/// JSON body extractor that runs `validator` rules and rejects with the first failing
/// field's message.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: ValidatedBody,
{
    type Rejection = AccountsServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                tracing::debug!(error = %e, "rejected request body");
                AccountsServiceError::Validation("Invalid request body".to_owned())
            })?;

        value
            .validate()
            .map_err(|errors| AccountsServiceError::Validation(first_message(T::FIELDS, &errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn first_message(fields: &[&str], errors: &ValidationErrors) -> String {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errs| errs.iter())
        .chain(by_field.values().flat_map(|errs| errs.iter()))
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request body".to_owned())
}

/// Adapt a domain rule into a `validator` custom function result.
pub fn rule<E: std::fmt::Display>(
    code: &'static str,
    result: Result<(), E>,
) -> Result<(), ValidationError> {
    result.map_err(|e| ValidationError::new(code).with_message(Cow::Owned(e.to_string())))
}
