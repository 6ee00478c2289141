//! Request extractors whose rejections use the application error body
//!
//! Malformed JSON bodies and unparsable path parameters become
//! `AppError::Validation` instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Field named by a serde error text such as
/// "...target type: quantity: invalid type: ..." or "missing field `quantity`"
pub(crate) fn rejected_field(detail: &str) -> Option<String> {
    let rest = detail.split_once("target type: ").map_or(detail, |(_, rest)| rest);

    if let Some((_, missing)) = rest.split_once("missing field `") {
        return missing.split('`').next().map(str::to_string);
    }

    let (path, _) = rest.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}
