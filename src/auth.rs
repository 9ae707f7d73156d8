//! Credential gate for mutating endpoints.
//!
//! The expected token lives in the `TokenKey` settings document, provisioned
//! by the seed binary. Route handlers run the gate before calling into any
//! operation; nothing below this layer sees credentials.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::database::Collections;
use crate::error::AppError;
use crate::info::TOKEN_KEY;
use crate::models::MiscDocument;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn credential_matches(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && presented == expected
}

pub async fn require_valid_credential<S: Collections>(
    store: &S,
    headers: &HeaderMap,
) -> Result<(), AppError> {
    let presented = bearer_token(headers).ok_or(AppError::Unauthorized)?;

    let key = store
        .find_one_by_field::<MiscDocument>("documentName", TOKEN_KEY)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if credential_matches(presented, &key.information) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::database::memory::MemoryStore;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    async fn store_with_key(key: &str) -> MemoryStore {
        let store = MemoryStore::default();
        store
            .insert(MiscDocument {
                id: String::new(),
                document_name: TOKEN_KEY.into(),
                information: key.into(),
            })
            .await
            .unwrap();
        store
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_provisioned_key_is_accepted() {
        let store = store_with_key("sesame").await;

        let result = require_valid_credential(&store, &headers_with("Bearer sesame")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_or_missing_credential_is_unauthorized() {
        let store = store_with_key("sesame").await;

        for headers in [headers_with("Bearer nope"), HeaderMap::new()] {
            let result = require_valid_credential(&store, &headers).await;
            assert!(matches!(result, Err(AppError::Unauthorized)));
        }
    }

    #[tokio::test]
    async fn test_unprovisioned_key_rejects_everything() {
        let store = MemoryStore::default();

        let result = require_valid_credential(&store, &headers_with("Bearer anything")).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
