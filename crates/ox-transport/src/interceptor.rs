use std::fmt;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::TransportError;

/// Describes the typed operation about to be sent
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub operation_id: String,
    pub method: Method,
    pub url: String,
}

/// Hook run before every typed transport call.
///
/// Interceptors may add or replace outgoing headers. Returning an error
/// aborts the call before anything is sent.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(
        &self,
        ctx: &RequestContext,
        headers: &mut HeaderMap,
    ) -> Result<(), TransportError>;
}

/// Adds `Authorization: Bearer <token>` to every request
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Build a sensitive `Bearer` authorization header value
pub fn bearer_header(token: &str) -> Result<HeaderValue, TransportError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| TransportError::InvalidHeader(format!("authorization: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

impl RequestInterceptor for BearerAuth {
    fn intercept(
        &self,
        _ctx: &RequestContext,
        headers: &mut HeaderMap,
    ) -> Result<(), TransportError> {
        headers.append(AUTHORIZATION, bearer_header(&self.token)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext {
            operation_id: "createImage".to_string(),
            method: Method::POST,
            url: "https://api.openai.com/v1/images/generations".to_string(),
        }
    }

    #[test]
    fn test_bearer_auth_appends_header() {
        let mut headers = HeaderMap::new();
        BearerAuth::new("sk-test").intercept(&ctx(), &mut headers).unwrap();

        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer sk-test");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_auth_rejects_control_characters() {
        let mut headers = HeaderMap::new();
        let result = BearerAuth::new("bad\nkey").intercept(&ctx(), &mut headers);
        assert!(matches!(result, Err(TransportError::InvalidHeader(_))));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", BearerAuth::new("sk-secret"));
        assert!(!debug.contains("sk-secret"));
    }
}
