use std::{fmt, sync::Arc, time::Duration};

use bon::Builder;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use log::{debug, warn};
use reqwest::{Method, Response, header::HeaderMap};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::TransportError,
    interceptor::{RequestContext, RequestInterceptor},
};

/// HTTP method for API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

/// A documented API operation
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    /// Stable operation name handed to interceptors, e.g. `createChatCompletion`
    pub operation_id: String,
}

impl Endpoint {
    pub fn new(
        operation_id: impl Into<String>,
        path: impl Into<String>,
        method: HttpMethod,
    ) -> Self {
        Self {
            path: path.into(),
            method,
            operation_id: operation_id.into(),
        }
    }

    pub fn post(operation_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation_id, path, HttpMethod::Post)
    }
}

/// Result of a typed operation.
///
/// `Undocumented` covers every response outside the documented success
/// shape and always keeps the status code and raw payload.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput<T> {
    Ok(T),
    Undocumented { status_code: u16, payload: Bytes },
}

impl<T> OperationOutput<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Map the documented value, keeping undocumented responses as they are
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationOutput<U> {
        match self {
            Self::Ok(value) => OperationOutput::Ok(f(value)),
            Self::Undocumented {
                status_code,
                payload,
            } => OperationOutput::Undocumented {
                status_code,
                payload,
            },
        }
    }
}

/// Request for the raw path. No interceptors run; headers are sent as given.
#[derive(Debug, Clone, Builder)]
pub struct RawRequest {
    pub method: Method,
    #[builder(into)]
    pub url: String,
    #[builder(default)]
    pub headers: HeaderMap,
    #[builder(default, into)]
    pub body: Bytes,
    pub timeout: Option<Duration>,
}

/// Response from the raw path, whatever its status
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// HTTP transport bound to a fixed base URL
#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            interceptors: Vec::new(),
        }
    }

    /// Register an interceptor; interceptors run in registration order
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build a reqwest request for a typed operation, running all interceptors
    fn prepare(&self, endpoint: &Endpoint) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = self.url_for(&endpoint.path);
        let method: Method = endpoint.method.into();
        let ctx = RequestContext {
            operation_id: endpoint.operation_id.clone(),
            method: method.clone(),
            url,
        };

        let mut headers = HeaderMap::new();
        for interceptor in &self.interceptors {
            interceptor.intercept(&ctx, &mut headers)?;
        }

        debug!("{} {} ({})", ctx.method, ctx.url, ctx.operation_id);
        Ok(self.client.request(ctx.method, &ctx.url).headers(headers))
    }

    /// Execute an operation with a JSON body and a JSON success response
    pub async fn execute_json<B, T>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<OperationOutput<T>, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.prepare(endpoint)?.json(body).send().await?;
        let status = res.status();
        debug!("{} -> {}", endpoint.operation_id, status.as_u16());

        if !status.is_success() {
            return undocumented(endpoint, res).await;
        }

        let bytes = res.bytes().await?;
        serde_json::from_slice::<T>(&bytes)
            .map(OperationOutput::Ok)
            .map_err(|e| TransportError::decode(status, &e, &bytes))
    }

    /// Execute an operation with a JSON body and a binary success response.
    ///
    /// The body stream is drained completely before returning.
    pub async fn execute_binary<B>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<OperationOutput<Bytes>, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let res = self.prepare(endpoint)?.json(body).send().await?;
        let status = res.status();
        debug!("{} -> {}", endpoint.operation_id, status.as_u16());

        if !status.is_success() {
            return undocumented(endpoint, res).await;
        }

        let mut stream = res.bytes_stream();
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(OperationOutput::Ok(buf.freeze()))
    }

    /// Send a request as-is, bypassing interceptors and classification
    pub async fn send_raw(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        debug!("{} {} (raw)", request.method, request.url);

        let mut req = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .body(request.body);
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let res = req.send().await?;
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let body = res.bytes().await?;
        debug!("{} -> {} ({} bytes)", request.url, status, body.len());

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

async fn undocumented<T>(
    endpoint: &Endpoint,
    res: Response,
) -> Result<OperationOutput<T>, TransportError> {
    let status_code = res.status().as_u16();
    let payload = res.bytes().await?;
    warn!(
        "{} returned undocumented response with status {}",
        endpoint.operation_id, status_code
    );
    Ok(OperationOutput::Undocumented {
        status_code,
        payload,
    })
}
