use std::future::Future;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{body::Incoming, header::USER_AGENT, Method, Request, Response, StatusCode};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HyperClient},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::error::TransportError;

static MY_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Performs the HTTP GET requests of an [`OsuApi`](super::OsuApi).
pub trait Transport {
    /// Request `url` and return the response body of a successful response.
    fn get(&self, url: &str) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build GET request")]
    Build(#[from] hyper::http::Error),
    #[error("failed to receive GET response")]
    Request(#[from] hyper_util::client::legacy::Error),
    #[error("failed with status code {0}")]
    Status(StatusCode),
    #[error("failed to extract response bytes")]
    Body(#[from] hyper::Error),
}

type InnerClient = HyperClient<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// [`Transport`] over hyper's pooled client with rustls.
#[derive(Clone)]
pub struct HyperTransport {
    client: InnerClient,
}

impl HyperTransport {
    pub fn new() -> Result<Self, rustls::Error> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let client = HyperClient::builder(TokioExecutor::new()).build(connector);

        Ok(Self { client })
    }

    /// Sends a GET request
    async fn send_get_request(&self, url: &str) -> Result<Bytes, HttpError> {
        let req = Request::builder()
            .uri(url)
            .method(Method::GET)
            .header(USER_AGENT, MY_USER_AGENT)
            .body(Empty::new())?;

        let response = self.client.request(req).await?;

        Self::error_for_status(response).await
    }

    async fn error_for_status(response: Response<Incoming>) -> Result<Bytes, HttpError> {
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            return Err(HttpError::Status(status));
        }

        let body = response.into_body().collect().await?;

        Ok(body.to_bytes())
    }
}

impl Transport for HyperTransport {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        self.send_get_request(url).await.map_err(TransportError::from)
    }
}
