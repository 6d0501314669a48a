use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{ApiError, Result},
    models::{
        ConnectionList, ConnectionStatus, ErrorBody, MessageResponse,
        NameBody, QueryBody, QueryResult, SaveConnectionRequest,
        SaveResponse,
    },
};

pub const STATUS_PATH: &str = "api/status";
pub const CONNECTIONS_PATH: &str = "api/connections";
pub const SET_ACTIVE_PATH: &str = "api/connections/set-active";
pub const CONNECT_PATH: &str = "api/connect";
pub const DISCONNECT_PATH: &str = "api/disconnect";
pub const QUERY_PATH: &str = "api/query";
pub const SAVE_PATH: &str = "api/connections/save";
pub const DELETE_PATH: &str = "api/connections/delete";

/// The REST surface of the console server.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// `GET /api/status`
    async fn status(&self) -> Result<ConnectionStatus>;

    /// `GET /api/connections`
    async fn connections(&self) -> Result<ConnectionList>;

    /// `POST /api/connections/set-active`
    async fn set_active(&self, name: &str) -> Result<()>;

    /// `POST /api/connect`
    async fn connect(&self) -> Result<MessageResponse>;

    /// `POST /api/disconnect`
    async fn disconnect(&self) -> Result<MessageResponse>;

    /// `POST /api/query`
    async fn run_query(&self, query: &str) -> Result<QueryResult>;

    /// `POST /api/connections/save`
    async fn save_connection(
        &self,
        request: &SaveConnectionRequest,
    ) -> Result<SaveResponse>;

    /// `POST /api/connections/delete`
    async fn delete_connection(&self, name: &str) -> Result<MessageResponse>;
}

/// [`ConsoleApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConsoleApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpConsoleApi {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, mut base: Url) -> Self {
        // Url::join drops the last segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base.join(path)?;
        Ok(self.client.request(method, url))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(path, self.request(Method::GET, path)?).await
    }

    async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::POST, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(path, builder).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        debug!(path, "sending request");
        let response = builder.send().await.map_err(|e| {
            warn!(path, error = %e, "request failed");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(path, %status, "response received");

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| {
                warn!(path, error = %e, "malformed response body");
                ApiError::Decode(e.to_string())
            });
        }

        // A non-JSON or empty error body still counts as a server error
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.error);
        warn!(path, %status, ?message, "server returned an error");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ConsoleApi for HttpConsoleApi {
    async fn status(&self) -> Result<ConnectionStatus> {
        self.get(STATUS_PATH).await
    }

    async fn connections(&self) -> Result<ConnectionList> {
        self.get(CONNECTIONS_PATH).await
    }

    async fn set_active(&self, name: &str) -> Result<()> {
        // only the status code matters, the body may be anything
        let body = NameBody { name };
        match self
            .post::<_, serde_json::Value>(SET_ACTIVE_PATH, Some(&body))
            .await
        {
            Ok(_) | Err(ApiError::Decode(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn connect(&self) -> Result<MessageResponse> {
        self.post::<(), _>(CONNECT_PATH, None).await
    }

    async fn disconnect(&self) -> Result<MessageResponse> {
        self.post::<(), _>(DISCONNECT_PATH, None).await
    }

    async fn run_query(&self, query: &str) -> Result<QueryResult> {
        self.post(QUERY_PATH, Some(&QueryBody { query })).await
    }

    async fn save_connection(
        &self,
        request: &SaveConnectionRequest,
    ) -> Result<SaveResponse> {
        self.post(SAVE_PATH, Some(request)).await
    }

    async fn delete_connection(&self, name: &str) -> Result<MessageResponse> {
        self.post(DELETE_PATH, Some(&NameBody { name })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api =
            HttpConsoleApi::new(Url::parse("http://localhost:5001/duck").unwrap());
        assert_eq!(api.base_url().as_str(), "http://localhost:5001/duck/");
        assert_eq!(
            api.base_url().join(STATUS_PATH).unwrap().as_str(),
            "http://localhost:5001/duck/api/status"
        );
    }
}
