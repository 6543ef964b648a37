use action_utils::{ActionItem, CreateItemRequest, ItemId, MessageResponse, UpdateItemRequest};
use reqwest::StatusCode;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/items";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("text must not be blank")]
    EmptyText,
    #[error("request failed: {0}")]
    Network(String),
    #[error("rejected by server: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("could not read response: {0}")]
    Decode(String),
    #[error("no item with id {0}")]
    NotFound(ItemId),
}

/// The items API as seen from the client.
#[allow(async_fn_in_trait)]
pub trait ItemsClient {
    async fn list(&self) -> Result<Vec<ActionItem>, ClientError>;

    async fn create(&self, request: &CreateItemRequest) -> Result<ActionItem, ClientError>;

    /// `Ok(None)` means the server has no item with this id.
    async fn update(
        &self,
        id: &ItemId,
        request: &UpdateItemRequest,
    ) -> Result<Option<ActionItem>, ClientError>;

    async fn delete(&self, id: &ItemId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpItemsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpItemsClient {
    /// `base_url` points at the collection, e.g. `http://localhost:5000/api/items`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &ItemId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl Default for HttpItemsClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ItemsClient for HttpItemsClient {
    async fn list(&self) -> Result<Vec<ActionItem>, ClientError> {
        let response = self.http.get(&self.base_url).send().await.map_err(network)?;
        decode(check(response).await?).await
    }

    async fn create(&self, request: &CreateItemRequest) -> Result<ActionItem, ClientError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(network)?;
        decode(check(response).await?).await
    }

    async fn update(
        &self,
        id: &ItemId,
        request: &UpdateItemRequest,
    ) -> Result<Option<ActionItem>, ClientError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        decode(check(response).await?).await
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(network)?;
        let _ack: MessageResponse = decode(check(response).await?).await?;
        Ok(())
    }
}

fn network(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    Err(error_for_status(status, message))
}

fn error_for_status(status: StatusCode, message: String) -> ClientError {
    if status == StatusCode::BAD_REQUEST {
        ClientError::Validation(message)
    } else if status.is_server_error() {
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    } else {
        ClientError::UnexpectedStatus(status.as_u16())
    }
}
