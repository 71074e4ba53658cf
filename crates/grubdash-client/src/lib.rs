use std::time::Duration;

use anyhow::Context;
use grubdash_types::domain::dish::Dish;
use grubdash_types::domain::envelope::Envelope;
use grubdash_types::domain::order::{Order, OrderLine, OrderStatus};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct GrubDashClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct GrubDashClient {
    base: Url,
    client: reqwest::Client,
}

/// A non-success answer from the service, carrying its `error` message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

async fn read_data<T: DeserializeOwned>(res: Response) -> anyhow::Result<T> {
    let res = check_status(res).await?;
    let envelope: Envelope<T> = res.json().await.context("malformed response body")?;
    Ok(envelope.into_inner())
}

async fn check_status(res: Response) -> anyhow::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    tracing::debug!(%status, %message, "request rejected");
    Err(ApiError { status, message }.into())
}

impl GrubDashClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<GrubDashClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(GrubDashClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn create_dish(&self, req: &DishRequest) -> anyhow::Result<Dish> {
        let res = self
            .client
            .post(self.url("dishes")?)
            .json(&Envelope::new(req))
            .send()
            .await?;
        read_data(res).await
    }

    pub async fn get_dish(&self, id: &str) -> anyhow::Result<Dish> {
        let res = self
            .client
            .get(self.url(&format!("dishes/{id}"))?)
            .send()
            .await?;
        read_data(res).await
    }

    pub async fn update_dish(&self, id: &str, req: &DishRequest) -> anyhow::Result<Dish> {
        let res = self
            .client
            .put(self.url(&format!("dishes/{id}"))?)
            .json(&Envelope::new(req))
            .send()
            .await?;
        read_data(res).await
    }

    pub async fn list_dishes(&self) -> anyhow::Result<Vec<Dish>> {
        let res = self.client.get(self.url("dishes")?).send().await?;
        read_data(res).await
    }

    pub async fn create_order(&self, req: &OrderRequest) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("orders")?)
            .json(&Envelope::new(req))
            .send()
            .await?;
        read_data(res).await
    }

    pub async fn get_order(&self, id: &str) -> anyhow::Result<Order> {
        let res = self
            .client
            .get(self.url(&format!("orders/{id}"))?)
            .send()
            .await?;
        read_data(res).await
    }

    pub async fn update_order(&self, id: &str, req: &OrderRequest) -> anyhow::Result<Order> {
        let res = self
            .client
            .put(self.url(&format!("orders/{id}"))?)
            .json(&Envelope::new(req))
            .send()
            .await?;
        read_data(res).await
    }

    pub async fn delete_order(&self, id: &str) -> anyhow::Result<()> {
        let res = self
            .client
            .delete(self.url(&format!("orders/{id}"))?)
            .send()
            .await?;
        check_status(res).await?;
        Ok(())
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self.client.get(self.url("orders")?).send().await?;
        read_data(res).await
    }
}

impl GrubDashClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<GrubDashClient> {
        if let Some(client) = self.client {
            return Ok(GrubDashClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(GrubDashClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DishRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub dishes: Vec<OrderLine>,
}
