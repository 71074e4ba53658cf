use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, Method, Uri},
    routing::get,
    serve, Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::{dishes, orders};
use crate::application::dish_service::DishService;
use crate::application::order_service::OrderService;
use crate::errors::AppError;
use grubdash_types::ports::dish_repository::DishRepository;
use grubdash_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: String,
}

/// Shared handler state: one service per resource.
pub struct AppState<D, O>
where
    D: DishRepository,
    O: OrderRepository,
{
    pub dishes: Arc<DishService<D>>,
    pub orders: Arc<OrderService<O>>,
}

impl<D, O> Clone for AppState<D, O>
where
    D: DishRepository,
    O: OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            dishes: self.dishes.clone(),
            orders: self.orders.clone(),
        }
    }
}

/// Request body `{ "data": {...} }`.
///
/// Anything other than an object under `data` (missing, null, a string, an
/// array) reads as an empty record so field validation reports what is
/// absent. Bodies without a JSON content type are ignored the same way.
/// Malformed JSON is rejected with the usual `{ "error" }` body.
pub struct Payload<T> {
    data: T,
}

impl<T: DeserializeOwned + Default> Payload<T> {
    fn from_body(body: Value) -> Self {
        let data = match body {
            Value::Object(mut fields) => match fields.remove("data") {
                Some(data @ Value::Object(_)) => serde_json::from_value(data).unwrap_or_default(),
                _ => T::default(),
            },
            _ => T::default(),
        };
        Self { data }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self::from_body(Value::Null));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        if bytes.is_empty() {
            return Ok(Self::from_body(Value::Null));
        }
        let body = serde_json::from_slice(&bytes)
            .map_err(|err| AppError::BadRequest(format!("Malformed JSON body: {err}")))?;
        Ok(Self::from_body(body))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

pub struct HttpServer<D, O>
where
    D: DishRepository,
    O: OrderRepository,
{
    pub state: AppState<D, O>,
    pub config: HttpServerConfig,
}

impl<D, O> HttpServer<D, O>
where
    D: DishRepository,
    O: OrderRepository,
{
    pub async fn new(
        dishes: DishService<D>,
        orders: OrderService<O>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState {
                dishes: Arc::new(dishes),
                orders: Arc::new(orders),
            },
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/health", get(health))
            .route(
                "/dishes",
                get(dishes::list_dishes::<D, O>).post(dishes::create_dish::<D, O>),
            )
            .route(
                "/dishes/{dish_id}",
                get(dishes::read_dish::<D, O>).put(dishes::update_dish::<D, O>),
            )
            .route(
                "/orders",
                get(orders::list_orders::<D, O>).post(orders::create_order::<D, O>),
            )
            .route(
                "/orders/{order_id}",
                get(orders::read_order::<D, O>)
                    .put(orders::update_order::<D, O>)
                    .delete(orders::delete_order::<D, O>),
            )
            .fallback(path_not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(CorsLayer::permissive())
            .layer(trace_layer)
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn path_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Path not found: {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{method} not allowed for {}", uri.path()))
}
