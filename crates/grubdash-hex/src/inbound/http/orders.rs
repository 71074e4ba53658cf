use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::server::{AppState, Payload};
use crate::errors::AppError;
use grubdash_types::domain::envelope::Envelope;
use grubdash_types::domain::order::{Order, OrderInput};
use grubdash_types::ports::dish_repository::DishRepository;
use grubdash_types::ports::order_repository::OrderRepository;

pub(super) async fn create_order<D, O>(
    State(state): State<AppState<D, O>>,
    payload: Payload<OrderInput>,
) -> Result<(StatusCode, Json<Envelope<Order>>), AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let order = state.orders.create_order(payload.into_data()).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(order))))
}

pub(super) async fn read_order<D, O>(
    State(state): State<AppState<D, O>>,
    Path(order_id): Path<String>,
) -> Result<Json<Envelope<Order>>, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let order = state.orders.get_order(&order_id).await?;
    Ok(Json(Envelope::new(order)))
}

pub(super) async fn update_order<D, O>(
    State(state): State<AppState<D, O>>,
    Path(order_id): Path<String>,
    payload: Payload<OrderInput>,
) -> Result<Json<Envelope<Order>>, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let order = state
        .orders
        .update_order(&order_id, payload.into_data())
        .await?;
    Ok(Json(Envelope::new(order)))
}

pub(super) async fn delete_order<D, O>(
    State(state): State<AppState<D, O>>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    state.orders.delete_order(&order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_orders<D, O>(
    State(state): State<AppState<D, O>>,
) -> Result<Json<Envelope<Vec<Order>>>, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let list = state.orders.list_orders().await?;
    Ok(Json(Envelope::new(list)))
}
