use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::server::{AppState, Payload};
use crate::errors::AppError;
use grubdash_types::domain::dish::{Dish, DishInput};
use grubdash_types::domain::envelope::Envelope;
use grubdash_types::ports::dish_repository::DishRepository;
use grubdash_types::ports::order_repository::OrderRepository;

pub(super) async fn create_dish<D, O>(
    State(state): State<AppState<D, O>>,
    payload: Payload<DishInput>,
) -> Result<(StatusCode, Json<Envelope<Dish>>), AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let dish = state.dishes.create_dish(payload.into_data()).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(dish))))
}

pub(super) async fn read_dish<D, O>(
    State(state): State<AppState<D, O>>,
    Path(dish_id): Path<String>,
) -> Result<Json<Envelope<Dish>>, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let dish = state.dishes.get_dish(&dish_id).await?;
    Ok(Json(Envelope::new(dish)))
}

pub(super) async fn update_dish<D, O>(
    State(state): State<AppState<D, O>>,
    Path(dish_id): Path<String>,
    payload: Payload<DishInput>,
) -> Result<Json<Envelope<Dish>>, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let dish = state
        .dishes
        .update_dish(&dish_id, payload.into_data())
        .await?;
    Ok(Json(Envelope::new(dish)))
}

pub(super) async fn list_dishes<D, O>(
    State(state): State<AppState<D, O>>,
) -> Result<Json<Envelope<Vec<Dish>>>, AppError>
where
    D: DishRepository,
    O: OrderRepository,
{
    let list = state.dishes.list_dishes().await?;
    Ok(Json(Envelope::new(list)))
}
