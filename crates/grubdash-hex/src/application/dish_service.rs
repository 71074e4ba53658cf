use std::sync::Arc;

use crate::errors::AppError;
use grubdash_types::domain::dish::{Dish, DishInput};
use grubdash_types::ports::dish_repository::DishRepository;
use grubdash_types::ports::id_generator::{IdGenerator, UuidIdGenerator};

pub struct DishService<R: DishRepository> {
    repo: R,
    ids: Arc<dyn IdGenerator>,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Dish not found with ID: {id}"))
}

impl<R: DishRepository> DishService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_id_generator(repo, Arc::new(UuidIdGenerator))
    }

    pub fn with_id_generator(repo: R, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    pub async fn create_dish(&self, input: DishInput) -> Result<Dish, AppError> {
        let fields = input.validate_new().inspect_err(|e| {
            tracing::debug!(reason = %e, "rejected new dish");
        })?;
        let dish = self.repo.create(Dish::new(self.ids.next_id(), fields)).await?;
        tracing::info!(dish_id = %dish.id, "dish created");
        Ok(dish)
    }

    /// Resolves a route id to the stored dish.
    pub async fn find_dish(&self, id: &str) -> Result<Dish, AppError> {
        self.repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn get_dish(&self, id: &str) -> Result<Dish, AppError> {
        self.find_dish(id).await
    }

    pub async fn update_dish(&self, id: &str, input: DishInput) -> Result<Dish, AppError> {
        let mut dish = self.find_dish(id).await?;
        dish.apply_update(input).inspect_err(|e| {
            tracing::debug!(dish_id = %id, reason = %e, "rejected dish update");
        })?;
        let updated = self.repo.update(dish).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(dish_id = %id, "dish updated");
        Ok(updated)
    }

    pub async fn list_dishes(&self) -> Result<Vec<Dish>, AppError> {
        Ok(self.repo.list().await?)
    }
}
