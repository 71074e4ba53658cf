use async_trait::async_trait;

use super::RepoError;
use crate::domain::dish::Dish;

#[async_trait]
pub trait DishRepository: Send + Sync + 'static {
    async fn create(&self, dish: Dish) -> Result<Dish, RepoError>;
    async fn get(&self, id: &str) -> Result<Option<Dish>, RepoError>;
    /// All dishes in the order they were created.
    async fn list(&self) -> Result<Vec<Dish>, RepoError>;
    /// Replaces the stored dish with the same id. `None` when there is none.
    async fn update(&self, dish: Dish) -> Result<Option<Dish>, RepoError>;
}
