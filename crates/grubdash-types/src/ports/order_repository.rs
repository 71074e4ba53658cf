use async_trait::async_trait;

use super::RepoError;
use crate::domain::order::{Order, OrderError};

/// Rewrites a stored order in place, or refuses with the reason.
pub type OrderEdit = Box<dyn FnOnce(&mut Order) -> Result<(), OrderError> + Send>;
/// Decides from an order's current state whether it may be removed.
pub type OrderGuard = Box<dyn FnOnce(&Order) -> Result<(), OrderError> + Send>;

#[derive(thiserror::Error, Debug)]
pub enum OrderWriteError {
    #[error("no order with id {0}")]
    Missing(String),
    #[error(transparent)]
    Rejected(#[from] OrderError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: Order) -> Result<Order, RepoError>;
    async fn get(&self, id: &str) -> Result<Option<Order>, RepoError>;
    /// All orders in the order they were created.
    async fn list(&self) -> Result<Vec<Order>, RepoError>;
    /// Runs `edit` against the current record while no other writer can
    /// touch it. Nothing is stored when `edit` fails.
    async fn update_with(&self, id: &str, edit: OrderEdit) -> Result<Order, OrderWriteError>;
    /// Removes the order only if `guard` accepts the record as it is at the
    /// moment of removal.
    async fn delete_if(&self, id: &str, guard: OrderGuard) -> Result<Order, OrderWriteError>;
}
