use std::sync::Arc;

use crate::errors::AppError;
use grubdash_types::domain::order::{Order, OrderInput};
use grubdash_types::ports::id_generator::{IdGenerator, UuidIdGenerator};
use grubdash_types::ports::order_repository::{OrderRepository, OrderWriteError};

pub struct OrderService<R: OrderRepository> {
    repo: R,
    ids: Arc<dyn IdGenerator>,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Order not found with ID: {id}"))
}

fn write_error(id: &str, action: &str, err: OrderWriteError) -> AppError {
    match err {
        OrderWriteError::Missing(_) => not_found(id),
        OrderWriteError::Rejected(reason) => {
            tracing::debug!(order_id = %id, %reason, "rejected order {action}");
            reason.into()
        }
        OrderWriteError::Repo(err) => err.into(),
    }
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_id_generator(repo, Arc::new(UuidIdGenerator))
    }

    pub fn with_id_generator(repo: R, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    pub async fn create_order(&self, input: OrderInput) -> Result<Order, AppError> {
        let draft = input.validate_new().inspect_err(|e| {
            tracing::debug!(reason = %e, "rejected new order");
        })?;
        let order = self
            .repo
            .create(Order::new(self.ids.next_id(), draft))
            .await?;
        tracing::info!(order_id = %order.id, "order created");
        Ok(order)
    }

    /// Resolves a route id to the stored order. Update and delete report a
    /// missing id with the same error from inside their guarded writes.
    pub async fn find_order(&self, id: &str) -> Result<Order, AppError> {
        self.repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, AppError> {
        self.find_order(id).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list().await?)
    }

    /// Validation runs against the stored order inside the repository's
    /// guarded write.
    pub async fn update_order(&self, id: &str, input: OrderInput) -> Result<Order, AppError> {
        let updated = self
            .repo
            .update_with(id, Box::new(move |order: &mut Order| order.apply_update(input)))
            .await
            .map_err(|e| write_error(id, "update", e))?;
        tracing::info!(order_id = %id, status = ?updated.status, "order updated");
        Ok(updated)
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), AppError> {
        self.repo
            .delete_if(id, Box::new(|order: &Order| order.ensure_deletable()))
            .await
            .map_err(|e| write_error(id, "delete", e))?;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }
}
