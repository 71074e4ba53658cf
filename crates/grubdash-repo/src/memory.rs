use async_trait::async_trait;
use dashmap::DashMap;
use grubdash_types::domain::dish::Dish;
use grubdash_types::domain::order::Order;
use grubdash_types::ports::dish_repository::DishRepository;
use grubdash_types::ports::order_repository::{
    OrderEdit, OrderGuard, OrderRepository, OrderWriteError,
};
use grubdash_types::ports::RepoError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct Slot<T> {
    seq: u64,
    record: T,
}

/// Records keyed by id that remember the order they were appended in.
#[derive(Clone)]
pub struct Collection<T> {
    map: Arc<DashMap<String, Slot<T>>>,
    next_seq: Arc<AtomicU64>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn append(&self, id: String, record: T) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.map.insert(id, Slot { seq, record });
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.map.get(id).map(|slot| slot.record.clone())
    }

    /// Swaps the record in place, keeping its position.
    pub fn replace(&self, id: &str, record: T) -> Option<T> {
        let mut slot = self.map.get_mut(id)?;
        slot.record = record;
        Some(slot.record.clone())
    }

    /// Runs `edit` on a copy of the record while holding its shard lock and
    /// stores the copy only if `edit` succeeds. `None` when `id` is unknown.
    pub fn update_with<E>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Option<Result<T, E>> {
        let mut slot = self.map.get_mut(id)?;
        let mut draft = slot.record.clone();
        Some(edit(&mut draft).map(|()| {
            slot.record = draft;
            slot.record.clone()
        }))
    }

    /// Removes the record if `guard` accepts it, checked under the same lock
    /// as the removal. `None` when `id` is unknown.
    pub fn remove_if<E>(
        &self,
        id: &str,
        guard: impl FnOnce(&T) -> Result<(), E>,
    ) -> Option<Result<T, E>> {
        let mut verdict = None;
        let removed = self.map.remove_if(id, |_, slot| {
            let outcome = guard(&slot.record);
            let accepted = outcome.is_ok();
            verdict = Some(outcome);
            accepted
        });
        match verdict? {
            Ok(()) => removed.map(|(_, slot)| Ok(slot.record)),
            Err(err) => Some(Err(err)),
        }
    }

    pub fn list(&self) -> Vec<T> {
        let mut slots: Vec<(u64, T)> = self
            .map
            .iter()
            .map(|kv| (kv.value().seq, kv.value().record.clone()))
            .collect();
        slots.sort_by_key(|(seq, _)| *seq);
        slots.into_iter().map(|(_, record)| record).collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-lifetime storage for both resources. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    pub dishes: Collection<Dish>,
    pub orders: Collection<Order>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DishRepository for InMemoryRepo {
    async fn create(&self, dish: Dish) -> Result<Dish, RepoError> {
        self.dishes.append(dish.id.clone(), dish.clone());
        Ok(dish)
    }

    async fn get(&self, id: &str) -> Result<Option<Dish>, RepoError> {
        Ok(self.dishes.find(id))
    }

    async fn list(&self) -> Result<Vec<Dish>, RepoError> {
        Ok(self.dishes.list())
    }

    async fn update(&self, dish: Dish) -> Result<Option<Dish>, RepoError> {
        let id = dish.id.clone();
        Ok(self.dishes.replace(&id, dish))
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        self.orders.append(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn get(&self, id: &str) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.find(id))
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        Ok(self.orders.list())
    }

    async fn update_with(&self, id: &str, edit: OrderEdit) -> Result<Order, OrderWriteError> {
        match self.orders.update_with(id, edit) {
            Some(outcome) => Ok(outcome?),
            None => Err(OrderWriteError::Missing(id.to_owned())),
        }
    }

    async fn delete_if(&self, id: &str, guard: OrderGuard) -> Result<Order, OrderWriteError> {
        match self.orders.remove_if(id, guard) {
            Some(outcome) => Ok(outcome?),
            None => Err(OrderWriteError::Missing(id.to_owned())),
        }
    }
}
