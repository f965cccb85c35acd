use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::OrderRepository;

#[derive(Debug)]
struct Store {
    orders: BTreeMap<OrderId, Order>,
    /// `None` once an order has been stored at `OrderId::MAX`.
    next_id: Option<OrderId>,
}

/// Process-local order store. Records are kept in id order and are lost on
/// restart.
#[derive(Debug)]
pub struct InMemoryOrderRepository {
    store: Mutex<Store>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                orders: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, DomainError> {
        self.store
            .lock()
            .map_err(|e| DomainError::Internal(format!("order store lock poisoned: {}", e)))
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.lock()?.orders.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.lock()?.orders.values().cloned().collect())
    }

    fn exists_by_id(&self, id: OrderId) -> Result<bool, DomainError> {
        Ok(self.lock()?.orders.contains_key(&id))
    }

    fn save(&self, order: Order) -> Result<Order, DomainError> {
        let mut store = self.lock()?;

        let id = match order.id {
            Some(id) => id,
            None => {
                let id = store.next_id.ok_or_else(|| {
                    DomainError::Internal("no order ids left to assign".to_string())
                })?;
                log::debug!("Assigned id {} to new order", id);
                id
            }
        };
        store.next_id = match (store.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };

        let saved = order.with_id(id);
        store.orders.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete_by_id(&self, id: OrderId) -> Result<(), DomainError> {
        self.lock()?.orders.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(price: u32) -> Order {
        Order {
            product_name: Some("Widget".to_string()),
            price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn save_assigns_sequential_ids() {
        let repo = InMemoryOrderRepository::new();

        let first = repo.save(widget(1)).unwrap();
        let second = repo.save(widget(2)).unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_by_id(1).unwrap(), Some(first));
    }

    #[test]
    fn find_by_id_returns_none_for_unknown_id() {
        let repo = InMemoryOrderRepository::new();

        assert_eq!(repo.find_by_id(42).unwrap(), None);
        assert!(!repo.exists_by_id(42).unwrap());
    }

    #[test]
    fn save_with_unknown_id_inserts_under_that_id() {
        let repo = InMemoryOrderRepository::new();

        let saved = repo.save(widget(5).with_id(10)).unwrap();

        assert_eq!(saved.id, Some(10));
        assert!(repo.exists_by_id(10).unwrap());
    }

    #[test]
    fn assigned_ids_skip_past_explicit_ids() {
        let repo = InMemoryOrderRepository::new();
        repo.save(widget(5).with_id(10)).unwrap();

        let next = repo.save(widget(6)).unwrap();

        assert_eq!(next.id, Some(11));
    }

    #[test]
    fn new_order_after_max_id_fails_instead_of_overwriting() {
        let repo = InMemoryOrderRepository::new();
        let mut first = widget(1).with_id(OrderId::MAX);
        first.product_name = Some("first".to_string());
        repo.save(first.clone()).unwrap();

        let result = repo.save(widget(2));

        assert!(matches!(result, Err(DomainError::Internal(_))));
        assert_eq!(repo.find_by_id(OrderId::MAX).unwrap(), Some(first));
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn explicit_ids_still_accepted_after_max_id() {
        let repo = InMemoryOrderRepository::new();
        repo.save(widget(1).with_id(OrderId::MAX)).unwrap();

        let saved = repo.save(widget(2).with_id(3)).unwrap();

        assert_eq!(saved.id, Some(3));
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn save_with_existing_id_replaces_whole_record() {
        let repo = InMemoryOrderRepository::new();
        let mut original = widget(500);
        original.product_id = Some(42);
        let id = repo.save(original).unwrap().id.unwrap();

        repo.save(Order {
            id: Some(id),
            price: Some(600),
            ..Default::default()
        })
        .unwrap();

        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.price, Some(600));
        assert_eq!(stored.product_name, None);
        assert_eq!(stored.product_id, None);
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn find_all_returns_orders_by_id() {
        let repo = InMemoryOrderRepository::new();
        assert!(repo.find_all().unwrap().is_empty());

        repo.save(widget(1).with_id(5)).unwrap();
        repo.save(widget(2).with_id(2)).unwrap();

        let ids: Vec<_> = repo.find_all().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![Some(2), Some(5)]);
    }

    #[test]
    fn delete_of_absent_id_is_a_no_op() {
        let repo = InMemoryOrderRepository::new();
        let id = repo.save(widget(1)).unwrap().id.unwrap();

        repo.delete_by_id(id).unwrap();
        repo.delete_by_id(id).unwrap();

        assert!(!repo.exists_by_id(id).unwrap());
    }
}
