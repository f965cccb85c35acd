use super::errors::DomainError;
use super::order::{Order, OrderId};

/// Persistence port for orders.
///
/// Implementations only report data or storage failures; domain rules such
/// as "update requires prior existence" belong to the service layer.
pub trait OrderRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;
    fn find_all(&self) -> Result<Vec<Order>, DomainError>;
    fn exists_by_id(&self, id: OrderId) -> Result<bool, DomainError>;
    /// Insert-or-replace. An order without an id receives a fresh one; an
    /// order with an id overwrites the stored record or is inserted under it.
    fn save(&self, order: Order) -> Result<Order, DomainError>;
    /// Removing an absent id is a no-op.
    fn delete_by_id(&self, id: OrderId) -> Result<(), DomainError>;
}

impl<R: OrderRepository + ?Sized> OrderRepository for Box<R> {
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        (**self).find_all()
    }

    fn exists_by_id(&self, id: OrderId) -> Result<bool, DomainError> {
        (**self).exists_by_id(id)
    }

    fn save(&self, order: Order) -> Result<Order, DomainError> {
        (**self).save(order)
    }

    fn delete_by_id(&self, id: OrderId) -> Result<(), DomainError> {
        (**self).delete_by_id(id)
    }
}
