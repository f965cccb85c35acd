use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::OrderRepository;

/// Service over whichever repository was selected at startup.
pub type DynOrderService = OrderService<Box<dyn OrderRepository>>;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts or overwrites `order`. `None` stands for a request that
    /// carried no order at all.
    pub fn save_order(&self, order: Option<Order>) -> Result<Order, DomainError> {
        let order = order.ok_or_else(|| {
            DomainError::InvalidArgument("an order is required".to_string())
        })?;

        let saved = self.repo.save(order)?;
        log::debug!("Saved order {:?}", saved.id);
        Ok(saved)
    }

    pub fn find_all_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.find_all()
    }

    pub fn find_order_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        self.repo.find_by_id(id)
    }

    /// Replaces a stored order. Orders that were never created (or have been
    /// deleted) are rejected instead of being inserted.
    ///
    /// The existence check and the save are separate repository calls, so a
    /// concurrent delete between them can still lead to an insert.
    pub fn update_order(&self, order: Order) -> Result<Order, DomainError> {
        let Some(id) = order.id else {
            log::warn!("Rejected update of an order without id");
            return Err(DomainError::EntityNotFound);
        };

        if !self.repo.exists_by_id(id)? {
            log::warn!("Rejected update of unknown order {}", id);
            return Err(DomainError::EntityNotFound);
        }

        let updated = self.repo.save(order)?;
        log::debug!("Updated order {}", id);
        Ok(updated)
    }

    /// Deleting an unknown id succeeds without effect.
    pub fn delete_order_by_id(&self, id: OrderId) -> Result<(), DomainError> {
        self.repo.delete_by_id(id)?;
        log::debug!("Deleted order {}", id);
        Ok(())
    }
}
