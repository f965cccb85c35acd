pub type OrderId = i64;

/// One purchasable line item.
///
/// An order without an `id` has never been persisted. Every other field may
/// be absent independently of the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    pub id: Option<OrderId>,
    pub product_name: Option<String>,
    pub product_id: Option<i64>,
    /// Amount in the smallest currency unit.
    pub price: Option<u32>,
}

impl Order {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn with_id(self, id: OrderId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}
