use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId};
use crate::schema::orders;

/// A stored order. Also used as the full-row changeset for upserts, so
/// absent fields overwrite the stored column with NULL.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub product_name: Option<String>,
    pub product_id: Option<i64>,
    pub price: Option<i64>,
}

impl OrderRow {
    pub fn from_order(id: OrderId, order: &Order) -> Self {
        Self {
            id,
            product_name: order.product_name.clone(),
            product_id: order.product_id,
            price: order.price.map(i64::from),
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let price = row
            .price
            .map(u32::try_from)
            .transpose()
            .map_err(|_| {
                DomainError::Internal(format!(
                    "stored price {:?} of order {} is out of range",
                    row.price, row.id
                ))
            })?;

        Ok(Order {
            id: Some(row.id),
            product_name: row.product_name,
            product_id: row.product_id,
            price,
        })
    }
}

/// Row inserted without an id; the sequence assigns one.
#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub product_name: Option<String>,
    pub product_id: Option<i64>,
    pub price: Option<i64>,
}

impl From<&Order> for NewOrderRow {
    fn from(order: &Order) -> Self {
        Self {
            product_name: order.product_name.clone(),
            product_id: order.product_id,
            price: order.price.map(i64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_order() {
        let row = OrderRow {
            id: 3,
            product_name: Some("Widget".to_string()),
            product_id: Some(42),
            price: Some(500),
        };

        let order = Order::try_from(row).expect("conversion failed");

        assert_eq!(order.id, Some(3));
        assert_eq!(order.product_name.as_deref(), Some("Widget"));
        assert_eq!(order.product_id, Some(42));
        assert_eq!(order.price, Some(500));
    }

    #[test]
    fn negative_stored_price_is_an_internal_error() {
        let row = OrderRow {
            id: 3,
            product_name: None,
            product_id: None,
            price: Some(-1),
        };

        assert!(matches!(
            Order::try_from(row),
            Err(DomainError::Internal(_))
        ));
    }

    #[test]
    fn from_order_uses_given_id() {
        let order = Order {
            id: Some(1),
            price: Some(600),
            ..Default::default()
        };

        let row = OrderRow::from_order(9, &order);

        assert_eq!(row.id, 9);
        assert_eq!(row.product_name, None);
        assert_eq!(row.price, Some(600));
    }
}
