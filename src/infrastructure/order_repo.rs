use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::OrderRepository;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderRow};

/// Moves the id sequence past a caller-chosen id when the sequence would
/// otherwise hand that id out later. Never lowers the sequence, and leaves it
/// alone for ids below its next value (including zero and negative ids).
const SYNC_ID_SEQUENCE: &str = "SELECT setval('orders_id_seq', $1) \
     WHERE (SELECT CASE WHEN is_called THEN $1 > last_value ELSE $1 >= last_value END \
            FROM orders_id_seq)";

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Order::try_from).transpose()
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order(orders::id.asc())
            .load(&mut conn)?;

        rows.into_iter().map(Order::try_from).collect()
    }

    fn exists_by_id(&self, id: OrderId) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let exists: bool =
            diesel::select(diesel::dsl::exists(orders::table.filter(orders::id.eq(id))))
                .get_result(&mut conn)?;

        Ok(exists)
    }

    fn save(&self, order: Order) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        let row = match order.id {
            None => {
                let row: OrderRow = diesel::insert_into(orders::table)
                    .values(&NewOrderRow::from(&order))
                    .returning(OrderRow::as_returning())
                    .get_result(&mut conn)?;
                log::debug!("Inserted order with assigned id {}", row.id);
                row
            }
            Some(id) => conn.transaction::<_, DomainError, _>(|conn| {
                let row = OrderRow::from_order(id, &order);
                let saved: OrderRow = diesel::insert_into(orders::table)
                    .values(&row)
                    .on_conflict(orders::id)
                    .do_update()
                    .set(&row)
                    .returning(OrderRow::as_returning())
                    .get_result(conn)?;
                diesel::sql_query(SYNC_ID_SEQUENCE)
                    .bind::<diesel::sql_types::BigInt, _>(id)
                    .execute(conn)?;
                Ok(saved)
            })?,
        };

        Order::try_from(row)
    }

    fn delete_by_id(&self, id: OrderId) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let removed = diesel::delete(orders::table.filter(orders::id.eq(id))).execute(&mut conn)?;
        log::debug!("Deleted {} row(s) for order {}", removed, id);

        Ok(())
    }
}
