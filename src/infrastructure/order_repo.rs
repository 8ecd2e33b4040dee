use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::RepositoryError;
use crate::domain::order::{Order, OrderItem};
use crate::domain::ports::OrderRepository;
use crate::schema::{books, order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderHistoryRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for RepositoryError {
    fn from(e: diesel::result::Error) -> Self {
        RepositoryError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for RepositoryError {
    fn from(e: r2d2::Error) -> Self {
        RepositoryError::Storage(e.to_string())
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
    fn save_order(
        &self,
        customer_id: i64,
        order_date: DateTime<Utc>,
        items: &[OrderItem],
    ) -> Result<i64, RepositoryError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let order_id: i64 = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_id,
                    order_date,
                })
                .returning(orders::id)
                .get_result(conn)?;

            let new_items: Vec<NewOrderItemRow> = items
                .iter()
                .map(|i| NewOrderItemRow {
                    order_id,
                    book_id: i.book_id,
                    quantity: i.quantity,
                    price: i.price.clone(),
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&new_items)
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn get_orders_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<OrderHistoryRow> = order_items::table
            .inner_join(orders::table)
            .inner_join(books::table)
            .filter(orders::customer_id.eq(customer_id))
            .order((orders::id.desc(), order_items::id.asc()))
            .select((
                orders::id,
                orders::customer_id,
                orders::order_date,
                order_items::book_id,
                books::title,
                order_items::quantity,
                order_items::price,
            ))
            .load(&mut conn)?;

        Ok(group_rows(rows))
    }
}

/// Folds joined rows, already sorted by order id, into one `Order` each.
/// `total` is left at zero; the service derives it from the items.
fn group_rows(rows: Vec<OrderHistoryRow>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();

    for row in rows {
        let item = OrderItem {
            book_id: row.book_id,
            quantity: row.quantity,
            price: row.price,
            book_title: row.book_title,
        };
        match orders.last_mut() {
            Some(order) if order.id == row.order_id => order.items.push(item),
            _ => orders.push(Order {
                id: row.order_id,
                customer_id: row.customer_id,
                order_date: row.order_date,
                total: Default::default(),
                items: vec![item],
            }),
        }
    }

    orders
}
