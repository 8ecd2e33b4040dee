use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::{books, order_items, orders};

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub order_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// One row of the `order_items ⋈ orders ⋈ books` history query.
#[derive(Debug, Queryable)]
pub struct OrderHistoryRow {
    pub order_id: i64,
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
    pub book_id: i64,
    pub book_title: String,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookPriceRow {
    pub id: i64,
    pub title: String,
    pub price: BigDecimal,
}
