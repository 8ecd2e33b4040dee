use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::errors::{BookLookupError, RepositoryError};
use super::order::{BookInfoMap, Order, OrderItem};

pub trait OrderRepository: Send + Sync + 'static {
    /// Persists the order row and all of its items atomically, returning the
    /// storage-assigned order id.
    fn save_order(
        &self,
        customer_id: i64,
        order_date: DateTime<Utc>,
        items: &[OrderItem],
    ) -> Result<i64, RepositoryError>;

    /// All orders of `customer_id`, newest id first, items carrying the
    /// book's current title. Empty when the customer has none.
    fn get_orders_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, RepositoryError>;
}

pub trait BookInfoProvider: Send + Sync + 'static {
    /// Resolves every id in `book_ids` or fails as a whole.
    fn get_books_information(&self, book_ids: &BTreeSet<i64>)
        -> Result<BookInfoMap, BookLookupError>;
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn save_order(
        &self,
        customer_id: i64,
        order_date: DateTime<Utc>,
        items: &[OrderItem],
    ) -> Result<i64, RepositoryError> {
        (**self).save_order(customer_id, order_date, items)
    }

    fn get_orders_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, RepositoryError> {
        (**self).get_orders_by_customer(customer_id)
    }
}

impl<T: BookInfoProvider + ?Sized> BookInfoProvider for Arc<T> {
    fn get_books_information(
        &self,
        book_ids: &BTreeSet<i64>,
    ) -> Result<BookInfoMap, BookLookupError> {
        (**self).get_books_information(book_ids)
    }
}
