use std::collections::BTreeSet;

use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::order::{calculate_total, Order, OrderItem, OrderRequestItem};
use crate::domain::ports::{BookInfoProvider, OrderRepository};

pub struct OrderService<R, B> {
    repo: R,
    books: B,
}

impl<R: OrderRepository, B: BookInfoProvider> OrderService<R, B> {
    pub fn new(repo: R, books: B) -> Self {
        Self { repo, books }
    }

    /// Validates `items`, prices them from the catalog and stores the order.
    ///
    /// Prices and titles are copied onto the items, so later catalog changes
    /// never alter a placed order. Nothing is written unless the whole order
    /// is.
    pub fn make_order(
        &self,
        customer_id: i64,
        items: Vec<OrderRequestItem>,
    ) -> Result<Order, DomainError> {
        let book_ids = validate_request(&items).inspect_err(|e| {
            log::debug!("rejected order for customer {}: {}", customer_id, e);
        })?;

        let catalog = self
            .books
            .get_books_information(&book_ids)
            .map_err(|e| {
                log::warn!("book lookup failed for customer {}: {}", customer_id, e);
                DomainError::BookLookupFailed(e)
            })?;

        let order_items = items
            .iter()
            .map(|item| {
                let info = catalog.get(item.book_id)?;
                Ok(OrderItem {
                    book_id: item.book_id,
                    quantity: item.quantity,
                    price: info.price.clone(),
                    book_title: info.title.clone(),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let order_date = Utc::now();
        let id = self
            .repo
            .save_order(customer_id, order_date, &order_items)
            .map_err(|e| {
                log::error!("saving order for customer {} failed: {}", customer_id, e);
                DomainError::OrderPersistenceFailed(e)
            })?;

        let total = calculate_total(&order_items);
        log::info!(
            "order {} created for customer {} ({} items, total {})",
            id,
            customer_id,
            order_items.len(),
            total
        );

        Ok(Order {
            id,
            customer_id,
            order_date,
            total,
            items: order_items,
        })
    }

    /// Order history of `customer_id`, newest first. Totals are recomputed
    /// from the items and titles refreshed from the catalog.
    pub fn get_orders_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, DomainError> {
        let mut orders = self
            .repo
            .get_orders_by_customer(customer_id)
            .map_err(|e| {
                log::error!("loading orders of customer {} failed: {}", customer_id, e);
                DomainError::OrderHistoryUnavailable(e)
            })?;

        if orders.is_empty() {
            return Ok(orders);
        }

        let distinct_books: BTreeSet<i64> = orders
            .iter()
            .flat_map(|o| o.items.iter().map(|i| i.book_id))
            .collect();

        let catalog = self
            .books
            .get_books_information(&distinct_books)
            .map_err(|e| {
                log::warn!("book lookup failed for customer {}: {}", customer_id, e);
                DomainError::BookLookupFailed(e)
            })?;

        for order in &mut orders {
            order.total = calculate_total(&order.items);
            for item in &mut order.items {
                item.book_title = catalog.get(item.book_id)?.title.clone();
            }
        }

        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }
}

/// Checks a purchase request and returns its distinct book ids.
///
/// Items are checked one at a time, id before quantity, so the first bad
/// item decides the error. Duplicates are only looked for once every item
/// is well formed.
fn validate_request(items: &[OrderRequestItem]) -> Result<BTreeSet<i64>, DomainError> {
    if items.is_empty() {
        return Err(DomainError::EmptyOrder);
    }

    for item in items {
        if item.book_id <= 0 {
            return Err(DomainError::InvalidBookId(item.book_id));
        }
        if item.quantity <= 0 {
            return Err(DomainError::InvalidQuantity {
                book_id: item.book_id,
                quantity: item.quantity,
            });
        }
    }

    let mut book_ids = BTreeSet::new();
    for item in items {
        if !book_ids.insert(item.book_id) {
            return Err(DomainError::DuplicateBookInOrder(item.book_id));
        }
    }

    Ok(book_ids)
}
