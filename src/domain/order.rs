use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::{BookLookupError, DomainError};

/// A line of a purchase request, as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRequestItem {
    pub book_id: i64,
    pub quantity: i32,
}

/// A persisted order line. `price` is the unit price captured when the order
/// was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub book_id: i64,
    pub quantity: i32,
    pub price: BigDecimal,
    pub book_title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
    pub total: BigDecimal,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInfo {
    pub price: BigDecimal,
    pub title: String,
}

/// Book information keyed by book id, as returned by a catalog lookup.
///
/// Absent ids are errors, never defaults: a missing entry must not turn
/// into a zero price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInfoMap(HashMap<i64, BookInfo>);

impl BookInfoMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, book_id: i64, info: BookInfo) {
        self.0.insert(book_id, info);
    }

    pub fn get(&self, book_id: i64) -> Result<&BookInfo, DomainError> {
        self.0
            .get(&book_id)
            .ok_or(DomainError::BookLookupFailed(BookLookupError::NotFound(
                book_id,
            )))
    }

    pub fn contains(&self, book_id: i64) -> bool {
        self.0.contains_key(&book_id)
    }
}

impl FromIterator<(i64, BookInfo)> for BookInfoMap {
    fn from_iter<I: IntoIterator<Item = (i64, BookInfo)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sum of `price * quantity` over `items`.
pub fn calculate_total(items: &[OrderItem]) -> BigDecimal {
    items.iter().fold(BigDecimal::from(0), |acc, item| {
        acc + item.price.clone() * BigDecimal::from(item.quantity)
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::errors::ErrorKind;

    fn item(book_id: i64, quantity: i32, price: &str) -> OrderItem {
        OrderItem {
            book_id,
            quantity,
            price: BigDecimal::from_str(price).expect("valid decimal"),
            book_title: String::new(),
        }
    }

    #[test]
    fn total_of_single_item() {
        assert_eq!(calculate_total(&[item(1, 2, "10.0")]), BigDecimal::from(20));
    }

    #[test]
    fn total_of_multiple_items() {
        let items = [item(1, 2, "10.0"), item(2, 1, "20.0")];
        assert_eq!(calculate_total(&items), BigDecimal::from(40));
    }

    #[test]
    fn total_of_no_items_is_zero() {
        assert_eq!(calculate_total(&[]), BigDecimal::from(0));
    }

    #[test]
    fn total_with_large_quantity_is_exact() {
        assert_eq!(calculate_total(&[item(1, 1000, "0.1")]), BigDecimal::from(100));
    }

    #[test]
    fn total_keeps_cents() {
        let items = [item(1, 3, "0.10"), item(2, 1, "0.20")];
        assert_eq!(
            calculate_total(&items),
            BigDecimal::from_str("0.50").expect("valid decimal")
        );
    }

    #[test]
    fn book_info_map_absent_key_is_lookup_failure() {
        let map: BookInfoMap = [(
            1,
            BookInfo {
                price: BigDecimal::from(10),
                title: "A".to_string(),
            },
        )]
        .into_iter()
        .collect();

        assert!(map.contains(1));
        assert_eq!(map.get(1).expect("present").title, "A");

        let err = map.get(2).expect_err("absent id must fail");
        assert_eq!(err.kind(), ErrorKind::BookLookupFailed);
        assert!(matches!(
            err,
            DomainError::BookLookupFailed(BookLookupError::NotFound(2))
        ));
    }
}
