use std::collections::BTreeSet;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::BookLookupError;
use crate::domain::order::{BookInfo, BookInfoMap};
use crate::domain::ports::BookInfoProvider;
use crate::schema::books;

use super::models::BookPriceRow;

impl From<diesel::result::Error> for BookLookupError {
    fn from(e: diesel::result::Error) -> Self {
        BookLookupError::Unavailable(e.to_string())
    }
}

impl From<r2d2::Error> for BookLookupError {
    fn from(e: r2d2::Error) -> Self {
        BookLookupError::Unavailable(e.to_string())
    }
}

/// Resolves book prices and titles straight from the `books` table.
pub struct DieselBookInfoProvider {
    pool: DbPool,
}

impl DieselBookInfoProvider {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BookInfoProvider for DieselBookInfoProvider {
    fn get_books_information(
        &self,
        book_ids: &BTreeSet<i64>,
    ) -> Result<BookInfoMap, BookLookupError> {
        if book_ids.is_empty() {
            return Ok(BookInfoMap::new());
        }

        let mut conn = self.pool.get()?;
        let ids: Vec<i64> = book_ids.iter().copied().collect();

        let rows = books::table
            .filter(books::id.eq_any(ids))
            .select(BookPriceRow::as_select())
            .load(&mut conn)?;

        let found: BookInfoMap = rows
            .into_iter()
            .map(|b| {
                (
                    b.id,
                    BookInfo {
                        price: b.price,
                        title: b.title,
                    },
                )
            })
            .collect();

        // All or nothing: a single unknown id fails the whole lookup.
        if let Some(missing) = book_ids.iter().find(|id| !found.contains(**id)) {
            return Err(BookLookupError::NotFound(*missing));
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::infrastructure::test_support::setup_db;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn resolves_all_requested_books() {
        let (_container, pool) = setup_db().await;
        let provider = DieselBookInfoProvider::new(pool);

        let map = provider
            .get_books_information(&BTreeSet::from([1, 2]))
            .expect("lookup failed");

        assert!(!map.contains(3));
        let go = map.get(1).expect("book 1");
        assert_eq!(go.title, "The Go Programming Language");
        assert_eq!(go.price, BigDecimal::from_str("34.99").expect("valid decimal"));
        assert_eq!(map.get(2).expect("book 2").title, "The Rust Programming Language");
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn unknown_book_fails_the_whole_lookup() {
        let (_container, pool) = setup_db().await;
        let provider = DieselBookInfoProvider::new(pool);

        let err = provider
            .get_books_information(&BTreeSet::from([1, 404, 500]))
            .expect_err("lookup must fail");

        assert!(matches!(err, BookLookupError::NotFound(404)));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn empty_request_resolves_to_empty_map() {
        let (_container, pool) = setup_db().await;
        let provider = DieselBookInfoProvider::new(pool);

        let map = provider
            .get_books_information(&BTreeSet::new())
            .expect("lookup failed");

        assert_eq!(map, BookInfoMap::new());
    }
}
