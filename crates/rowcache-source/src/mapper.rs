//! Row-mapping strategies
//!
//! A [`RowMapper`] turns one raw row into one application row. The strategy
//! is selected by the caller per fetch call; the coordinator applies it to
//! every row the source produces, and only the mapped output reaches the
//! cache.

use rowcache_core::{Result, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Maps one raw row to one application row
pub trait RowMapper: Send + Sync {
    /// The application row shape
    type Output: Serialize + DeserializeOwned + Send;

    /// Map a single raw row
    fn map_row(&self, row: Row) -> Result<Self::Output>;
}

/// Associative pass-through: raw rows are returned untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct RawRows;

impl RowMapper for RawRows {
    type Output = Row;

    fn map_row(&self, row: Row) -> Result<Row> {
        Ok(row)
    }
}

/// Populates each raw row into a typed record by column name
pub struct IntoRecord<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> IntoRecord<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for IntoRecord<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RowMapper for IntoRecord<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    type Output = T;

    fn map_row(&self, row: Row) -> Result<T> {
        row.to_record()
    }
}

/// Caller-supplied transform applied to each raw row
///
/// Extra fixed arguments to the transform are closure captures.
pub struct MapRow<F, T> {
    transform: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> MapRow<F, T>
where
    F: Fn(&Row) -> Result<T> + Send + Sync,
{
    pub fn new(transform: F) -> Self {
        Self {
            transform,
            _marker: PhantomData,
        }
    }
}

impl<F, T> RowMapper for MapRow<F, T>
where
    F: Fn(&Row) -> Result<T> + Send + Sync,
    T: Serialize + DeserializeOwned + Send,
{
    type Output = T;

    fn map_row(&self, row: Row) -> Result<T> {
        (self.transform)(&row)
    }
}

/// Caller-supplied transform applied to a typed record read from each row
///
/// Each row is first populated into a record of type `R`, then passed to the
/// transform. Only the transformed value reaches the cache, never the
/// intermediate record.
pub struct MapRecord<R, F, T> {
    transform: F,
    _marker: PhantomData<fn(R) -> T>,
}

impl<R, F, T> MapRecord<R, F, T>
where
    R: DeserializeOwned,
    F: Fn(&R) -> Result<T> + Send + Sync,
{
    pub fn new(transform: F) -> Self {
        Self {
            transform,
            _marker: PhantomData,
        }
    }
}

impl<R, F, T> RowMapper for MapRecord<R, F, T>
where
    R: DeserializeOwned + Send + Sync,
    F: Fn(&R) -> Result<T> + Send + Sync,
    T: Serialize + DeserializeOwned + Send,
{
    type Output = T;

    fn map_row(&self, row: Row) -> Result<T> {
        let record: R = row.to_record()?;
        (self.transform)(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowcache_core::{QueryError, Value};
    use serde::Deserialize;

    fn user_row() -> Row {
        Row::from_pairs(vec![
            ("id".to_string(), Value::Int(7)),
            ("name".to_string(), Value::Text("Bob".to_string())),
        ])
    }

    #[test]
    fn test_raw_rows_pass_through() {
        let row = user_row();
        let mapped = RawRows.map_row(row.clone()).unwrap();
        assert_eq!(mapped, row);
    }

    #[test]
    fn test_into_record() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct User {
            id: i64,
            name: String,
        }

        let mapper = IntoRecord::<User>::new();
        let user = mapper.map_row(user_row()).unwrap();
        assert_eq!(
            user,
            User {
                id: 7,
                name: "Bob".to_string(),
            }
        );
    }

    #[test]
    fn test_map_row_transform() {
        // The "extra fixed argument" is a closure capture.
        let suffix = "@example.com".to_string();
        let mapper = MapRow::new(move |row: &Row| {
            let name = row.require("name")?.as_text().unwrap_or("").to_lowercase();
            Ok(format!("{}{}", name, suffix))
        });

        let email = mapper.map_row(user_row()).unwrap();
        assert_eq!(email, "bob@example.com");
    }

    #[test]
    fn test_map_row_transform_error_propagates() {
        let mapper = MapRow::new(|row: &Row| {
            row.require("missing")?;
            Ok(0i64)
        });

        assert!(matches!(
            mapper.map_row(user_row()),
            Err(QueryError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_map_record_transform() {
        #[derive(Debug, Serialize, Deserialize)]
        struct User {
            id: i64,
            name: String,
        }

        let mapper = MapRecord::new(|user: &User| Ok(format!("{}#{}", user.name, user.id)));
        let label = mapper.map_row(user_row()).unwrap();
        assert_eq!(label, "Bob#7");
    }
}
