use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Index;
use std::slice;

/// Untyped JSON objects returned by the tax endpoints.
macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            pub fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }

            pub fn into_map(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(map: Map<String, Value>) -> Self {
                $name(map)
            }
        }
    };
}

opaque_record!(
    /// Current tax state (`GET /taxes`)
    Tax
);
opaque_record!(
    /// One entry of the tax history
    History
);
opaque_record!(
    /// One tax payment entry
    Payment
);

/// Ordered, read-only list of records from a response `{"records": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Records<T> {
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

pub type HistoryRecords = Records<History>;
pub type PaymentRecords = Records<Payment>;

impl<T> Records<T> {
    pub fn new(records: Vec<T>) -> Self {
        Records { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, or `None` when out of bounds
    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Records::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Records<T> {
    fn from(records: Vec<T>) -> Self {
        Records::new(records)
    }
}

impl<T> FromIterator<T> for Records<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Records::new(iter.into_iter().collect())
    }
}

/// Panics when `index >= len()`; use [`Records::get`] to check instead.
impl<T> Index<usize> for Records<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.records[index]
    }
}

impl<'a, T> IntoIterator for &'a Records<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T> IntoIterator for Records<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
