//! Group record - a set of city names viewed together

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Cities clustered for aggregate reporting
///
/// Members are names only; a group never keeps a city alive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    cities: BTreeSet<String>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Member names, sorted
    pub fn cities(&self) -> &BTreeSet<String> {
        &self.cities
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.contains(city)
    }

    /// Add a member, returning false if it was already present
    pub fn insert(&mut self, city: String) -> bool {
        self.cities.insert(city)
    }

    /// Remove a member, returning false if it was not present
    pub fn remove(&mut self, city: &str) -> bool {
        self.cities.remove(city)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Group {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cities: iter.into_iter().map(Into::into).collect(),
        }
    }
}
