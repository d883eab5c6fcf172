//! Query engine.
//!
//! Read-only searches over [`AvlTree`]. Every search that a renderer may
//! animate also reports the keys it visited, in visiting order.

use super::node::{Link, Node};
use super::record::{Category, Record};
use super::tree::AvlTree;
use crate::error::Result;
use std::cmp::Ordering;

/// Outcome of an exact-key search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matching record, if the key is stored.
    pub record: Option<Record>,
    /// Keys visited on the descent, including the match.
    pub path: Vec<i64>,
}

impl SearchResult {
    /// Returns true if the key was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.record.is_some()
    }
}

/// Outcome of a multi-record search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    /// Matching records.
    pub records: Vec<Record>,
    /// Keys visited during the search, in visiting order.
    pub path: Vec<i64>,
}

impl QueryResult {
    /// Returns the keys of the matching records.
    #[must_use]
    pub fn keys(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.key).collect()
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Optional predicates for [`AvlTree::combined_search`].
///
/// Unset predicates match everything; an empty query returns every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedQuery {
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Exact category label.
    pub category: Option<String>,
}

impl CombinedQuery {
    /// Creates a query with no predicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive lower price bound.
    #[must_use]
    pub const fn with_min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Sets the inclusive upper price bound.
    #[must_use]
    pub const fn with_max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Sets the category label to match.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn matches(&self, record: &Record) -> bool {
        self.min_price.is_none_or(|min| record.price >= min)
            && self.max_price.is_none_or(|max| record.price <= max)
            && self
                .category
                .as_deref()
                .is_none_or(|category| record.category == category)
    }
}

/// In-order iterator over the records of an [`AvlTree`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.record)
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a Record;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl AvlTree {
    /// Returns an iterator over the records in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    /// Returns every record in ascending key order.
    #[must_use]
    pub fn in_order(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }

    /// Looks up `key`, recording every node visited on the way down.
    ///
    /// For an absent key the path ends at the last node compared, so it is
    /// non-empty whenever the tree is.
    #[must_use]
    pub fn search(&self, key: i64) -> SearchResult {
        let mut path = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            path.push(node.key());
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => {
                    return SearchResult {
                        record: Some(node.record.clone()),
                        path,
                    };
                }
            };
        }
        SearchResult { record: None, path }
    }

    /// Returns every record with `min <= price <= max`.
    ///
    /// Visits a node's left subtree only when `min < price` and its right
    /// subtree only when `max > price`. Records come back in visiting
    /// (pre-)order, not sorted by key.
    #[must_use]
    pub fn search_by_price_range(&self, min: f64, max: f64) -> QueryResult {
        fn walk(link: &Link, min: f64, max: f64, out: &mut QueryResult) {
            let Some(node) = link else {
                return;
            };
            out.path.push(node.key());

            let price = node.record.price;
            if min <= price && price <= max {
                out.records.push(node.record.clone());
            }
            if min < price {
                walk(&node.left, min, max, out);
            }
            if max > price {
                walk(&node.right, min, max, out);
            }
        }

        let mut result = QueryResult::default();
        walk(&self.root, min, max, &mut result);
        result
    }

    /// Returns every record of `category`, sorted by key.
    ///
    /// The whole tree is visited; the path lists nodes in pre-order.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCategory` if `category` is not one of
    /// Hogar, Cocina, Electrodomesticos or Deportes.
    pub fn search_by_category(&self, category: &str) -> Result<QueryResult> {
        let category: Category = category.parse()?;

        fn walk(link: &Link, label: &str, out: &mut QueryResult) {
            let Some(node) = link else {
                return;
            };
            out.path.push(node.key());
            walk(&node.left, label, out);
            if node.record.category == label {
                out.records.push(node.record.clone());
            }
            walk(&node.right, label, out);
        }

        let mut result = QueryResult::default();
        walk(&self.root, category.as_str(), &mut result);
        Ok(result)
    }

    /// Returns every record satisfying all predicates set on `query`, sorted
    /// by key.
    ///
    /// The left subtree of a node priced below `min_price` and the right
    /// subtree of a node priced above `max_price` are skipped.
    #[must_use]
    pub fn combined_search(&self, query: &CombinedQuery) -> QueryResult {
        fn walk(link: &Link, query: &CombinedQuery, out: &mut QueryResult) {
            let Some(node) = link else {
                return;
            };
            out.path.push(node.key());

            let price = node.record.price;
            if query.min_price.is_none_or(|min| price >= min) {
                walk(&node.left, query, out);
            }
            if query.matches(&node.record) {
                out.records.push(node.record.clone());
            }
            if query.max_price.is_none_or(|max| price <= max) {
                walk(&node.right, query, out);
            }
        }

        let mut result = QueryResult::default();
        walk(&self.root, query, &mut result);
        result
    }

    /// Returns every record with no units in stock, in ascending key order.
    #[must_use]
    pub fn out_of_stock(&self) -> Vec<Record> {
        self.iter()
            .filter(|r| r.is_out_of_stock())
            .cloned()
            .collect()
    }
}
