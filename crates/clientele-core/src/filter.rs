//! # Customer Filter Criteria
//!
//! Optional predicates that narrow the customer list. An empty filter
//! matches every row.
//!
//! ## Matching (applied by the store, not here)
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ Field        │ Match                                                    │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ city         │ case-insensitive substring                               │
//! │ state        │ case-insensitive substring                               │
//! │ pincode      │ exact                                                    │
//! │ search       │ substring of full name or phone                          │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank values count as "not set".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pagination::PageRequest;

/// Filter criteria for the customer list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub pincode: Option<String>,

    /// Free-text search over name and phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub search: Option<String>,
}

impl CustomerFilter {
    /// A filter that matches all rows.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to customers whose city contains `city`.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Restricts to customers whose state contains `state`.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Restricts to customers with exactly this pincode.
    pub fn pincode(mut self, pincode: impl Into<String>) -> Self {
        self.pincode = Some(pincode.into());
        self
    }

    /// Restricts to customers whose name or phone contains `term`.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Trimmed city criterion, `None` when unset or blank.
    pub fn city_term(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    /// Trimmed state criterion, `None` when unset or blank.
    pub fn state_term(&self) -> Option<&str> {
        non_blank(&self.state)
    }

    /// Trimmed pincode criterion, `None` when unset or blank.
    pub fn pincode_term(&self) -> Option<&str> {
        non_blank(&self.pincode)
    }

    /// Trimmed search criterion, `None` when unset or blank.
    pub fn search_term(&self) -> Option<&str> {
        non_blank(&self.search)
    }

    /// Returns true if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.city_term().is_none()
            && self.state_term().is_none()
            && self.pincode_term().is_none()
            && self.search_term().is_none()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Customer Query
// =============================================================================

/// Ordering of the customer list by `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    NewestFirst,
    OldestFirst,
}

/// A complete read request against the customer table.
///
/// `page: None` returns every matching row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CustomerQuery {
    pub filter: CustomerFilter,
    pub order: SortOrder,
    pub page: Option<PageRequest>,
}

impl CustomerQuery {
    /// Newest-first page of customers matching `filter`.
    pub fn page(page: PageRequest, filter: CustomerFilter) -> Self {
        CustomerQuery {
            filter,
            order: SortOrder::NewestFirst,
            page: Some(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_mark_unset_criteria_optional() {
        let decl = CustomerFilter::decl();
        for field in ["city", "state", "pincode", "search"] {
            assert!(decl.contains(&format!("{}?: string", field)), "{}", decl);
        }
        assert!(!decl.contains("null"));
    }

    #[test]
    fn test_default_filter_is_empty() {
        assert!(CustomerFilter::all().is_empty());
    }

    #[test]
    fn test_blank_criteria_count_as_unset() {
        let filter = CustomerFilter::all().city("   ").search("");
        assert!(filter.is_empty());
        assert_eq!(filter.city_term(), None);
    }

    #[test]
    fn test_terms_are_trimmed() {
        let filter = CustomerFilter::all().city(" Pune ").pincode("411001");
        assert!(!filter.is_empty());
        assert_eq!(filter.city_term(), Some("Pune"));
        assert_eq!(filter.pincode_term(), Some("411001"));
    }
}
