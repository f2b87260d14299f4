//! Filters and the rules that edit them

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::STRUCTURAL_KEY;
use super::payload::{FilterPayload, date_range_is_set, is_date_range, is_truthy};
use crate::core_types::{DEFAULT_PAGE_LIMIT, FIRST_PAGE, PageLimit, PageNumber};

/// Filter payload plus page cursor, owned by the view's table state.
///
/// Serializes to camelCase so navigation snapshots match the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub is_active: bool,
    pub page_number: PageNumber,
    pub page_limit: PageLimit,
    pub filter_payload: FilterPayload,
}

impl Filters {
    pub fn new(page_limit: PageLimit, filter_payload: FilterPayload) -> Self {
        Self {
            is_active: false,
            page_number: FIRST_PAGE,
            page_limit: page_limit.max(1),
            filter_payload,
        }
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, FilterPayload::new())
    }
}

/// Which activity rule a view follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityRule {
    /// [`FilterState::handle_filters`]
    #[default]
    ScanValues,
    /// [`FilterState::update_filter`]
    CountKeys,
}

/// Edit rules over caller-owned [`Filters`].
///
/// Holds only the name of the structural key; one instance can serve any
/// number of views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    structural_key: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(STRUCTURAL_KEY)
    }
}

impl FilterState {
    pub fn new(structural_key: impl Into<String>) -> Self {
        Self {
            structural_key: structural_key.into(),
        }
    }

    pub fn structural_key(&self) -> &str {
        &self.structural_key
    }

    /// Value-scanning activity check. Date ranges count only with an
    /// `endDate`, every other field when truthy.
    pub fn is_any_filter_active(&self, payload: &FilterPayload) -> bool {
        payload
            .iter()
            .filter(|(field, _)| field.as_str() != self.structural_key)
            .any(|(_, value)| {
                if is_date_range(value) {
                    date_range_is_set(value)
                } else {
                    is_truthy(value)
                }
            })
    }

    /// Store `value` under `field` (kept even when empty) and rewind to the
    /// first page, then recompute `is_active` by scanning values. With no
    /// field this only recomputes.
    pub fn handle_filters(&self, filters: &mut Filters, field: Option<&str>, value: Value) {
        if let Some(field) = field {
            filters.filter_payload.set(field, value);
            filters.page_number = FIRST_PAGE;
        }
        filters.is_active = self.is_any_filter_active(&filters.filter_payload);
    }

    /// Store `value` under `field`, or drop the key entirely when `value`
    /// is falsy so it never reaches the outgoing payload. `is_active`
    /// becomes "more than one key remains".
    pub fn update_filter(&self, filters: &mut Filters, field: Option<&str>, value: Value) {
        if let Some(field) = field {
            if is_truthy(&value) {
                filters.filter_payload.set(field, value);
            } else {
                filters.filter_payload.remove(field);
            }
            filters.page_number = FIRST_PAGE;
        }
        filters.is_active = filters.filter_payload.len() > 1;
    }

    /// Apply an edit (or only recompute, with no field) under `rule`
    pub fn apply(
        &self,
        rule: ActivityRule,
        filters: &mut Filters,
        field: Option<&str>,
        value: Value,
    ) {
        match rule {
            ActivityRule::ScanValues => self.handle_filters(filters, field, value),
            ActivityRule::CountKeys => self.update_filter(filters, field, value),
        }
    }

    /// Restore `defaults`, carrying over the current structural partition.
    pub fn clear(&self, filters: &mut Filters, defaults: &FilterPayload) {
        let partition = filters.filter_payload.get(&self.structural_key).cloned();
        filters.filter_payload = defaults.clone();
        if let Some(partition) = partition {
            filters.filter_payload.set(&self.structural_key, partition);
        }
        filters.page_number = FIRST_PAGE;
        filters.is_active = self.is_any_filter_active(&filters.filter_payload);
    }

    /// Switch the structural partition. Rewinds the cursor but never
    /// affects `is_active`.
    pub fn set_partition(&self, filters: &mut Filters, value: Value) {
        filters.filter_payload.set(&self.structural_key, value);
        filters.page_number = FIRST_PAGE;
        filters.is_active = self.is_any_filter_active(&filters.filter_payload);
    }
}
