//! Dashboard controller over the filter engine.
//!
//! # Responsibility
//! - Drive record fetches and surface fetch failures as a user message.
//! - Forward predicate edits to the filter engine.
//! - Project the visible subset into table rows and chart bars.
//!
//! # Invariants
//! - A failed refresh keeps the previous record set and leaves the visible
//!   subset untouched.
//! - Projections are always derived from the current visible subset.

use crate::fetch::RecordSource;
use crate::filter::{FilterEngine, FilterPredicate, PredicateField};
use crate::model::record::{Column, Record};
use log::{info, warn};

/// Message shown while the last refresh failed.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch users. Please try again.";

/// Message shown in place of the chart when no record is visible.
pub const EMPTY_CHART_MESSAGE: &str = "No data to display in the chart.";

/// Upper bound of the fixed chart value axis.
pub const CHART_AXIS_MAX: i64 = 100;

/// One rendered table row, cells ordered as [`Column::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: i64,
    pub cells: Vec<String>,
}

/// One chart bar for a visible record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: i64,
    /// Bar length as a share of the axis, in `0.0..=1.0`.
    pub fill: f64,
}

/// Stateful dashboard: engine plus the current error message.
#[derive(Debug, Default)]
pub struct Dashboard {
    engine: FilterEngine,
    error: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the full record set from `source`.
    ///
    /// On failure the error message is set and the record set is kept.
    /// Returns whether the fetch succeeded.
    pub fn refresh(&mut self, source: &impl RecordSource) -> bool {
        match source.fetch_records() {
            Ok(records) => {
                info!(
                    "event=dashboard_refresh module=dashboard status=ok count={}",
                    records.len()
                );
                self.engine.set_records(records);
                self.error = None;
                true
            }
            Err(err) => {
                warn!("event=dashboard_refresh module=dashboard status=error error={err}");
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn add_predicate(&mut self) {
        self.engine.add_predicate();
    }

    pub fn remove_predicate(&mut self, index: usize) -> Option<FilterPredicate> {
        self.engine.remove_predicate(index)
    }

    pub fn update_predicate(&mut self, index: usize, field: PredicateField, input: &str) -> bool {
        self.engine.update_predicate(index, field, input)
    }

    pub fn set_predicates(&mut self, predicates: Vec<FilterPredicate>) {
        self.engine.set_predicates(predicates);
    }

    pub fn predicates(&self) -> &[FilterPredicate] {
        self.engine.predicates()
    }

    pub fn visible(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.engine.visible()
    }

    /// Column headers for [`Dashboard::table_rows`].
    pub fn table_header() -> Vec<&'static str> {
        Column::ALL.iter().map(|column| column.label()).collect()
    }

    /// One row per visible record. Absent fields render as empty cells.
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.engine
            .visible()
            .map(|record| TableRow {
                id: record.id,
                cells: Column::ALL
                    .iter()
                    .map(|column| record.field_text(*column).unwrap_or_default())
                    .collect(),
            })
            .collect()
    }

    /// One bar per visible record: label is the name, value is the marks.
    pub fn chart_bars(&self) -> Vec<ChartBar> {
        self.engine
            .visible()
            .map(|record| ChartBar {
                label: record.name.clone(),
                value: record.marks,
                fill: record.marks.clamp(0, CHART_AXIS_MAX) as f64 / CHART_AXIS_MAX as f64,
            })
            .collect()
    }
}
