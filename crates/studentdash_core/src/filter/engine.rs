use super::predicate::{FilterPredicate, PredicateField};
use crate::model::record::Record;
use log::debug;

/// Live filtered view over a full record set.
///
/// Every mutating call recomputes the visible subset before returning, so
/// reads never observe stale results. Out-of-range predicate indexes are
/// lenient no-ops.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    records: Vec<Record>,
    predicates: Vec<FilterPredicate>,
    // Positions into `records`, ascending.
    visible: Vec<usize>,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Creates an engine with no records and one empty predicate.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            predicates: vec![FilterPredicate::empty()],
            visible: Vec::new(),
        }
    }

    /// Replaces the full record set and re-applies the current predicates.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.recompute();
    }

    /// Replaces the whole predicate sequence.
    pub fn set_predicates(&mut self, predicates: Vec<FilterPredicate>) {
        self.predicates = predicates;
        self.recompute();
    }

    /// Appends an empty predicate. The visible subset is unaffected.
    pub fn add_predicate(&mut self) {
        self.predicates.push(FilterPredicate::empty());
    }

    /// Removes and returns the predicate at `index`.
    ///
    /// Returns `None` and leaves the sequence untouched when `index` is out
    /// of range.
    pub fn remove_predicate(&mut self, index: usize) -> Option<FilterPredicate> {
        if index >= self.predicates.len() {
            debug!(
                "event=filter_remove module=filter status=ignored index={} len={}",
                index,
                self.predicates.len()
            );
            return None;
        }
        let removed = self.predicates.remove(index);
        self.recompute();
        Some(removed)
    }

    /// Replaces one field of the predicate at `index` from raw input.
    ///
    /// For [`PredicateField::Column`], blank or unknown keys leave the column
    /// unset. Returns `false` when `index` is out of range.
    pub fn update_predicate(&mut self, index: usize, field: PredicateField, input: &str) -> bool {
        let Some(predicate) = self.predicates.get_mut(index) else {
            debug!(
                "event=filter_update module=filter status=ignored index={} len={}",
                index,
                self.predicates.len()
            );
            return false;
        };
        predicate.set_field(field, input);
        self.recompute();
        true
    }

    /// Returns the visible subset in full-set order.
    pub fn visible(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.visible.iter().map(move |&position| &self.records[position])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    fn recompute(&mut self) {
        let active: Vec<&FilterPredicate> = self
            .predicates
            .iter()
            .filter(|predicate| predicate.is_active())
            .collect();

        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| active.iter().all(|predicate| predicate.matches(record)))
            .map(|(position, _)| position)
            .collect();

        debug!(
            "event=filter_recompute module=filter status=ok records={} active_predicates={} visible={}",
            self.records.len(),
            active.len(),
            self.visible.len()
        );
    }
}
