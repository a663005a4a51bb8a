use studentdash_core::{
    Dashboard, FetchError, Gender, PredicateField, Record, RecordSource, Subject,
    CHART_AXIS_MAX, FETCH_FAILED_MESSAGE,
};
use std::cell::RefCell;

/// Replays queued fetch outcomes in order.
struct ScriptedSource {
    outcomes: RefCell<Vec<Result<Vec<Record>, FetchError>>>,
}

impl ScriptedSource {
    fn new(mut outcomes: Vec<Result<Vec<Record>, FetchError>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: RefCell::new(outcomes),
        }
    }
}

impl RecordSource for ScriptedSource {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        self.outcomes
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(FetchError::new("exhausted")))
    }
}

fn record(id: i64, name: &str, age: Option<u32>, marks: i64) -> Record {
    Record {
        id,
        name: name.to_string(),
        grade: "9th".to_string(),
        age,
        gender: Gender::Female,
        subject: Subject::Science,
        marks,
    }
}

#[test]
fn successful_refresh_populates_table_and_chart() {
    let source = ScriptedSource::new(vec![Ok(vec![
        record(1, "Alice", Some(14), 90),
        record(2, "Bina", None, 40),
    ])]);
    let mut dashboard = Dashboard::new();

    assert!(dashboard.refresh(&source));
    assert_eq!(dashboard.error(), None);

    assert_eq!(
        Dashboard::table_header(),
        vec!["Name", "Grade", "Age", "Gender", "Subject", "Marks"]
    );
    let rows = dashboard.table_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cells, vec!["Alice", "9th", "14", "Female", "Science", "90"]);
    assert_eq!(rows[1].cells[2], "");

    let bars = dashboard.chart_bars();
    assert_eq!(bars[0].label, "Alice");
    assert_eq!(bars[0].value, 90);
    assert!((bars[0].fill - 0.9).abs() < f64::EPSILON);
}

#[test]
fn failed_refresh_keeps_previous_records() {
    let source = ScriptedSource::new(vec![
        Ok(vec![record(1, "Alice", Some(14), 90)]),
        Err(FetchError::new("connection refused")),
    ]);
    let mut dashboard = Dashboard::new();
    dashboard.refresh(&source);

    assert!(!dashboard.refresh(&source));
    assert_eq!(dashboard.error(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(dashboard.table_rows().len(), 1);
}

#[test]
fn next_successful_refresh_clears_the_error() {
    let source = ScriptedSource::new(vec![
        Err(FetchError::new("timeout")),
        Ok(vec![record(1, "Alice", Some(14), 90)]),
    ]);
    let mut dashboard = Dashboard::new();

    dashboard.refresh(&source);
    assert!(dashboard.error().is_some());
    assert_eq!(dashboard.visible().len(), 0);

    dashboard.refresh(&source);
    assert_eq!(dashboard.error(), None);
    assert_eq!(dashboard.visible().len(), 1);
}

#[test]
fn projections_follow_the_filtered_view() {
    let source = ScriptedSource::new(vec![Ok(vec![
        record(1, "Alice", Some(14), 90),
        record(2, "Bina", None, 40),
    ])]);
    let mut dashboard = Dashboard::new();
    dashboard.refresh(&source);

    dashboard.update_predicate(0, PredicateField::Column, "name");
    dashboard.update_predicate(0, PredicateField::Value, "bin");

    let bars = dashboard.chart_bars();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].label, "Bina");
    assert_eq!(dashboard.table_rows()[0].id, 2);
}

#[test]
fn chart_fill_is_clamped_to_the_axis() {
    let source = ScriptedSource::new(vec![Ok(vec![
        record(1, "Over", None, CHART_AXIS_MAX + 20),
        record(2, "Under", None, -5),
    ])]);
    let mut dashboard = Dashboard::new();
    dashboard.refresh(&source);

    let bars = dashboard.chart_bars();
    assert_eq!(bars[0].value, 120);
    assert_eq!(bars[0].fill, 1.0);
    assert_eq!(bars[1].fill, 0.0);
}
