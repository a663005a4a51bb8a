use studentdash_core::{Column, FilterEngine, FilterPredicate, Gender, PredicateField, Record, Subject};

fn record(id: i64, name: &str, age: Option<u32>, subject: Subject, marks: i64) -> Record {
    Record {
        id,
        name: name.to_string(),
        grade: format!("{}th", 5 + id),
        age,
        gender: Gender::default(),
        subject,
        marks,
    }
}

fn roster() -> Vec<Record> {
    vec![
        record(1, "Alice", Some(14), Subject::Science, 90),
        record(2, "Bob", Some(13), Subject::English, 40),
        record(3, "Chitra", None, Subject::Tamil, 75),
        record(4, "Deepak", Some(15), Subject::Social, 59),
        record(5, "Asha", Some(14), Subject::Mathematics, 98),
    ]
}

fn visible_ids(engine: &FilterEngine) -> Vec<i64> {
    engine.visible().map(|record| record.id).collect()
}

#[test]
fn empty_predicate_sequence_shows_the_full_set() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    engine.set_predicates(Vec::new());
    assert_eq!(visible_ids(&engine), vec![1, 2, 3, 4, 5]);
}

#[test]
fn single_predicate_matches_lowercased_substrings_exactly() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());

    for column in Column::ALL {
        for value in ["a", "4", "SCI", "1", "th"] {
            engine.set_predicates(vec![FilterPredicate::new(column, value)]);
            let expected: Vec<i64> = roster()
                .iter()
                .filter(|record| {
                    record
                        .field_text(column)
                        .is_some_and(|text| text.to_lowercase().contains(&value.to_lowercase()))
                })
                .map(|record| record.id)
                .collect();
            assert_eq!(visible_ids(&engine), expected, "column={column} value={value}");
        }
    }
}

#[test]
fn adding_then_removing_predicates_restores_the_view() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    engine.update_predicate(0, PredicateField::Column, "name");
    engine.update_predicate(0, PredicateField::Value, "a");
    let baseline = visible_ids(&engine);

    engine.add_predicate();
    engine.update_predicate(1, PredicateField::Column, "age");
    engine.update_predicate(1, PredicateField::Value, "14");
    engine.add_predicate();
    engine.update_predicate(2, PredicateField::Column, "subject");
    engine.update_predicate(2, PredicateField::Value, "math");
    assert_eq!(visible_ids(&engine), vec![5]);

    assert!(engine.remove_predicate(1).is_some());
    assert!(engine.remove_predicate(1).is_some());
    assert_eq!(visible_ids(&engine), baseline);
}

#[test]
fn set_predicates_is_idempotent() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    let predicates = vec![
        FilterPredicate::new(Column::Age, "1"),
        FilterPredicate::parse("grade", "th"),
    ];

    engine.set_predicates(predicates.clone());
    let once = visible_ids(&engine);
    engine.set_predicates(predicates.clone());
    assert_eq!(visible_ids(&engine), once);
    assert_eq!(engine.predicates(), predicates.as_slice());
}

#[test]
fn half_entered_predicates_do_not_restrict() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    engine.set_predicates(vec![
        FilterPredicate::parse("", "alice"),
        FilterPredicate::new(Column::Name, ""),
        FilterPredicate::parse("nickname", "bob"),
    ]);
    assert_eq!(engine.visible_len(), 5);
}

#[test]
fn absent_age_is_excluded_by_age_predicates() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    engine.set_predicates(vec![FilterPredicate::new(Column::Age, "1")]);
    assert!(!visible_ids(&engine).contains(&3));
}

#[test]
fn filtering_never_mutates_the_full_set() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    engine.set_predicates(vec![FilterPredicate::new(Column::Name, "zzz")]);

    assert_eq!(engine.visible_len(), 0);
    assert_eq!(engine.records(), roster().as_slice());
}

#[test]
fn remove_out_of_range_on_two_predicates_keeps_sequence() {
    let mut engine = FilterEngine::new();
    engine.set_records(roster());
    engine.set_predicates(vec![
        FilterPredicate::new(Column::Name, "a"),
        FilterPredicate::new(Column::Subject, "english"),
    ]);
    let before = engine.predicates().to_vec();

    assert_eq!(engine.remove_predicate(5), None);
    assert_eq!(engine.predicates(), before.as_slice());
}
