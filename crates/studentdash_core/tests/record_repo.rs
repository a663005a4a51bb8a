use studentdash_core::db::open_db_in_memory;
use studentdash_core::{
    Gender, NewRecord, RecordRepository, RecordService, RecordServiceError, RecordSource,
    RepoError, SqliteRecordRepository, Subject,
};

fn student(name: &str, subject: Subject, marks: i64) -> NewRecord {
    NewRecord {
        marks,
        ..NewRecord::new(name, "9th", subject)
    }
}

#[test]
fn create_and_list_round_trip_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let first = repo.create_record(&student("Alice", Subject::Science, 90)).unwrap();
    let second = repo.create_record(&student("Bob", Subject::English, 40)).unwrap();
    assert!(first < second);

    let records = repo.list_records().unwrap();
    let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(records[0].id, first);
    assert_eq!(records[0].gender, Gender::PreferNotToSay);
    assert_eq!(repo.count_records().unwrap(), 2);
}

#[test]
fn create_trims_name_and_grade() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    repo.create_record(&NewRecord::new("  Alice  ", " 9th ", Subject::Tamil))
        .unwrap();

    let record = &repo.list_records().unwrap()[0];
    assert_eq!(record.name, "Alice");
    assert_eq!(record.grade, "9th");
}

#[test]
fn create_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let err = repo
        .create_record(&NewRecord::new(" ", "9th", Subject::Tamil))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count_records().unwrap(), 0);
}

#[test]
fn list_rejects_unknown_persisted_subject() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO students (name, grade, subject) VALUES ('Zed', '9th', 'History');",
        [],
    )
    .unwrap();

    let err = SqliteRecordRepository::new(&conn).list_records().unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("History")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fetch_all_reports_empty_store_as_no_records() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let err = service.fetch_all().unwrap_err();
    assert!(matches!(err, RecordServiceError::NoRecords));
    assert_eq!(err.to_string(), "No users found");
}

#[test]
fn import_validates_whole_batch_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let batch = vec![
        student("Alice", Subject::Science, 90),
        NewRecord::new("Bob", "", Subject::English),
    ];
    let err = service.import(&batch).unwrap_err();
    assert!(matches!(err, RecordServiceError::InvalidInput { index: 1, .. }));
    assert_eq!(service.count().unwrap(), 0);

    let ids = service.import(&batch[..1]).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(service.fetch_all().unwrap()[0].id, ids[0]);
}

#[test]
fn service_acts_as_record_source() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let err = service.fetch_records().unwrap_err();
    assert_eq!(err.message(), "No users found");

    service.import(&[student("Alice", Subject::Science, 90)]).unwrap();
    assert_eq!(service.fetch_records().unwrap().len(), 1);
}

#[test]
fn create_records_rolls_back_the_whole_batch_on_storage_failure() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_boom BEFORE INSERT ON students
         WHEN NEW.name = 'Boom'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let err = repo
        .create_records(&[
            student("Alice", Subject::Science, 90),
            student("Boom", Subject::English, 40),
        ])
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(repo.count_records().unwrap(), 0);

    let ids = repo
        .create_records(&[student("Alice", Subject::Science, 90)])
        .unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(repo.count_records().unwrap(), 1);
}

#[test]
fn import_leaves_no_rows_when_a_later_insert_fails() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_boom BEFORE INSERT ON students
         WHEN NEW.name = 'Boom'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let err = service
        .import(&[
            student("Alice", Subject::Science, 90),
            student("Boom", Subject::English, 40),
        ])
        .unwrap_err();
    assert!(matches!(err, RecordServiceError::Repo(_)));
    assert_eq!(service.count().unwrap(), 0);
}
