use roster_core::db::open_db_in_memory;
use roster_core::{
    RosterService, RosterServiceError, SqliteStudentRepository, StudentDraft, ValidationError,
};

fn draft(id: &str, name: &str, email: &str) -> StudentDraft {
    StudentDraft::new(id, name, "", email)
}

fn rejection(err: RosterServiceError) -> ValidationError {
    err.validation()
        .unwrap_or_else(|| panic!("expected validation error, got {err}"))
}

#[test]
fn valid_submission_appends_exactly_one_record() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));

    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    let added = service
        .add_student(StudentDraft::new("S2", "Bao", "2003-12-01", "bao@x.com"))
        .unwrap();

    let students = service.list_students().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[1], added);
    assert!(added.status);
    assert_eq!(added.day_of_birth, "2003-12-01");
}

#[test]
fn example_scenario_rejects_reused_id() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));

    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    let stored = service.list_students().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, "S1");
    assert_eq!(stored[0].name, "An");
    assert_eq!(stored[0].email, "an@x.com");
    assert_eq!(stored[0].day_of_birth, "");
    assert!(stored[0].status);

    let err = service
        .add_student(draft("S1", "Bao", "b@x.com"))
        .unwrap_err();
    assert_eq!(rejection(err), ValidationError::DuplicateId);
    assert_eq!(service.list_students().unwrap(), stored);
}

#[test]
fn validation_reports_only_the_first_failing_check() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    service.add_student(draft("S1", "An", "an@x.com")).unwrap();

    let cases = [
        (draft("", "Bao", "bad@@x"), ValidationError::MissingRequiredField),
        (draft("S2", "", "b@x.com"), ValidationError::MissingRequiredField),
        (draft("S2", "Bao", ""), ValidationError::MissingRequiredField),
        (draft("S1", "Bao", "an@x.com"), ValidationError::DuplicateId),
        (draft("S1", "Bao", "bad@@x"), ValidationError::DuplicateId),
        (draft("S2", "Bao", "an@x.com"), ValidationError::DuplicateEmail),
        (draft("S2", "Bao", "bad@@x"), ValidationError::MalformedEmail),
    ];

    for (input, expected) in cases {
        let err = service.add_student(input.clone()).unwrap_err();
        assert_eq!(rejection(err), expected, "input: {input:?}");
    }
    assert_eq!(service.list_students().unwrap().len(), 1);
}

#[test]
fn block_is_idempotent_and_keeps_position() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    service.add_student(draft("S2", "Bao", "bao@x.com")).unwrap();

    assert!(service.block_student("S1").unwrap());
    assert!(service.block_student("S1").unwrap());

    let students = service.list_students().unwrap();
    assert_eq!(students[0].id, "S1");
    assert!(!students[0].status);
    assert!(students[1].status);
}

#[test]
fn block_unknown_id_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    let revision = service.revision();

    assert!(!service.block_student("S9").unwrap());
    assert_eq!(service.revision(), revision);
    assert!(service.list_students().unwrap()[0].status);
}

#[test]
fn delete_removes_only_the_matching_record() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    for (id, email) in [("S1", "a@x.com"), ("S2", "b@x.com"), ("S3", "c@x.com")] {
        service.add_student(draft(id, "Name", email)).unwrap();
    }

    assert!(service.delete_student("S2").unwrap());
    assert!(!service.delete_student("S2").unwrap());
    assert!(!service.delete_student("missing").unwrap());

    let ids: Vec<String> = service
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.id)
        .collect();
    assert_eq!(ids, vec!["S1", "S3"]);
}

#[test]
fn edit_replaces_fields_in_place_under_same_id() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    service.add_student(draft("S2", "Bao", "bao@x.com")).unwrap();
    service.add_student(draft("S3", "Chi", "chi@x.com")).unwrap();
    service.block_student("S2").unwrap();

    let updated = service
        .edit_student(StudentDraft::new("S2", "Bao Tran", "2002-05-17", "bao.tran@x.com"))
        .unwrap();

    let students = service.list_students().unwrap();
    assert_eq!(students[1], updated);
    assert_eq!(students[1].id, "S2");
    assert_eq!(students[1].email, "bao.tran@x.com");
    assert_eq!(students[1].day_of_birth, "2002-05-17");
    assert!(!students[1].status, "edit must not unblock");
    assert_eq!(students[0].id, "S1");
    assert_eq!(students[2].id, "S3");
}

#[test]
fn edit_keeping_own_email_is_allowed() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    service.add_student(draft("S1", "An", "an@x.com")).unwrap();

    let updated = service
        .edit_student(draft("S1", "An Nguyen", "an@x.com"))
        .unwrap();
    assert_eq!(updated.name, "An Nguyen");
}

#[test]
fn edit_applies_email_rules() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    service.add_student(draft("S2", "Bao", "bao@x.com")).unwrap();
    let before = service.list_students().unwrap();

    let taken = service
        .edit_student(draft("S2", "Bao", "an@x.com"))
        .unwrap_err();
    assert_eq!(rejection(taken), ValidationError::DuplicateEmail);

    let malformed = service
        .edit_student(draft("S2", "Bao", "bad@@x"))
        .unwrap_err();
    assert_eq!(rejection(malformed), ValidationError::MalformedEmail);

    let blank = service.edit_student(draft("S2", "", "bao@x.com")).unwrap_err();
    assert_eq!(rejection(blank), ValidationError::MissingRequiredField);

    assert_eq!(service.list_students().unwrap(), before);
}

#[test]
fn edit_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));

    let err = service
        .edit_student(draft("S9", "Ghost", "ghost@x.com"))
        .unwrap_err();
    assert!(matches!(err, RosterServiceError::StudentNotFound(id) if id == "S9"));
}

#[test]
fn revision_moves_only_on_persisted_changes() {
    let conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(SqliteStudentRepository::new(&conn));
    assert_eq!(service.revision(), 0);

    service.add_student(draft("S1", "An", "an@x.com")).unwrap();
    assert_eq!(service.revision(), 1);

    service.add_student(draft("S1", "An", "an@x.com")).unwrap_err();
    service.delete_student("missing").unwrap();
    assert_eq!(service.revision(), 1);

    service.delete_student("S1").unwrap();
    assert_eq!(service.revision(), 2);
}
