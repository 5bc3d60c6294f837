use meetmate_core::db::open_db_in_memory;
use meetmate_core::{
    ActionItem, MeetingSession, RepoError, ScreenshotCapture, SessionListQuery, SessionRepository,
    SqliteSessionRepository,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip_preserves_full_aggregate() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let mut session = MeetingSession::new();
    session.notes = "need to send the report by Friday".to_string();
    session.action_items.push(ActionItem {
        task: "send the report by Friday".to_string(),
        assignee: None,
        deadline: Some("Friday".to_string()),
    });
    let mut capture = ScreenshotCapture::new("data:image/png;base64,AAA", 1_700_000_000_000);
    capture.analysis = Some("roadmap slide".to_string());
    session.screenshots.push(capture);
    session.summary = Some("We discussed the report.".to_string());
    session.email = Some("Hi team, ...".to_string());

    let id = repo.create_session(&session).unwrap();
    assert_eq!(id, session.uuid);

    let loaded = repo.get_session(id, false).unwrap().unwrap();
    assert_eq!(loaded, session);
}

#[test]
fn update_replaces_action_items_wholesale() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let mut session = MeetingSession::new();
    session.notes = "notes".to_string();
    session.action_items.push(ActionItem::new("old task one"));
    session.action_items.push(ActionItem::new("old task two"));
    repo.create_session(&session).unwrap();

    session.action_items = vec![ActionItem::new("fresh task")];
    repo.update_session(&session).unwrap();

    let loaded = repo.get_session(session.uuid, false).unwrap().unwrap();
    assert_eq!(loaded.action_items.len(), 1);
    assert_eq!(loaded.action_items[0].task, "fresh task");
}

#[test]
fn child_rows_keep_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let mut session = MeetingSession::new();
    for n in 0..5i64 {
        session.action_items.push(ActionItem::new(format!("task {n}")));
        session
            .screenshots
            .push(ScreenshotCapture::new(format!("data:image/png;base64,{n}"), n));
    }
    repo.create_session(&session).unwrap();

    let loaded = repo.get_session(session.uuid, false).unwrap().unwrap();
    let tasks: Vec<_> = loaded.action_items.iter().map(|i| i.task.as_str()).collect();
    assert_eq!(tasks, ["task 0", "task 1", "task 2", "task 3", "task 4"]);
    let stamps: Vec<_> = loaded
        .screenshots
        .iter()
        .map(|s| s.captured_at_ms)
        .collect();
    assert_eq!(stamps, [0, 1, 2, 3, 4]);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let session = MeetingSession::new();
    let err = repo.update_session(&session).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == session.uuid));
}

#[test]
fn list_excludes_deleted_by_default_and_can_include_them() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let session_a = MeetingSession::new();
    let session_b = MeetingSession::new();
    repo.create_session(&session_a).unwrap();
    repo.create_session(&session_b).unwrap();
    repo.soft_delete_session(session_b.uuid).unwrap();

    let visible = repo.list_sessions(&SessionListQuery::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].uuid, session_a.uuid);

    let include_deleted = SessionListQuery {
        include_deleted: true,
        ..SessionListQuery::default()
    };
    let all = repo.list_sessions(&include_deleted).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn soft_delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let session = MeetingSession::new();
    repo.create_session(&session).unwrap();

    repo.soft_delete_session(session.uuid).unwrap();
    repo.soft_delete_session(session.uuid).unwrap();

    assert!(repo.get_session(session.uuid, false).unwrap().is_none());
    let deleted = repo.get_session(session.uuid, true).unwrap().unwrap();
    assert!(deleted.is_deleted);
}

#[test]
fn soft_delete_missing_session_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let err = repo.soft_delete_session(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let mut invalid = MeetingSession::new();
    invalid.email = Some("email without summary".to_string());

    let create_err = repo.create_session(&invalid).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let mut valid = MeetingSession::new();
    valid.summary = Some("summary".to_string());
    valid.email = Some("email".to_string());
    repo.create_session(&valid).unwrap();

    valid.summary = None;
    let update_err = repo.update_session(&valid).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));
}

#[test]
fn list_pagination_with_limit_and_offset_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let session_a = session_with_fixed_id("00000000-0000-4000-8000-000000000001");
    let session_b = session_with_fixed_id("00000000-0000-4000-8000-000000000002");
    let session_c = session_with_fixed_id("00000000-0000-4000-8000-000000000003");
    repo.create_session(&session_c).unwrap();
    repo.create_session(&session_a).unwrap();
    repo.create_session(&session_b).unwrap();

    conn.execute("UPDATE sessions SET updated_at = 1234567890000;", [])
        .unwrap();

    let query = SessionListQuery {
        include_deleted: true,
        limit: Some(2),
        offset: 1,
    };
    let page = repo.list_sessions(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].uuid, session_b.uuid);
    assert_eq!(page[1].uuid, session_c.uuid);
}

#[test]
fn list_pagination_with_offset_only_path_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::new(&conn);

    let session_a = session_with_fixed_id("00000000-0000-4000-8000-000000000001");
    let session_b = session_with_fixed_id("00000000-0000-4000-8000-000000000002");
    let session_c = session_with_fixed_id("00000000-0000-4000-8000-000000000003");
    repo.create_session(&session_a).unwrap();
    repo.create_session(&session_b).unwrap();
    repo.create_session(&session_c).unwrap();

    conn.execute("UPDATE sessions SET updated_at = 1234567890000;", [])
        .unwrap();

    let query = SessionListQuery {
        include_deleted: true,
        offset: 1,
        ..SessionListQuery::default()
    };
    let page = repo.list_sessions(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].uuid, session_b.uuid);
    assert_eq!(page[1].uuid, session_c.uuid);
}

fn session_with_fixed_id(id: &str) -> MeetingSession {
    MeetingSession::with_id(Uuid::parse_str(id).unwrap())
}
