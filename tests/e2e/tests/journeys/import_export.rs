//! Journey: export a collection to JSON and import it elsewhere

use chrono::Duration;
use leetrepeat_core::{Grade, Problem, StorageError};
use leetrepeat_e2e_tests::harness::TestDatabaseManager;
use leetrepeat_e2e_tests::mocks::{fixed_now, ProblemFixture};

#[test]
fn test_export_import_round_trip() {
    let source = TestDatabaseManager::new_temp();
    let now = fixed_now();
    source.seed_with_review_states(now);
    let exported = source.tracker.export().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("export.json");
    std::fs::write(&file, serde_json::to_string_pretty(&exported).unwrap()).unwrap();

    let content = std::fs::read_to_string(&file).unwrap();
    let parsed: Vec<Problem> = serde_json::from_str(&content).unwrap();

    let target = TestDatabaseManager::new_temp();
    assert_eq!(target.tracker.import(parsed).unwrap(), 3);
    assert_eq!(target.tracker.export().unwrap(), exported);
    assert_eq!(
        target.tracker.stats(&now).unwrap(),
        source.tracker.stats(&now).unwrap()
    );
}

#[test]
fn test_export_uses_camel_case_fields() {
    let db = TestDatabaseManager::new_temp();
    db.seed_problems(1, fixed_now());

    let json = serde_json::to_value(db.tracker.export().unwrap()).unwrap();
    let record = &json[0];
    for key in [
        "id",
        "url",
        "title",
        "createdAt",
        "easinessFactor",
        "repetitionCount",
        "intervalDays",
        "nextReviewAt",
    ] {
        assert!(record.get(key).is_some(), "missing {key}");
    }
    assert!(record.get("lastReviewedAt").is_none());
}

#[test]
fn test_import_overwrites_existing_ids() {
    let db = TestDatabaseManager::new_temp();
    let now = fixed_now();
    let original = ProblemFixture::new("two-sum").build();
    db.tracker.import(vec![original.clone()]).unwrap();

    let mut updated = original.clone();
    updated.state = db
        .tracker
        .scheduler()
        .schedule(&original.state, Grade::new(5).unwrap(), &now)
        .unwrap();
    db.tracker.import(vec![updated.clone()]).unwrap();

    assert_eq!(db.problem_count(), 1);
    assert_eq!(db.tracker.get(&original.id).unwrap(), updated);
}

#[test]
fn test_import_rejects_broken_state() {
    let db = TestDatabaseManager::new_temp();
    let good = ProblemFixture::new("two-sum").build();
    let bad = ProblemFixture::new("lru-cache").easiness(0.9).build();

    let result = db.tracker.import(vec![good, bad]);
    assert!(matches!(result, Err(StorageError::Schedule(_))));
    assert!(db.is_empty());
}

#[test]
fn test_import_requires_memory_state_fields() {
    let json = r#"[{"id": "x", "url": "u", "title": "t"}]"#;
    assert!(serde_json::from_str::<Vec<Problem>>(json).is_err());
}

#[test]
fn test_import_ignores_extra_fields() {
    let json = r#"[{
        "id": "x",
        "url": "https://leetcode.com/problems/two-sum/",
        "title": "Two Sum",
        "createdAt": "2024-07-15T20:00:00Z",
        "easinessFactor": 2.5,
        "repetitionCount": 0,
        "intervalDays": 1,
        "nextReviewAt": "2024-07-15T20:00:00Z",
        "difficulty": "Easy"
    }]"#;
    let parsed: Vec<Problem> = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].created_at, fixed_now());
    assert!(parsed[0].state.last_reviewed_at.is_none());

    let db = TestDatabaseManager::new_temp();
    assert_eq!(db.tracker.import(parsed).unwrap(), 1);
    assert_eq!(db.tracker.queue(&fixed_now()).unwrap().due.len(), 1);
}

#[test]
fn test_imported_reviewed_problem_keeps_schedule() {
    let db = TestDatabaseManager::new_temp();
    let now = fixed_now();
    let problem = ProblemFixture::new("word-ladder")
        .easiness(2.2)
        .reviewed(3, 15)
        .due_in(Duration::days(15))
        .build();
    db.tracker.import(vec![problem.clone()]).unwrap();

    let queue = db.tracker.queue(&now).unwrap();
    assert!(queue.due.is_empty());
    assert_eq!(queue.upcoming, vec![problem]);
}
