//! Journey: add a problem, review it over weeks, and watch the schedule
//!
//! Walks one problem through the SM-2 sequence (1 day, 6 days, then
//! compounding) against a real SQLite database, including a lapse.

use chrono::Duration;
use leetrepeat_core::{Grade, NewProblem, MIN_EASINESS};
use leetrepeat_e2e_tests::harness::TestDatabaseManager;
use leetrepeat_e2e_tests::mocks::fixed_now;

fn grade(value: i64) -> Grade {
    Grade::new(value).unwrap()
}

#[test]
fn test_pass_streak_then_lapse() {
    let db = TestDatabaseManager::new_temp();
    let start = fixed_now();

    let problem = db
        .tracker
        .add_problem(
            NewProblem::from_url("https://leetcode.com/problems/two-sum/"),
            &start,
        )
        .unwrap();
    assert_eq!(problem.title, "Two Sum");
    assert!(problem.state.is_new());
    assert_eq!(db.tracker.queue(&start).unwrap().due.len(), 1);

    // First pass: 1 day
    let p = db.tracker.grade(&problem.id, grade(4), &start).unwrap();
    assert_eq!(p.state.repetition_count, 1);
    assert_eq!(p.state.interval_days, 1);
    assert_eq!(p.state.next_review_at, start + Duration::days(1));
    assert!(db.tracker.queue(&start).unwrap().due.is_empty());

    // Second pass: 6 days
    let day1 = p.state.next_review_at;
    let p = db.tracker.grade(&problem.id, grade(5), &day1).unwrap();
    assert_eq!(p.state.repetition_count, 2);
    assert_eq!(p.state.interval_days, 6);
    assert!((p.state.easiness_factor - 2.6).abs() < 1e-9);

    // Third pass compounds on the prior easiness: round(6 * 2.6) = 16
    let day7 = p.state.next_review_at;
    let p = db.tracker.grade(&problem.id, grade(5), &day7).unwrap();
    assert_eq!(p.state.repetition_count, 3);
    assert_eq!(p.state.interval_days, 16);
    assert_eq!(p.state.next_review_at, day7 + Duration::days(16));

    // Lapse resets the streak but keeps learning from the grade
    let day23 = p.state.next_review_at;
    let p = db.tracker.grade(&problem.id, grade(1), &day23).unwrap();
    assert_eq!(p.state.repetition_count, 0);
    assert_eq!(p.state.interval_days, 1);
    assert!(p.state.easiness_factor < 2.7);
    assert_eq!(p.state.last_reviewed_at, Some(day23));

    let stats = db.tracker.stats(&day23).unwrap();
    assert_eq!(stats.total_problems, 1);
    assert_eq!(stats.total_reviews, 0);
    assert_eq!(stats.upcoming, 1);
}

#[test]
fn test_easiness_never_drops_below_floor() {
    let db = TestDatabaseManager::new_temp();
    let mut now = fixed_now();
    let problem = db
        .tracker
        .add_problem(NewProblem::from_url("https://leetcode.com/problems/lru-cache/"), &now)
        .unwrap();

    for _ in 0..10 {
        let p = db.tracker.grade(&problem.id, grade(0), &now).unwrap();
        assert!(p.state.easiness_factor >= MIN_EASINESS);
        assert_eq!(p.state.interval_days, 1);
        now = p.state.next_review_at;
    }

    let p = db.tracker.get(&problem.id).unwrap();
    assert!((p.state.easiness_factor - MIN_EASINESS).abs() < 1e-9);
}

#[test]
fn test_invalid_grades_are_rejected_before_touching_storage() {
    let db = TestDatabaseManager::new_temp();
    let problem = db
        .tracker
        .add_problem(NewProblem::from_url("https://leetcode.com/problems/two-sum/"), &fixed_now())
        .unwrap();

    assert!(Grade::new(-1).is_err());
    assert!(Grade::new(6).is_err());
    assert!("seven".parse::<Grade>().is_err());

    assert_eq!(db.tracker.get(&problem.id).unwrap(), problem);
}

#[test]
fn test_grading_survives_reopen() {
    let mut db = TestDatabaseManager::new_temp();
    let now = fixed_now();
    let ids = db.seed_with_review_states(now);
    let before = db.tracker.export().unwrap();

    db.reopen();

    assert_eq!(db.tracker.export().unwrap(), before);
    let learned = db.tracker.get(&ids[1]).unwrap();
    assert_eq!(learned.state.repetition_count, 3);
    let struggling = db.tracker.get(&ids[2]).unwrap();
    assert_eq!(struggling.state.repetition_count, 0);
    assert!(struggling.state.easiness_factor < learned.state.easiness_factor);
}

#[test]
fn test_preview_matches_actual_grade() {
    let db = TestDatabaseManager::new_temp();
    let now = fixed_now();
    let problem = db
        .tracker
        .add_problem(NewProblem::from_url("https://leetcode.com/problems/merge-intervals/"), &now)
        .unwrap();

    let preview = db.tracker.preview(&problem.id, &now).unwrap();
    let expected = preview.get(grade(3)).cloned().unwrap();

    let graded = db.tracker.grade(&problem.id, grade(3), &now).unwrap();
    assert_eq!(graded.state, expected);
}
