use chrono::{Duration, TimeZone, Utc};

use super::SeaOrmStorage;
use crate::models::{
    assignments::requests::CreateAssignmentRequest,
    attendance::entities::AttendanceMethod,
    badges::requests::CreateClassBadgeRequest,
    classes::{entities::ClassStatus, requests::CreateClassRequest},
    enrollments::entities::{EnrollmentRole, EnrollmentStatus},
    modules::requests::CreateModuleRequest,
    submissions::{entities::SubmissionStatus, requests::ReviewSubmissionRequest},
};
use crate::storage::{Storage, SubmissionWrite};

async fn storage_with_class() -> (SeaOrmStorage, i64) {
    let storage = SeaOrmStorage::connect_in_memory()
        .await
        .expect("in-memory storage");
    let starts_at = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
    let class = storage
        .create_class(CreateClassRequest {
            name: "Rust 训练营".to_string(),
            starts_at,
            ends_at: starts_at + Duration::weeks(6),
            capacity: Some(2),
            status: Some(ClassStatus::Ongoing),
        })
        .await
        .expect("create class");
    (storage, class.id)
}

#[tokio::test]
async fn test_create_and_get_class() {
    let (storage, class_id) = storage_with_class().await;
    let class = storage.get_class_by_id(class_id).await.unwrap().unwrap();
    assert_eq!(class.status, ClassStatus::Ongoing);
    assert_eq!(class.capacity, 2);
    assert!(storage.get_class_by_id(class_id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_week_is_conflict() {
    let (storage, class_id) = storage_with_class().await;
    let req = CreateModuleRequest {
        week: 1,
        title: "所有权".to_string(),
        release_at: None,
        locked: false,
    };
    storage.create_module(class_id, req.clone()).await.unwrap();
    let err = storage.create_module(class_id, req).await.unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_modules_are_listed_by_week() {
    let (storage, class_id) = storage_with_class().await;
    for week in [3, 1, 2] {
        storage
            .create_module(
                class_id,
                CreateModuleRequest {
                    week,
                    title: format!("第 {week} 周"),
                    release_at: None,
                    locked: false,
                },
            )
            .await
            .unwrap();
    }
    let weeks: Vec<i32> = storage
        .list_modules_by_class(class_id)
        .await
        .unwrap()
        .iter()
        .map(|m| m.week)
        .collect();
    assert_eq!(weeks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_enroll_is_insert_if_absent() {
    let (storage, class_id) = storage_with_class().await;

    let (first, inserted) = storage
        .enroll(class_id, 7, EnrollmentRole::Student)
        .await
        .unwrap();
    assert!(inserted);
    assert_eq!(first.status, EnrollmentStatus::Active);

    let (second, inserted) = storage
        .enroll(class_id, 7, EnrollmentRole::Instructor)
        .await
        .unwrap();
    assert!(!inserted);
    assert_eq!(second.id, first.id);
    assert_eq!(second.role, EnrollmentRole::Student);

    storage
        .enroll(class_id, 8, EnrollmentRole::Instructor)
        .await
        .unwrap();
    assert_eq!(storage.count_occupied_enrollments(class_id).await.unwrap(), 1);
    assert_eq!(storage.list_enrollments_by_class(class_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_complete_enrollment_only_once() {
    let (storage, class_id) = storage_with_class().await;
    storage
        .enroll(class_id, 7, EnrollmentRole::Student)
        .await
        .unwrap();

    let now = Utc::now();
    assert!(storage.complete_enrollment_if_active(class_id, 7, now).await.unwrap());
    assert!(!storage.complete_enrollment_if_active(class_id, 7, now).await.unwrap());
    // 未报名的学员不会被修改
    assert!(!storage.complete_enrollment_if_active(class_id, 99, now).await.unwrap());

    let enrollment = storage.get_enrollment(class_id, 7).await.unwrap().unwrap();
    assert_eq!(enrollment.status, EnrollmentStatus::Completed);
    assert_eq!(
        enrollment.completed_at.map(|at| at.timestamp()),
        Some(now.timestamp())
    );
}

#[tokio::test]
async fn test_attendance_upsert_keeps_one_row_per_week() {
    let (storage, class_id) = storage_with_class().await;
    let at = Utc.with_ymd_and_hms(2025, 3, 3, 10, 0, 0).unwrap();

    let first = storage
        .upsert_attendance(class_id, 7, 1, AttendanceMethod::Manual, at)
        .await
        .unwrap();
    let second = storage
        .upsert_attendance(class_id, 7, 1, AttendanceMethod::Qr, at + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.method, AttendanceMethod::Qr);
    assert_eq!(second.marked_at, at + Duration::hours(1));
    assert_eq!(
        storage
            .list_attendance_for_learner(class_id, 7)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(storage.get_attendance_mark(class_id, 7, 2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_resubmission_clears_review() {
    let (storage, class_id) = storage_with_class().await;
    let module = storage
        .create_module(
            class_id,
            CreateModuleRequest {
                week: 1,
                title: "借用".to_string(),
                release_at: None,
                locked: false,
            },
        )
        .await
        .unwrap();
    let due_at = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
    let assignment = storage
        .create_assignment(
            class_id,
            CreateAssignmentRequest {
                module_id: module.id,
                title: "实现链表".to_string(),
                due_at,
                reward_amount: Some(50),
                lock_after_deadline: false,
            },
        )
        .await
        .unwrap();

    let write = SubmissionWrite {
        assignment_id: assignment.id,
        user_id: 7,
        content: Some("v1".to_string()),
        status: SubmissionStatus::Submitted,
        is_late: false,
        submitted_at: due_at - Duration::days(1),
    };
    let first = storage.upsert_submission(write.clone()).await.unwrap();

    let reviewed = storage
        .review_submission(
            assignment.id,
            7,
            ReviewSubmissionRequest {
                status: SubmissionStatus::ChangesRequested,
                grade: Some(40.0),
                feedback: Some("缺少测试".to_string()),
            },
            due_at,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reviewed.status, SubmissionStatus::ChangesRequested);
    assert_eq!(reviewed.grade, Some(40.0));
    assert!(reviewed.reviewed_at.is_some());

    let second = storage
        .upsert_submission(SubmissionWrite {
            content: Some("v2".to_string()),
            status: SubmissionStatus::Late,
            is_late: true,
            submitted_at: due_at + Duration::days(1),
            ..write
        })
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.status, SubmissionStatus::Late);
    assert!(second.is_late);
    assert!(second.grade.is_none());
    assert!(second.feedback.is_none());
    assert!(second.reviewed_at.is_none());

    let listed = storage
        .list_submissions_for_learner(7, &[assignment.id])
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert!(storage.list_submissions_for_learner(7, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_review_missing_submission_returns_none() {
    let (storage, _) = storage_with_class().await;
    let result = storage
        .review_submission(
            1,
            7,
            ReviewSubmissionRequest {
                status: SubmissionStatus::Approved,
                grade: None,
                feedback: None,
            },
            Utc::now(),
        )
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_badge_grant_is_idempotent() {
    let (storage, class_id) = storage_with_class().await;
    storage
        .create_class_badge(
            class_id,
            CreateClassBadgeRequest {
                badge_name: "rustacean".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert!(
        storage
            .create_class_badge(
                class_id,
                CreateClassBadgeRequest {
                    badge_name: "rustacean".to_string(),
                    description: None,
                },
            )
            .await
            .is_err()
    );

    let now = Utc::now();
    assert!(storage.grant_badge_if_absent(7, class_id, "rustacean", now).await.unwrap());
    assert!(!storage.grant_badge_if_absent(7, class_id, "rustacean", now).await.unwrap());
    assert_eq!(storage.list_badge_grants(7, class_id).await.unwrap().len(), 1);
    assert_eq!(storage.list_class_badges(class_id).await.unwrap().len(), 1);
}

#[test]
fn test_build_database_url() {
    assert_eq!(
        SeaOrmStorage::build_database_url("cohort.db").unwrap(),
        "sqlite://cohort.db?mode=rwc"
    );
    assert_eq!(
        SeaOrmStorage::build_database_url(":memory:").unwrap(),
        "sqlite::memory:"
    );
    assert!(SeaOrmStorage::build_database_url("postgres://localhost/cohort").is_ok());
    assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
}
