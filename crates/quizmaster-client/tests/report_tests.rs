/*
[INPUT]:  Mock report, user and dashboard responses
[OUTPUT]: Test results for admin reporting and student stats endpoints
[POS]:    Integration tests - reports, user list, dashboard figures
[UPDATE]: When report filters or dashboard payloads change
*/

mod common;

use common::{client_for, setup_mock_server};
use quizmaster_client::{QuizError, ReportFilter, ReportPeriod};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_report_summary_sends_filter_as_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/summary"))
        .and(query_param("time_period", "7days"))
        .and(query_param("chapter_id", "5"))
        .and(query_param_is_missing("subject_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalAttempts": 9,
            "averageScore": 64.2,
            "activeUsers": 3,
            "totalQuizzes": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = ReportFilter::new(ReportPeriod::Last7Days).with_chapter(Some(5));
    let summary = assert_ok!(client_for(&server).report_summary(&filter).await);

    assert_eq!(summary.total_attempts, 9);
    assert_eq!(summary.average_score, 64.2);
    assert_eq!(summary.active_users, 3);
    assert_eq!(summary.total_quizzes, 2);
}

#[tokio::test]
async fn test_quiz_activity_and_time_series() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/quiz-activity"))
        .and(query_param("time_period", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "quiz_id": 8,
                "quiz_title": "Capitals",
                "chapter_name": "Europe",
                "subject_name": "Geography",
                "attempts": 4,
                "avg_score": 55.0,
                "pass_rate": 75.0
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reports/time-series"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "date": "2026-10-17", "avg_score": 0, "attempts": 0 },
            { "date": "2026-10-18", "avg_score": 62.5, "attempts": 2 }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = ReportFilter::default();

    let activity = assert_ok!(client.quiz_activity(&filter).await);
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].pass_rate, 75.0);

    let series = assert_ok!(client.time_series(&filter).await);
    assert_eq!(series.len(), 2);
    assert_eq!(series[1].attempts, 2);
    assert!(series[0].date < series[1].date);
}

#[tokio::test]
async fn test_users_listing() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "username": "admin", "email": "admin@example.edu", "active": true, "roles": ["admin"] },
            { "id": 5, "username": "ana", "email": "ana@example.edu", "active": false, "roles": ["student"] }
        ])))
        .mount(&server)
        .await;

    let users = assert_ok!(client_for(&server).users().await);

    assert!(users[0].has_role("admin"));
    assert!(!users[1].active);
    assert!(!users[1].has_role("admin"));
}

#[tokio::test]
async fn test_student_stats() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/student/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalAttempts": 3,
            "averageScore": 70.0,
            "recentPerformance": [
                { "quiz_title": "Capitals", "score": 80.0, "date": "2026-10-18 09:30" }
            ],
            "subjectPerformance": [
                { "subject": "Geography", "avgScore": 70.0, "attempts": 3 }
            ]
        })))
        .mount(&server)
        .await;

    let stats = assert_ok!(client_for(&server).student_stats().await);

    assert_eq!(stats.total_attempts, 3);
    assert_eq!(stats.recent_performance[0].date, "2026-10-18 09:30");
    assert_eq!(stats.subject_performance[0].avg_score, 70.0);
}

#[tokio::test]
async fn test_student_stats_server_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/student/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "database is locked"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .student_stats()
        .await
        .expect_err("should fail");

    assert!(matches!(err, QuizError::Api { code: 500, .. }));
    assert_eq!(err.server_message(), Some("database is locked"));
}
