use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    matchers::{body_json, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use dailyflo::task::{
    RoutineType, TaskColor, TaskCreation, TaskId, TaskMetadata, TaskPatch, TaskPriority, TimeOfDay,
};
use dailyflo_client::{
    store::{TaskStore, TaskStoreService},
    DailyfloClientError,
};

use crate::helpers::{build_task, tested_app, TestedApp};

#[rstest]
#[tokio::test]
async fn test_fetch_all_tasks(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    let task_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": task_id,
                "title": "Water the plants",
                "description": "",
                "due_date": "2024-06-10T12:00:00Z",
                "time": "14:30",
                "duration": 15,
                "priority_level": 2,
                "color": "green",
                "icon": null,
                "routine_type": "weekly",
                "list": null,
                "is_completed": false,
                "completed_at": null,
                "sort_order": 0,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "metadata": {
                    "schemaVersion": 1,
                    "recurrenceExceptions": ["2024-06-03"]
                }
            }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let tasks = service.fetch_all_tasks().await.unwrap();

    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.id, TaskId(task_id));
    assert_eq!(task.time, TimeOfDay::new(14, 30));
    assert_eq!(task.duration, 15);
    assert_eq!(task.priority_level, TaskPriority::P2);
    assert_eq!(task.color, TaskColor::Green);
    assert_eq!(task.routine_type, RoutineType::Weekly);
    assert_eq!(
        task.metadata.recurrence_exceptions,
        vec![chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()]
    );
    assert!(task.metadata.reminders.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_fetch_today_tasks_uses_the_today_filter(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    Mock::given(method("GET"))
        .and(path("/tasks/today/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.server)
        .await;

    let tasks = service.fetch_today_tasks().await.unwrap();

    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_create_task(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    let created = build_task(
        RoutineType::Once,
        Some(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()),
    );
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .and(body_partial_json(json!({
            "title": "Water the plants",
            "routine_type": "once",
            "priority_level": 3,
            "metadata": { "schemaVersion": 1 }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .expect(1)
        .mount(&app.server)
        .await;

    let creation = TaskCreation {
        title: "Water the plants".to_string(),
        description: String::new(),
        due_date: Some(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()),
        time: None,
        duration: 0,
        priority_level: TaskPriority::P3,
        color: TaskColor::Green,
        icon: None,
        routine_type: RoutineType::Once,
        list: None,
        sort_order: 0,
        metadata: TaskMetadata::default(),
    };
    let task = service.create_task(&creation).await.unwrap();

    assert_eq!(task, created);
}

#[rstest]
#[tokio::test]
async fn test_update_task_sends_explicit_nulls_for_cleared_fields(
    #[future] tested_app: TestedApp,
) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    let task = build_task(RoutineType::Once, None);
    Mock::given(method("PATCH"))
        .and(path(format!("/tasks/{}/", task.id)))
        .and(body_json(json!({
            "due_date": null,
            "time": null,
            "duration": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&task))
        .expect(1)
        .mount(&app.server)
        .await;

    let patch = TaskPatch {
        due_date: Some(None),
        time: Some(None),
        duration: Some(0),
        ..Default::default()
    };
    let updated = service.update_task(task.id, &patch).await.unwrap();

    assert_eq!(updated, task);
}

#[rstest]
#[tokio::test]
async fn test_update_unknown_task(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    let task_id = TaskId(Uuid::new_v4());
    Mock::given(method("PATCH"))
        .and(path(format!("/tasks/{task_id}/")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&app.server)
        .await;

    let result = service
        .update_task(
            task_id,
            &TaskPatch {
                title: Some("new title".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(DailyfloClientError::TaskNotFound(id)) if id == task_id
    ));
}

#[rstest]
#[tokio::test]
async fn test_fetch_tasks_with_expired_session(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.server)
        .await;

    let result = service.fetch_all_tasks().await;

    assert!(matches!(result, Err(DailyfloClientError::Unauthorized(_))));
}

#[rstest]
#[tokio::test]
async fn test_complete_task(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = TaskStoreService::new(app.api_base_url.clone(), None).unwrap();
    let mut task = build_task(RoutineType::Once, None);
    task.is_completed = true;
    Mock::given(method("PATCH"))
        .and(path(format!("/tasks/{}/complete/", task.id)))
        .and(body_json(json!({ "is_completed": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&task))
        .expect(1)
        .mount(&app.server)
        .await;

    let completed = service.complete_task(task.id, true).await.unwrap();

    assert!(completed.is_completed);
}
