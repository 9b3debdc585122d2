use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

use dailyflo::{
    list::{TaskListId, TaskListPatch},
    task::{RoutineType, TaskColor},
};
use dailyflo_client::{store::ListStoreService, DailyfloClientError};

use crate::helpers::{build_task, tested_app, TestedApp};

#[rstest]
#[tokio::test]
async fn test_fetch_all_lists(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = ListStoreService::new(app.api_base_url.clone(), None).unwrap();
    Mock::given(method("GET"))
        .and(path("/lists/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": Uuid::new_v4(),
                "name": "Groceries",
                "description": "",
                "color": "teal",
                "icon": null,
                "is_default": false,
                "sort_order": 0,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let lists = service.fetch_all_lists().await.unwrap();

    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Groceries");
    assert_eq!(lists[0].color, TaskColor::Teal);
}

#[rstest]
#[tokio::test]
async fn test_fetch_inbox_list(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = ListStoreService::new(app.api_base_url.clone(), None).unwrap();
    Mock::given(method("GET"))
        .and(path("/lists/inbox/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": Uuid::new_v4(),
            "name": "Inbox",
            "description": "",
            "color": "blue",
            "icon": null,
            "is_default": true,
            "sort_order": 0,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let inbox = service.fetch_inbox_list().await.unwrap();

    assert_eq!(inbox.name, "Inbox");
    assert!(inbox.is_default);
}

#[rstest]
#[tokio::test]
async fn test_fetch_list_tasks(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = ListStoreService::new(app.api_base_url.clone(), None).unwrap();
    let list_id = TaskListId(Uuid::new_v4());
    let mut task = build_task(RoutineType::Once, None);
    task.list = Some(list_id);
    Mock::given(method("GET"))
        .and(path(format!("/lists/{list_id}/tasks/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![task.clone()]))
        .expect(1)
        .mount(&app.server)
        .await;

    let tasks = service.fetch_list_tasks(list_id).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id);
    assert_eq!(tasks[0].list, Some(list_id));
}

#[rstest]
#[tokio::test]
async fn test_update_list_skips_unset_fields(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = ListStoreService::new(app.api_base_url.clone(), None).unwrap();
    let list_id = TaskListId(Uuid::new_v4());
    Mock::given(method("PATCH"))
        .and(path(format!("/lists/{list_id}/")))
        .and(body_json(json!({ "color": "purple" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": list_id,
            "name": "Groceries",
            "description": "",
            "color": "purple",
            "icon": null,
            "is_default": false,
            "sort_order": 0,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let patch = TaskListPatch {
        color: Some(TaskColor::Purple),
        ..Default::default()
    };
    let list = service.update_list(list_id, &patch).await.unwrap();

    assert_eq!(list.color, TaskColor::Purple);
}

#[rstest]
#[tokio::test]
async fn test_delete_list(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = ListStoreService::new(app.api_base_url.clone(), None).unwrap();
    let list_id = TaskListId(Uuid::new_v4());
    Mock::given(method("DELETE"))
        .and(path(format!("/lists/{list_id}/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    service.delete_list(list_id).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn test_delete_list_with_expired_session(#[future] tested_app: TestedApp) {
    let app = tested_app.await;
    let service = ListStoreService::new(app.api_base_url.clone(), None).unwrap();
    let list_id = TaskListId(Uuid::new_v4());
    Mock::given(method("DELETE"))
        .and(path(format!("/lists/{list_id}/")))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.server)
        .await;

    let result = service.delete_list(list_id).await;

    assert!(matches!(result, Err(DailyfloClientError::Unauthorized(_))));
}
