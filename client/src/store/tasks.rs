use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::Secret;
use url::Url;

use dailyflo::{
    task::{Task, TaskCompletion, TaskCreation, TaskId, TaskPatch},
    user::SessionToken,
};

use crate::DailyfloClientError;

use super::{build_api_client, parse_response, TaskStore};

/// HTTP client for the `/tasks/` resources of the Dailyflo API.
#[derive(Clone, Debug)]
pub struct TaskStoreService {
    client: reqwest::Client,
    api_base_url: Url,
}

impl TaskStoreService {
    pub fn new(
        api_base_url: Url,
        session_token: Option<&Secret<SessionToken>>,
    ) -> Result<TaskStoreService, DailyfloClientError> {
        Ok(TaskStoreService {
            client: build_api_client(session_token).context("Cannot build Dailyflo API client")?,
            api_base_url,
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_tasks(&self, filter: &str) -> Result<Vec<Task>, DailyfloClientError> {
        let url = self
            .api_base_url
            .join(&format!("tasks/{filter}"))
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Cannot fetch tasks from the Dailyflo API")?;

        parse_response(response, "fetch tasks").await
    }

    /// Tasks due today (or with no due date), not yet completed.
    pub async fn fetch_today_tasks(&self) -> Result<Vec<Task>, DailyfloClientError> {
        self.fetch_tasks("today/").await
    }

    pub async fn fetch_overdue_tasks(&self) -> Result<Vec<Task>, DailyfloClientError> {
        self.fetch_tasks("overdue/").await
    }

    pub async fn fetch_completed_tasks(&self) -> Result<Vec<Task>, DailyfloClientError> {
        self.fetch_tasks("completed/").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn complete_task(
        &self,
        task_id: TaskId,
        is_completed: bool,
    ) -> Result<Task, DailyfloClientError> {
        let url = self
            .api_base_url
            .join(&format!("tasks/{task_id}/complete/"))
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .patch(url)
            .json(&TaskCompletion { is_completed })
            .send()
            .await
            .with_context(|| format!("Cannot complete task {task_id} with the Dailyflo API"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DailyfloClientError::TaskNotFound(task_id));
        }

        parse_response(response, "complete task").await
    }
}

#[async_trait]
impl TaskStore for TaskStoreService {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch_all_tasks(&self) -> Result<Vec<Task>, DailyfloClientError> {
        self.fetch_tasks("").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_task(&self, creation: &TaskCreation) -> Result<Task, DailyfloClientError> {
        let url = self
            .api_base_url
            .join("tasks/")
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .post(url)
            .json(creation)
            .send()
            .await
            .context("Cannot create task with the Dailyflo API")?;

        parse_response(response, "create task").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_task(
        &self,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> Result<Task, DailyfloClientError> {
        let url = self
            .api_base_url
            .join(&format!("tasks/{task_id}/"))
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .patch(url)
            .json(patch)
            .send()
            .await
            .with_context(|| format!("Cannot update task {task_id} with the Dailyflo API"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DailyfloClientError::TaskNotFound(task_id));
        }

        parse_response(response, "update task").await
    }
}
