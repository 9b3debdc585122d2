use anyhow::Context;
use reqwest::StatusCode;
use secrecy::Secret;
use url::Url;

use dailyflo::{
    list::{TaskList, TaskListCreation, TaskListId, TaskListPatch},
    task::Task,
    user::SessionToken,
};

use crate::DailyfloClientError;

use super::{build_api_client, parse_response};

/// HTTP client for the `/lists/` resources of the Dailyflo API.
#[derive(Clone, Debug)]
pub struct ListStoreService {
    client: reqwest::Client,
    api_base_url: Url,
}

impl ListStoreService {
    pub fn new(
        api_base_url: Url,
        session_token: Option<&Secret<SessionToken>>,
    ) -> Result<ListStoreService, DailyfloClientError> {
        Ok(ListStoreService {
            client: build_api_client(session_token).context("Cannot build Dailyflo API client")?,
            api_base_url,
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_all_lists(&self) -> Result<Vec<TaskList>, DailyfloClientError> {
        let url = self
            .api_base_url
            .join("lists/")
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Cannot fetch lists from the Dailyflo API")?;

        parse_response(response, "fetch lists").await
    }

    /// The default inbox list.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_inbox_list(&self) -> Result<TaskList, DailyfloClientError> {
        let url = self
            .api_base_url
            .join("lists/inbox/")
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Cannot fetch the inbox list from the Dailyflo API")?;

        parse_response(response, "fetch the inbox list").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_list_tasks(
        &self,
        list_id: TaskListId,
    ) -> Result<Vec<Task>, DailyfloClientError> {
        let url = self
            .api_base_url
            .join(&format!("lists/{list_id}/tasks/"))
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Cannot fetch tasks of list {list_id} from the Dailyflo API"))?;

        parse_response(response, "fetch list tasks").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn create_list(
        &self,
        creation: &TaskListCreation,
    ) -> Result<TaskList, DailyfloClientError> {
        let url = self
            .api_base_url
            .join("lists/")
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .post(url)
            .json(creation)
            .send()
            .await
            .context("Cannot create list with the Dailyflo API")?;

        parse_response(response, "create list").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn update_list(
        &self,
        list_id: TaskListId,
        patch: &TaskListPatch,
    ) -> Result<TaskList, DailyfloClientError> {
        let url = self
            .api_base_url
            .join(&format!("lists/{list_id}/"))
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .patch(url)
            .json(patch)
            .send()
            .await
            .with_context(|| format!("Cannot update list {list_id} with the Dailyflo API"))?;

        parse_response(response, "update list").await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete_list(&self, list_id: TaskListId) -> Result<(), DailyfloClientError> {
        let url = self
            .api_base_url
            .join(&format!("lists/{list_id}/"))
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .with_context(|| format!("Cannot delete list {list_id} with the Dailyflo API"))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(DailyfloClientError::Unauthorized(format!(
                "Unauthorized call to the Dailyflo API while trying to delete list {list_id}"
            )));
        }

        response
            .error_for_status()
            .with_context(|| format!("Cannot delete list {list_id} with the Dailyflo API"))?;

        Ok(())
    }
}
