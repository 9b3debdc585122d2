use anyhow::Context;
use async_trait::async_trait;
use format_serde_error::SerdeError;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Response, StatusCode,
};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;

use dailyflo::{
    task::{Task, TaskCreation, TaskId, TaskPatch},
    user::SessionToken,
};

use crate::DailyfloClientError;

pub mod cache;
pub mod lists;
pub mod tasks;
pub mod users;

pub use cache::TaskCache;
pub use lists::ListStoreService;
pub use tasks::TaskStoreService;
pub use users::UserStoreService;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// The remote task record store operations the form engine depends on.
#[async_trait]
pub trait TaskStore {
    async fn fetch_all_tasks(&self) -> Result<Vec<Task>, DailyfloClientError>;
    async fn create_task(&self, creation: &TaskCreation) -> Result<Task, DailyfloClientError>;
    async fn update_task(
        &self,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> Result<Task, DailyfloClientError>;
}

pub(crate) fn build_api_client(
    session_token: Option<&Secret<SessionToken>>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert("Accept", HeaderValue::from_static("application/json"));

    if let Some(token) = session_token {
        let mut auth_header_value: HeaderValue = format!("Bearer {}", token.expose_secret().0)
            .parse()
            .unwrap();
        auth_header_value.set_sensitive(true);
        headers.insert("Authorization", auth_header_value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(APP_USER_AGENT)
        .build()
}

/// Checks the response status and parses the JSON body, keeping the raw text
/// around for readable parse errors.
pub(crate) async fn parse_response<R: DeserializeOwned>(
    response: Response,
    operation: &str,
) -> Result<R, DailyfloClientError> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(DailyfloClientError::Unauthorized(format!(
            "Unauthorized call to the Dailyflo API while trying to {operation}"
        )));
    }

    let response = response
        .error_for_status()
        .with_context(|| format!("Cannot {operation} with the Dailyflo API"))?;

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to fetch response from the Dailyflo API to {operation}"))?;

    Ok(serde_json::from_str(&body)
        .map_err(|err| SerdeError::new(body, err))
        .context("Failed to parse response from the Dailyflo API")?)
}
