use anyhow::Context;
use reqwest::StatusCode;
use url::Url;

use dailyflo::user::{Credentials, RegisterUserParameters, Session};

use crate::DailyfloClientError;

use super::{build_api_client, parse_response};

/// HTTP client for the `/accounts/` resources of the Dailyflo API.
#[derive(Clone, Debug)]
pub struct UserStoreService {
    client: reqwest::Client,
    api_base_url: Url,
}

impl UserStoreService {
    pub fn new(api_base_url: Url) -> Result<UserStoreService, DailyfloClientError> {
        Ok(UserStoreService {
            client: build_api_client(None).context("Cannot build Dailyflo API client")?,
            api_base_url,
        })
    }

    #[tracing::instrument(level = "debug", skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, DailyfloClientError> {
        let url = self
            .api_base_url
            .join("accounts/login/")
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .post(url)
            .json(credentials)
            .send()
            .await
            .context("Cannot log in with the Dailyflo API")?;

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::BAD_REQUEST
        {
            return Err(DailyfloClientError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        parse_response(response, "log in").await
    }

    #[tracing::instrument(level = "debug", skip(self, parameters))]
    pub async fn register(
        &self,
        parameters: &RegisterUserParameters,
    ) -> Result<Session, DailyfloClientError> {
        let url = self
            .api_base_url
            .join("accounts/register/")
            .context("Cannot build Dailyflo API URL")?;
        let response = self
            .client
            .post(url)
            .json(parameters)
            .send()
            .await
            .context("Cannot register with the Dailyflo API")?;

        parse_response(response, "register").await
    }
}
