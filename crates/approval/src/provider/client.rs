use crate::{
    abstract_trait::AuthProviderTrait,
    domain::{
        requests::NewAuthUser,
        response::{CreatedAuthUser, SignupRecord},
    },
    errors::ApprovalError,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProviderClientConfig {
    pub base_url: String,
    pub service_key: String,
    pub signup_table: String,
}

impl std::fmt::Debug for ProviderClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClientConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"<redacted>")
            .field("signup_table", &self.signup_table)
            .finish()
    }
}

#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    config: ProviderClientConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderClientConfig) -> Result<Self, ApprovalError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            config: ProviderClientConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, self.config.signup_table)
    }

    /// Every call runs with the service-role key.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }
}

/// Pulls a human readable message out of a failed provider response.
async fn provider_error(response: Response) -> ApprovalError {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);

    let message = ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Auth provider returned {status}"));

    error!("Auth provider refused request ({status}): {message}");

    ApprovalError::Provider(message)
}

#[async_trait]
impl AuthProviderTrait for ProviderClient {
    async fn find_signup_request(
        &self,
        request_id: &str,
    ) -> Result<Option<SignupRecord>, ApprovalError> {
        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("id", format!("eq.{request_id}")), ("select", "*".into())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let mut rows = response.json::<Vec<SignupRecord>>().await?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn create_user(&self, user: &NewAuthUser) -> Result<CreatedAuthUser, ApprovalError> {
        let url = format!("{}/auth/v1/admin/users", self.config.base_url);

        let response = self
            .authorized(self.client.post(url))
            .json(user)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let created = response.json::<CreatedAuthUser>().await?;

        info!("Auth user {} created for {}", created.id, created.email);

        Ok(created)
    }

    async fn mark_signup_approved(&self, request_id: &str) -> Result<(), ApprovalError> {
        let response = self
            .authorized(self.client.patch(self.table_url()))
            .query(&[("id", format!("eq.{request_id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "status": "approved" }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        Ok(())
    }
}
