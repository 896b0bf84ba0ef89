use crate::{
    abstract_trait::{ApprovalServiceTrait, DynAuthProvider},
    domain::{
        requests::{
            ApproveUserRequest, ApproveWithCredentialsRequest, NewAuthUser, validate_request,
        },
        response::{ApprovalResponse, ApprovedUser, CreatedAuthUser, SignupRecord},
    },
    errors::ApprovalError,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use serde_json::{Map, Value};
use shared::utils::{Method, Metrics, TracingContext, generate_random_string};
use tracing::info;

pub const TEMPORARY_PASSWORD_LENGTH: usize = 16;

/// Columns of a signup row that never become user metadata.
const RESERVED_COLUMNS: [&str; 4] = ["password", "status", "created_at", "updated_at"];

#[derive(Clone)]
pub struct ApprovalService {
    provider: DynAuthProvider,
    metrics: Metrics,
}

impl ApprovalService {
    pub fn new(provider: DynAuthProvider, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "approval_service");

        Self { provider, metrics }
    }
}

fn signup_metadata(request_id: &str, record: SignupRecord) -> Map<String, Value> {
    let mut metadata = record.profile;
    metadata.retain(|key, _| !RESERVED_COLUMNS.contains(&key.as_str()));
    metadata.insert("signup_request_id".into(), Value::String(request_id.into()));
    metadata
}

fn approved(created: CreatedAuthUser, temporary_password: Option<String>) -> ApprovalResponse {
    ApprovalResponse {
        success: true,
        message: "User approved and account created".into(),
        user: ApprovedUser {
            id: created.id,
            email: created.email,
        },
        temporary_password,
    }
}

#[async_trait]
impl ApprovalServiceTrait for ApprovalService {
    async fn approve_user(
        &self,
        req: &ApproveUserRequest,
    ) -> Result<ApprovalResponse, ApprovalError> {
        info!("✅ Approving signup request {}", req.user_id);

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("approval", "ApproveUser");

        let result = async {
            validate_request(req)?;

            let record = self
                .provider
                .find_signup_request(&req.user_id)
                .await?
                .ok_or_else(|| ApprovalError::NotFound("Signup request not found".into()))?;

            let password = generate_random_string(TEMPORARY_PASSWORD_LENGTH)
                .map_err(|e| ApprovalError::Internal(e.to_string()))?;

            let new_user = NewAuthUser {
                email: record.email.clone(),
                password: password.clone(),
                email_confirm: true,
                user_metadata: signup_metadata(&req.user_id, record),
            };

            let created = self.provider.create_user(&new_user).await?;
            self.provider.mark_signup_approved(&req.user_id).await?;

            Ok::<_, ApprovalError>(approved(created, Some(password)))
        }
        .await;

        match &result {
            Ok(_) => tracing_ctx.complete_success(&self.metrics, method, "Signup request approved"),
            Err(e) => tracing_ctx.complete_error(&self.metrics, method, &e.to_string()),
        }

        result
    }

    async fn approve_with_credentials(
        &self,
        req: &ApproveWithCredentialsRequest,
    ) -> Result<ApprovalResponse, ApprovalError> {
        info!(
            "✅ Approving signup request {} with supplied credentials",
            req.user_id
        );

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("approval", "ApproveUserWithCredentials");

        let result = async {
            validate_request(req)?;

            let mut user_metadata = Map::new();
            user_metadata.insert(
                "signup_request_id".into(),
                Value::String(req.user_id.clone()),
            );

            let new_user = NewAuthUser {
                email: req.user_email.clone(),
                password: req.user_password.clone(),
                email_confirm: true,
                user_metadata,
            };

            let created = self.provider.create_user(&new_user).await?;

            Ok::<_, ApprovalError>(approved(created, None))
        }
        .await;

        match &result {
            Ok(_) => tracing_ctx.complete_success(&self.metrics, method, "Credentials approved"),
            Err(e) => tracing_ctx.complete_error(&self.metrics, method, &e.to_string()),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_drops_secrets_and_links_the_request() {
        let record: SignupRecord = serde_json::from_value(json!({
            "id": 7,
            "email": "ada@uni.edu",
            "name": "Ada",
            "department": "CS",
            "password": "plain",
            "status": "pending"
        }))
        .unwrap();

        let metadata = signup_metadata("7", record);

        assert_eq!(metadata["name"], "Ada");
        assert_eq!(metadata["department"], "CS");
        assert_eq!(metadata["signup_request_id"], "7");
        assert!(!metadata.contains_key("password"));
        assert!(!metadata.contains_key("status"));
        assert!(!metadata.contains_key("email"));
    }
}
