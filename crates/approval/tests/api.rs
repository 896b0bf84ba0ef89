use approval::{
    abstract_trait::AuthProviderTrait,
    domain::{
        requests::NewAuthUser,
        response::{CreatedAuthUser, SignupRecord},
    },
    errors::ApprovalError,
    handler::AppRouter,
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct FakeProvider {
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<NewAuthUser>>,
    reject_with: Option<String>,
}

impl FakeProvider {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProviderTrait for FakeProvider {
    async fn find_signup_request(
        &self,
        request_id: &str,
    ) -> Result<Option<SignupRecord>, ApprovalError> {
        self.calls.lock().unwrap().push(format!("find:{request_id}"));

        if request_id != "req-1" {
            return Ok(None);
        }

        Ok(Some(
            serde_json::from_value(json!({
                "id": "req-1",
                "email": "ada@uni.edu",
                "name": "Ada Lovelace",
                "department": "Mathematics",
                "status": "pending"
            }))
            .unwrap(),
        ))
    }

    async fn create_user(&self, user: &NewAuthUser) -> Result<CreatedAuthUser, ApprovalError> {
        self.calls.lock().unwrap().push(format!("create:{}", user.email));

        if let Some(message) = &self.reject_with {
            return Err(ApprovalError::Provider(message.clone()));
        }

        self.created.lock().unwrap().push(user.clone());

        Ok(CreatedAuthUser {
            id: "auth-123".into(),
            email: user.email.clone(),
        })
    }

    async fn mark_signup_approved(&self, request_id: &str) -> Result<(), ApprovalError> {
        self.calls.lock().unwrap().push(format!("approve:{request_id}"));
        Ok(())
    }
}

fn app(provider: Arc<FakeProvider>) -> Router {
    AppRouter::build(AppState::with_provider(provider))
}

async fn post(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://buildersarc.dev")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn approving_a_signup_creates_the_user_then_marks_the_request() {
    let provider = Arc::new(FakeProvider::default());
    let app = app(provider.clone());

    let (status, body) = post(&app, "/approve-user", r#"{"userId":"req-1"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"], json!({ "id": "auth-123", "email": "ada@uni.edu" }));
    assert_eq!(body["temporaryPassword"].as_str().unwrap().len(), 16);

    assert_eq!(
        provider.calls(),
        vec!["find:req-1", "create:ada@uni.edu", "approve:req-1"]
    );

    let created = provider.created.lock().unwrap();
    assert!(created[0].email_confirm);
    assert_eq!(created[0].user_metadata["name"], "Ada Lovelace");
    assert_eq!(created[0].user_metadata["signup_request_id"], "req-1");
    assert!(!created[0].user_metadata.contains_key("status"));
}

#[tokio::test]
async fn missing_user_id_is_a_bad_request() {
    let provider = Arc::new(FakeProvider::default());
    let app = app(provider.clone());

    let (status, body) = post(&app, "/approve-user", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "userId is required" }));
    assert!(provider.calls().is_empty());

    let (status, body) = post(&app, "/approve-user", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_signup_request_is_not_found() {
    let provider = Arc::new(FakeProvider::default());
    let app = app(provider.clone());

    let (status, body) = post(&app, "/approve-user", r#"{"userId":"missing"}"#).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Signup request not found");
    assert_eq!(provider.calls(), vec!["find:missing"]);
}

#[tokio::test]
async fn provider_rejections_pass_their_message_through() {
    let provider = Arc::new(FakeProvider {
        reject_with: Some("A user with this email address has already been registered".into()),
        ..Default::default()
    });
    let app = app(provider.clone());

    let (status, body) = post(&app, "/approve-user", r#"{"userId":"req-1"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "A user with this email address has already been registered"
    );
    // the request stays pending when account creation fails
    assert_eq!(provider.calls(), vec!["find:req-1", "create:ada@uni.edu"]);
}

#[tokio::test]
async fn approving_with_credentials_skips_the_signup_lookup() {
    let provider = Arc::new(FakeProvider::default());
    let app = app(provider.clone());

    let (status, body) = post(
        &app,
        "/approve-user-with-credentials",
        r#"{"userId":"req-9","userEmail":"grace@uni.edu","userPassword":"cobol-rules"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "grace@uni.edu");
    assert!(body.get("temporaryPassword").is_none());
    assert_eq!(provider.calls(), vec!["create:grace@uni.edu"]);

    let created = provider.created.lock().unwrap();
    assert_eq!(created[0].password, "cobol-rules");
    assert_eq!(created[0].user_metadata["signup_request_id"], "req-9");
}

#[tokio::test]
async fn credentials_are_validated_before_calling_the_provider() {
    let provider = Arc::new(FakeProvider::default());
    let app = app(provider.clone());

    let (status, body) = post(
        &app,
        "/approve-user-with-credentials",
        r#"{"userId":"req-9","userEmail":"not-an-email"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = app(Arc::new(FakeProvider::default()));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/approve-user")
        .header(header::ORIGIN, "https://buildersarc.dev")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, apikey")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(allowed.contains("x-client-info"));
    assert!(allowed.contains("apikey"));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/approve-user-with-credentials")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
