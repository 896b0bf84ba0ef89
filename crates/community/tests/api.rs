use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use community::{
    config::{AdminSeed, Config},
    handler::AppRouter,
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@buildersarc.dev";
const ADMIN_PASSWORD: &str = "admin-secret";

async fn app() -> Router {
    app_with_latency(0).await
}

async fn app_with_latency(simulated_latency_ms: u64) -> Router {
    let config = Config {
        port: 0,
        jwt_secret: "test-secret".into(),
        bcrypt_cost: 4,
        simulated_latency_ms,
        admin: AdminSeed {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
            name: "Root".into(),
        },
        is_dev: true,
        enable_file_log: false,
    };

    let state = AppState::new(&config).await.unwrap();
    AppRouter::build(state)
}

struct Reply {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Reply {
        status,
        set_cookie,
        body,
    }
}

fn signup_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": "builder-pass",
        "confirm_password": "builder-pass",
        "department": "Computer Science",
        "social_links": { "github": "https://github.com/builder" }
    })
}

async fn signup(app: &Router, name: &str, email: &str) -> String {
    let reply = send(app, "POST", "/api/auth/signup", None, Some(signup_body(name, email))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.body["data"]["id"].as_str().unwrap().to_owned()
}

async fn login(app: &Router, email: &str, password: &str) -> Reply {
    send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

async fn admin_token(app: &Router) -> String {
    let reply = send(
        app,
        "POST",
        "/api/auth/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.body["data"]["access_token"].as_str().unwrap().to_owned()
}

async fn moderate(app: &Router, token: &str, id: &str, action: &str) -> Reply {
    send(
        app,
        "POST",
        &format!("/api/admin/users/{id}/{action}"),
        Some(token),
        None,
    )
    .await
}

#[tokio::test]
async fn new_signup_is_pending_and_cannot_log_in() {
    let app = app().await;

    let reply = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(signup_body("Ada Lovelace", "ada@uni.edu")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["data"]["status"], "pending");
    assert!(reply.body["data"].get("password").is_none());

    let reply = login(&app, "ada@uni.edu", "builder-pass").await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["message"], "Your account is pending admin approval");
}

#[tokio::test]
async fn duplicate_email_is_rejected_ignoring_case() {
    let app = app().await;
    signup(&app, "Ada", "ada@uni.edu").await;

    let reply = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(signup_body("Ada Again", "ADA@Uni.edu")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_signup_payload_is_a_bad_request() {
    let app = app().await;

    let reply = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "A",
            "email": "not-an-email",
            "password": "short",
            "confirm_password": "different"
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], "error");
}

#[tokio::test]
async fn blank_padded_name_is_rejected() {
    let app = app().await;

    let reply = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(signup_body("  ", "blank@uni.edu")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], "error");

    let reply = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(signup_body(" Al ", "al@uni.edu")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["data"]["name"], "Al");
}

#[tokio::test]
async fn approved_member_can_log_in_and_approving_twice_still_succeeds() {
    let app = app().await;
    let id = signup(&app, "Grace", "grace@uni.edu").await;
    let admin = admin_token(&app).await;

    let reply = moderate(&app, &admin, &id, "approve").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["status"], "approved");

    let reply = moderate(&app, &admin, &id, "approve").await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = login(&app, "grace@uni.edu", "builder-pass").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.set_cookie.unwrap().starts_with("token="));

    let token = reply.body["data"]["access_token"].as_str().unwrap().to_owned();
    let me = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["role"], "user");
    assert_eq!(me.body["data"]["profile"]["email"], "grace@uni.edu");
}

#[tokio::test]
async fn rejected_and_suspended_members_are_refused() {
    let app = app().await;
    let admin = admin_token(&app).await;

    let rejected = signup(&app, "Rita", "rita@uni.edu").await;
    let reply = moderate(&app, &admin, &rejected, "reject").await;
    assert_eq!(reply.body["data"]["status"], "rejected");
    assert_eq!(
        login(&app, "rita@uni.edu", "builder-pass").await.status,
        StatusCode::FORBIDDEN
    );

    let suspended = signup(&app, "Sam", "sam@uni.edu").await;
    moderate(&app, &admin, &suspended, "approve").await;
    let reply = moderate(&app, &admin, &suspended, "suspend").await;
    assert_eq!(reply.body["data"]["status"], "suspended");
    assert_eq!(
        login(&app, "sam@uni.edu", "builder-pass").await.status,
        StatusCode::FORBIDDEN
    );

    let reply = moderate(&app, &admin, &suspended, "reinstate").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["status"], "approved");
    assert_eq!(
        login(&app, "sam@uni.edu", "builder-pass").await.status,
        StatusCode::OK
    );

    let reply = moderate(&app, &admin, &suspended, "reinstate").await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn repeated_wrong_passwords_are_rate_limited() {
    let app = app().await;
    let id = signup(&app, "Linus", "linus@uni.edu").await;
    let admin = admin_token(&app).await;
    moderate(&app, &admin, &id, "approve").await;

    for _ in 0..5 {
        let reply = login(&app, "linus@uni.edu", "wrong-password").await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }

    let reply = login(&app, "linus@uni.edu", "builder-pass").await;
    assert_eq!(reply.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_wrong_passwords_cannot_exceed_the_limit() {
    let app = app_with_latency(20).await;
    let id = signup(&app, "Ken", "ken@uni.edu").await;
    let admin = admin_token(&app).await;
    moderate(&app, &admin, &id, "approve").await;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            login(&app, "ken@uni.edu", "wrong-password").await.status
        }));
    }

    let mut unauthorized = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::UNAUTHORIZED => unauthorized += 1,
            StatusCode::TOO_MANY_REQUESTS => {}
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(unauthorized, 5);

    let reply = login(&app, "ken@uni.edu", "builder-pass").await;
    assert_eq!(reply.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn successful_login_resets_the_failure_count() {
    let app = app().await;
    let id = signup(&app, "Edsger", "edsger@uni.edu").await;
    let admin = admin_token(&app).await;
    moderate(&app, &admin, &id, "approve").await;

    for _ in 0..4 {
        login(&app, "edsger@uni.edu", "wrong-password").await;
    }
    assert_eq!(
        login(&app, "edsger@uni.edu", "builder-pass").await.status,
        StatusCode::OK
    );

    for _ in 0..4 {
        let reply = login(&app, "edsger@uni.edu", "wrong-password").await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(
        login(&app, "edsger@uni.edu", "builder-pass").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn unknown_email_looks_like_a_wrong_password() {
    let app = app().await;

    let reply = login(&app, "nobody@uni.edu", "whatever-pass").await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_require_an_admin_session() {
    let app = app().await;

    let reply = send(&app, "GET", "/api/admin/users", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let id = signup(&app, "Alan", "alan@uni.edu").await;
    let admin = admin_token(&app).await;
    moderate(&app, &admin, &id, "approve").await;

    let user = login(&app, "alan@uni.edu", "builder-pass").await;
    let token = user.body["data"]["access_token"].as_str().unwrap().to_owned();

    let reply = send(&app, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = send(&app, "GET", "/api/admin/stats", Some("garbage"), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_filters_and_stats_track_statuses() {
    let app = app().await;
    let admin = admin_token(&app).await;

    let a = signup(&app, "Ada", "ada@uni.edu").await;
    let b = signup(&app, "Barbara", "barbara@uni.edu").await;
    signup(&app, "Claude", "claude@uni.edu").await;

    moderate(&app, &admin, &a, "approve").await;
    moderate(&app, &admin, &b, "reject").await;

    let reply = send(&app, "GET", "/api/admin/signup-requests", Some(&admin), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(reply.body["data"][0]["email"], "claude@uni.edu");

    let reply = send(
        &app,
        "GET",
        "/api/admin/users?page=1&page_size=2",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(reply.body["pagination"]["total_items"], 3);
    assert_eq!(reply.body["pagination"]["total_pages"], 2);

    let reply = send(
        &app,
        "GET",
        "/api/admin/users?status=approved",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(reply.body["data"][0]["email"], "ada@uni.edu");

    let reply = send(&app, "GET", "/api/admin/users?search=barb", Some(&admin), None).await;
    assert_eq!(reply.body["data"][0]["name"], "Barbara");

    let reply = send(&app, "GET", "/api/admin/stats", Some(&admin), None).await;
    assert_eq!(
        reply.body["data"],
        json!({ "total": 3, "pending": 1, "approved": 1, "rejected": 1, "suspended": 0 })
    );

    let reply = send(
        &app,
        "DELETE",
        &format!("/api/admin/users/{b}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = send(
        &app,
        "GET",
        &format!("/api/admin/users/{b}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_page_size_is_clamped() {
    let app = app().await;
    let admin = admin_token(&app).await;
    signup(&app, "Ada", "ada@uni.edu").await;

    let reply = send(
        &app,
        "GET",
        "/api/admin/users?page=1&page_size=2147483647",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(reply.body["pagination"]["page_size"], 100);
    assert_eq!(reply.body["pagination"]["total_pages"], 1);

    let reply = send(
        &app,
        "GET",
        "/api/admin/signup-requests?page=2147483647&page_size=2147483647",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body["data"].as_array().unwrap().is_empty());
    assert_eq!(reply.body["pagination"]["total_items"], 1);
}

#[tokio::test]
async fn members_edit_their_own_profile_and_password() {
    let app = app().await;
    let admin = admin_token(&app).await;

    let id = signup(&app, "Ken", "ken@uni.edu").await;
    signup(&app, "Dennis", "dennis@uni.edu").await;
    moderate(&app, &admin, &id, "approve").await;

    let token = login(&app, "ken@uni.edu", "builder-pass").await.body["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_owned();

    let reply = send(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({ "email": "dennis@uni.edu" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let reply = send(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({ "education": "MSc Systems", "age": 30 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["education"], "MSc Systems");
    assert_eq!(reply.body["data"]["name"], "Ken");

    let reply = send(
        &app,
        "PUT",
        "/api/profile/password",
        Some(&token),
        Some(json!({
            "current_password": "not-my-password",
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-pass"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(
        &app,
        "PUT",
        "/api/profile/password",
        Some(&token),
        Some(json!({
            "current_password": "builder-pass",
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-pass"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);

    assert_eq!(
        login(&app, "ken@uni.edu", "brand-new-pass").await.status,
        StatusCode::OK
    );

    let reply = send(
        &app,
        "PUT",
        "/api/profile",
        Some(&admin),
        Some(json!({ "name": "Admin Edit" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn refresh_issues_a_new_pair_and_me_reports_the_admin() {
    let app = app().await;

    let reply = send(
        &app,
        "POST",
        "/api/auth/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    let refresh = reply.body["data"]["refresh_token"].as_str().unwrap().to_owned();
    let access = reply.body["data"]["access_token"].as_str().unwrap().to_owned();

    let me = send(&app, "GET", "/api/auth/me", Some(&access), None).await;
    assert_eq!(me.body["data"]["role"], "admin");
    assert_eq!(me.body["data"]["profile"]["email"], ADMIN_EMAIL);

    // a refresh token is not accepted as a session
    let reply = send(&app, "GET", "/api/auth/me", Some(&refresh), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(
        &app,
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body["data"]["access_token"].is_string());
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = app().await;
    let admin = admin_token(&app).await;

    let reply = send(&app, "POST", "/api/auth/logout", Some(&admin), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.set_cookie.unwrap().starts_with("token="));
}

#[tokio::test]
async fn health_and_metrics_are_public() {
    let app = app().await;

    let reply = send(&app, "GET", "/api/healthchecker", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "success");

    admin_token(&app).await;

    let response = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("login_service_request_counter"));
}
