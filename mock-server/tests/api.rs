use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_cold_starts, AuthResponse, SearchResponse};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

const SIGNUP_BODY: &str = r#"{"full_name":"Asha Rao","age":27,"email":"asha@example.com","gender":"female","password":"secret123","interests":["hiking"]}"#;

// --- health ---

#[tokio::test]
async fn health_returns_ok() {
    let resp = app().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

// --- search ---

#[tokio::test]
async fn search_without_filter_returns_all_seeded() {
    let resp = app()
        .oneshot(get_request("/accommodations/search"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: SearchResponse = body_json(resp).await;
    assert_eq!(body.accommodations.len(), 4);
}

#[tokio::test]
async fn search_filters_by_city_case_insensitive() {
    let resp = app()
        .oneshot(get_request("/accommodations/search?city=udaipur"))
        .await
        .unwrap();
    let body: SearchResponse = body_json(resp).await;
    assert_eq!(body.accommodations.len(), 1);
    assert_eq!(body.accommodations[0].name, "Lakeside Guesthouse");
}

#[tokio::test]
async fn search_matches_city_substring() {
    let resp = app()
        .oneshot(get_request("/accommodations/search?city=banga"))
        .await
        .unwrap();
    let body: SearchResponse = body_json(resp).await;
    assert_eq!(body.accommodations.len(), 1);
    assert_eq!(body.accommodations[0].city, "Bangalore");
}

#[tokio::test]
async fn search_unknown_city_returns_empty() {
    let resp = app()
        .oneshot(get_request("/accommodations/search?city=Reykjavik"))
        .await
        .unwrap();
    let body: SearchResponse = body_json(resp).await;
    assert!(body.accommodations.is_empty());
}

#[tokio::test]
async fn search_ignores_date_params() {
    let resp = app()
        .oneshot(get_request(
            "/accommodations/search?city=Kochi&checkin=2024-06-01&checkout=2024-06-03",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: SearchResponse = body_json(resp).await;
    assert_eq!(body.accommodations.len(), 1);
}

// --- fetch one ---

#[tokio::test]
async fn get_accommodation_wraps_record_in_envelope() {
    let resp = app()
        .oneshot(get_request("/accommodations/101"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["accommodation"]["name"], "Harbor View Hostel");
}

#[tokio::test]
async fn get_unknown_accommodation_returns_404_with_message() {
    let resp = app()
        .oneshot(get_request("/accommodations/9999"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Accommodation not found");
}

// --- auth ---

#[tokio::test]
async fn signup_returns_201_with_token_and_user() {
    let resp = app()
        .oneshot(json_request("POST", "/auth/signup", SIGNUP_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: AuthResponse = body_json(resp).await;
    assert!(!body.token.is_empty());
    assert_eq!(body.user.full_name, "Asha Rao");
    assert_eq!(body.user.interests, vec!["hiking".to_string()]);
}

#[tokio::test]
async fn duplicate_signup_returns_409() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/auth/signup", SIGNUP_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(json_request("POST", "/auth/signup", SIGNUP_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "An account with this email already exists");
}

#[tokio::test]
async fn login_after_signup_succeeds() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/auth/signup", SIGNUP_BODY))
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            r#"{"email":"asha@example.com","password":"secret123"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthResponse = body_json(resp).await;
    assert_eq!(body.user.email, "asha@example.com");
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/auth/signup", SIGNUP_BODY))
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            r#"{"email":"asha@example.com","password":"wrong"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn unknown_email_returns_401() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            r#"{"email":"nobody@example.com","password":"secret123"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- cold start ---

#[tokio::test]
async fn cold_start_serves_503_then_recovers() {
    let app = app_with_cold_starts(1);

    let resp = app.clone().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "service starting");

    let resp = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
