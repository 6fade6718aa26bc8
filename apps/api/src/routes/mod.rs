pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::resume::handlers as resume;
use crate::roadmap::handlers as roadmap;
use crate::state::{AppState, AuthState};

/// Router for the résumé / roadmap API.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/upload", post(resume::handle_upload))
        .route("/api/skills/analyze", post(roadmap::handle_analyze))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

/// Router for the standalone auth service.
pub fn build_auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/", get(auth::handle_root))
        .route("/signup", post(auth::handle_signup))
        .route("/login", post(auth::handle_login))
        .route("/profile", get(auth::handle_profile))
        .route("/logout", post(auth::handle_logout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::store::{InMemoryRevocationStore, SqlxUserStore, UserStore};
    use crate::errors::AppError;
    use crate::models::user::{NewUser, User};
    use crate::auth::token::TokenIssuer;
    use crate::config::Config;
    use crate::db::create_memory_pool;
    use crate::resume::extractor::TextExtractor;

    const BOUNDARY: &str = "careerlens-test-boundary";

    const RESUME_TEXT: &str = "Asha Verma\n\
        asha@example.com\n\
        +91 9876543210\n\
        EXPERIENCE\n\
        Backend Engineer at Acme, 2019 - 2022\n\
        EDUCATION\n\
        B.Tech, XYZ University\n\
        SKILLS\n\
        Python, SQL, Docker\n";

    struct FixedText {
        text: Option<&'static str>,
        called: AtomicBool,
    }

    #[async_trait]
    impl TextExtractor for FixedText {
        async fn extract(&self, _bytes: Vec<u8>) -> Option<String> {
            self.called.store(true, Ordering::SeqCst);
            self.text.map(str::to_string)
        }
    }

    fn api_router(text: Option<&'static str>) -> (Router, Arc<FixedText>) {
        let extractor = Arc::new(FixedText {
            text,
            called: AtomicBool::new(false),
        });
        let state = AppState {
            config: Config::default(),
            extractor: extractor.clone(),
        };
        (build_router(state), extractor)
    }

    fn multipart_request(field: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_message() {
        let (app, _) = api_router(None);
        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(json_body(resp).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_upload_parses_resume() {
        let (app, _) = api_router(Some(RESUME_TEXT));
        let resp = app
            .oneshot(multipart_request("file", "application/pdf", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["name"]["value"], "Asha Verma");
        assert_eq!(body["email"]["confidence"], 100);
        assert_eq!(body["phone"]["value"], "+91 9876543210");
        assert_eq!(body["work_experience"]["years"], 3);
        assert_eq!(body["education"]["confidence"], 85);
        assert_eq!(body["skills"]["value"], json!(["Python", "SQL", "Docker"]));
    }

    #[tokio::test]
    async fn test_png_rejected_before_extraction() {
        let (app, extractor) = api_router(Some(RESUME_TEXT));
        let resp = app
            .oneshot(multipart_request("file", "image/png", b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(!extractor.called.load(Ordering::SeqCst));

        let body = json_body(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_FILE_TYPE");
    }

    #[tokio::test]
    async fn test_unextractable_pdf_is_400() {
        let (app, _) = api_router(None);
        let resp = app
            .oneshot(multipart_request("file", "application/pdf", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
        assert_eq!(
            body["error"]["message"],
            "Could not extract text from this PDF."
        );
    }

    #[tokio::test]
    async fn test_missing_file_field_is_400() {
        let (app, _) = api_router(Some(RESUME_TEXT));
        let resp = app
            .oneshot(multipart_request("document", "application/pdf", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_returns_roadmap() {
        let (app, _) = api_router(None);
        let payload = json!({
            "candidate": {
                "current_role": "Designer",
                "current_skills": ["HTML"],
                "experience_years": 1,
                "education": "B.Des"
            },
            "target_role": {
                "title": "Frontend Developer",
                "required_skills": ["HTML", "JavaScript", "React"],
                "typical_experience": "2 years"
            }
        });
        let req = Request::post("/api/skills/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["analysis"]["matching_skills"], json!(["HTML"]));
        assert_eq!(body["analysis"]["skill_gap_percentage"], 66.7);
        assert_eq!(body["learning_roadmap"][0]["priority"], "High");
        assert_eq!(body["learning_roadmap"][1]["skills_to_learn"], json!(["React"]));
    }

    #[tokio::test]
    async fn test_analyze_missing_field_is_400() {
        let (app, _) = api_router(None);
        let req = Request::post("/api/skills/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"candidate": {}}"#))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"]["code"], "VALIDATION_ERROR");
    }

    // ── auth service ──────────────────────────────────────────────────────

    async fn auth_router() -> Router {
        let pool = create_memory_pool().await.unwrap();
        build_auth_router(AuthState {
            users: Arc::new(SqlxUserStore::new(pool)),
            revoked: Arc::new(InMemoryRevocationStore::default()),
            tokens: TokenIssuer::new("test-secret", 30),
        })
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    const SIGNUP_ASHA: &str =
        "name=asha&email=asha%40example.com&phone=9876543210&password=s3cret";

    async fn login(app: &Router, username: &str, password: &str) -> Response {
        app.clone()
            .oneshot(form_request(
                "/login",
                &format!("username={username}&password={password}"),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_signup_login_profile_logout() {
        let app = auth_router().await;

        let resp = app
            .clone()
            .oneshot(form_request("/signup", SIGNUP_ASHA))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["message"], "Signup successful");

        let resp = login(&app, "asha", "s3cret").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["token_type"], "bearer");
        let token = body["access_token"].as_str().unwrap().to_string();

        let resp = app
            .clone()
            .oneshot(bearer_request("GET", "/profile", &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["user"], "asha");

        let resp = app
            .clone()
            .oneshot(bearer_request("POST", "/logout", &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(bearer_request("GET", "/profile", &token))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(resp).await["error"]["message"],
            "Token revoked (logged out)"
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_and_email() {
        let app = auth_router().await;
        app.clone()
            .oneshot(form_request("/signup", SIGNUP_ASHA))
            .await
            .unwrap();

        let resp = app
            .clone()
            .oneshot(form_request(
                "/signup",
                "name=asha&email=other%40example.com&phone=1&password=x",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"]["message"], "Name already exists");

        let resp = app
            .clone()
            .oneshot(form_request(
                "/signup",
                "name=ravi&email=asha%40example.com&phone=1&password=x",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(resp).await["error"]["message"],
            "Email already exists"
        );
    }

    /// Lookups always miss, as when a concurrent signup commits between the
    /// duplicate check and the insert.
    struct StaleLookups(SqlxUserStore);

    #[async_trait]
    impl UserStore for StaleLookups {
        async fn find_by_name(&self, _name: &str) -> Result<Option<User>, AppError> {
            Ok(None)
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
            Ok(None)
        }

        async fn create(&self, user: NewUser) -> Result<User, AppError> {
            self.0.create(user).await
        }
    }

    #[tokio::test]
    async fn test_duplicate_caught_at_insert_is_400() {
        let pool = create_memory_pool().await.unwrap();
        let app = build_auth_router(AuthState {
            users: Arc::new(StaleLookups(SqlxUserStore::new(pool))),
            revoked: Arc::new(InMemoryRevocationStore::default()),
            tokens: TokenIssuer::new("test-secret", 30),
        });

        let resp = app
            .clone()
            .oneshot(form_request("/signup", SIGNUP_ASHA))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(form_request(
                "/signup",
                "name=asha&email=other%40example.com&phone=1&password=x",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"]["message"], "Name already exists");

        let resp = app
            .clone()
            .oneshot(form_request(
                "/signup",
                "name=ravi&email=asha%40example.com&phone=1&password=x",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(resp).await["error"]["message"],
            "Email already exists"
        );
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let app = auth_router().await;
        app.clone()
            .oneshot(form_request("/signup", SIGNUP_ASHA))
            .await
            .unwrap();

        let resp = login(&app, "asha", "wrong").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(resp).await["error"]["message"], "Invalid credentials");

        let resp = login(&app, "nobody", "s3cret").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = auth_router().await;

        let resp = app
            .clone()
            .oneshot(Request::get("/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(resp).await["error"]["message"], "Not authenticated");

        let resp = app
            .oneshot(bearer_request("GET", "/profile", "garbage"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(resp).await["error"]["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_signup_missing_field_is_400() {
        let app = auth_router().await;
        let resp = app
            .oneshot(form_request("/signup", "name=asha&email=a%40b.co"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
