use axum::{
    middleware,
    routing::get,
    Router,
};
use crate::handlers::catalog::{
    check_slug_availability, create_catalog, delete_catalog, get_catalog, get_public_storefront,
    list_catalogs, update_catalog,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    // Storefront pages are public
    let open_routes = Router::new()
        .route("/public/catalogs/{slug}", get(get_public_storefront));

    // Catalog administration requires a signed-in user
    let protected_routes = Router::new()
        .route("/catalogs", get(list_catalogs).post(create_catalog))
        .route("/catalogs/slug-availability", get(check_slug_availability))
        .route(
            "/catalogs/{id}",
            get(get_catalog).patch(update_catalog).delete(delete_catalog),
        )
        .layer(middleware::from_fn_with_state(state, require_auth));

    open_routes.merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::auth::jwt::Claims;
    use crate::routes::create_router;
    use crate::services::catalog::CatalogService;
    use crate::state::AppState;
    use crate::store::scripted::{Reply, ScriptedStore};

    const SECRET: &str = "s3cret";

    fn app(store: Arc<ScriptedStore>) -> axum::Router {
        let state = AppState {
            catalogs: CatalogService::new(store, "https://app.example.com"),
            jwt_secret: Arc::from(SECRET),
        };
        create_router(state.clone()).with_state(state)
    }

    fn token(role: &str, sub: Option<Uuid>) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub,
            email: None,
            role: role.into(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(1)).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    fn user_token() -> String {
        token("authenticated", Some(Uuid::from_u128(7)))
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn list_request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/catalogs");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn create_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/catalogs")
            .header(header::AUTHORIZATION, format!("Bearer {}", user_token()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let store = ScriptedStore::silent();
        let (status, body) = send(app(store.clone()), list_request(None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Missing Authorization header", "code": "unauthorized" }));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let (status, body) =
            send(app(ScriptedStore::silent()), list_request(Some("Basic dXNlcjpwYXNz"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid Authorization format", "code": "unauthorized" }));
    }

    #[tokio::test]
    async fn bad_token_is_unauthorized() {
        let (status, body) =
            send(app(ScriptedStore::silent()), list_request(Some("Bearer not-a-jwt"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid or expired token", "code": "unauthorized" }));
    }

    #[tokio::test]
    async fn anonymous_token_is_sent_to_sign_in() {
        let bearer = format!("Bearer {}", token("anon", None));
        let (status, body) = send(app(ScriptedStore::silent()), list_request(Some(&bearer))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Sign-in required", "code": "unauthorized" }));
    }

    #[tokio::test]
    async fn signed_in_user_lists_catalogs() {
        let store = ScriptedStore::replying(Reply::Rows(Vec::new()));
        let bearer = format!("Bearer {}", user_token());

        let (status, body) = send(app(store), list_request(Some(&bearer))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn storefront_is_open_without_a_token() {
        let document = serde_json::from_value(json!({
            "catalog": { "name": "Loja", "whatsapp_number": "5511" },
            "items": []
        }))
        .unwrap();
        let store = ScriptedStore::replying(Reply::Document(Some(document)));

        let request = Request::builder()
            .uri("/public/catalogs/loja")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(store), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["name"], "Loja");
        assert_eq!(body["products"], json!([]));
    }

    #[tokio::test]
    async fn blank_required_fields_are_rejected_before_the_store() {
        let cases = [
            (json!({ "name": " ", "slug": "loja", "whatsappNumber": "5511" }), "Catalog name is required"),
            (json!({ "name": "Loja", "slug": "", "whatsappNumber": "5511" }), "Catalog slug is required"),
            (json!({ "name": "Loja", "slug": "loja", "whatsappNumber": "  " }), "WhatsApp number is required"),
        ];

        for (payload, message) in cases {
            let store = ScriptedStore::silent();
            let (status, body) = send(app(store.clone()), create_request(payload)).await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body, json!({ "error": message }));
            assert!(store.calls().is_empty());
        }
    }
}
