//! # API REST
//!
//! REST API implementation for NeoFeed.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and the evaluation service, so responses are identical to
//! the gRPC API.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{pb, EvaluationService, HealthService};

/// Application state shared across REST API handlers
#[derive(Clone, Default)]
pub struct AppState {
    evaluation_service: EvaluationService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, evaluate_discharge),
    components(schemas(pb::HealthRes, pb::EvaluateDischargeReq, pb::EvaluateDischargeRes))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI mounted at `/swagger-ui`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/evaluations", post(evaluate_discharge))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState::default())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = pb::HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<pb::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/evaluations",
    request_body = pb::EvaluateDischargeReq,
    responses(
        (status = 200, description = "Discharge recommendation", body = pb::EvaluateDischargeRes),
        (status = 422, description = "A field is outside its documented range")
    )
)]
/// Evaluate discharge readiness for one infant
///
/// Takes the ten clinical observations and returns the recommendation with its rationale.
/// Unsafe recommendations are ordinary `200` responses; only out-of-range input is an error.
///
/// # Errors
/// Returns `422 Unprocessable Entity` naming the offending field if:
/// - a real-valued field is negative, NaN or infinite, or
/// - `oral_feed_percentage` is outside 0-100.
#[axum::debug_handler]
async fn evaluate_discharge(
    State(state): State<AppState>,
    Json(req): Json<pb::EvaluateDischargeReq>,
) -> Result<Json<pb::EvaluateDischargeRes>, (StatusCode, String)> {
    match state.evaluation_service.evaluate(req) {
        Ok(res) => Ok(Json(res)),
        Err(violation) => Err((StatusCode::UNPROCESSABLE_ENTITY, violation.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn evaluation_body(oral_feed_percentage: i64, distance: f64) -> Body {
        Body::from(
            serde_json::json!({
                "apnea_bradycardia_recent": false,
                "oxygen_requirement_lpm": 0.05,
                "weight_gain_g_per_kg": 20.0,
                "oral_feed_percentage": oral_feed_percentage,
                "feeding_tolerance_ml_per_kg": 100.0,
                "residuals_or_emesis": false,
                "parent_trained": true,
                "caregiver_competent": true,
                "home_nursing_available": false,
                "distance_from_hospital_hours": distance
            })
            .to_string(),
        )
    }

    fn post_evaluation(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/evaluations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let res: pb::HealthRes = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(res.ok);
    }

    #[tokio::test]
    async fn test_evaluate_returns_recommendation() {
        let response = router()
            .oneshot(post_evaluation(evaluation_body(90, 3.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let res: pb::EvaluateDischargeRes =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(res.category, "high_risk");
        assert_eq!(
            res.rationale,
            "High risk: Distance from hospital is too far for safe home NG management."
        );
    }

    #[tokio::test]
    async fn test_evaluate_safe_with_follow_up() {
        let response = router()
            .oneshot(post_evaluation(evaluation_body(90, 1.5)))
            .await
            .unwrap();
        let res: pb::EvaluateDischargeRes =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(res.category, "safe_with_considerations");
        assert_eq!(res.social_risk, "moderate risk; ensure follow-up plan.");
    }

    #[tokio::test]
    async fn test_out_of_range_is_unprocessable() {
        let response = router()
            .oneshot(post_evaluation(evaluation_body(101, 1.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response)
            .await
            .starts_with("oral_feed_percentage:"));
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let body = Body::from(r#"{"apnea_bradycardia_recent": false}"#);
        let response = router().oneshot(post_evaluation(body)).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
