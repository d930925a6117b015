// Re-export the proto module from the shared `api-shared` crate so callers
// can reference `api_grpc::pb`.
pub use api_shared::pb;

use std::sync::Arc;

use api_shared::pb::neo_feed_server::NeoFeed;
use api_shared::pb::{EvaluateDischargeReq, EvaluateDischargeRes, HealthRes};
use api_shared::{auth, EvaluationService, HealthService};
use tonic::service::Interceptor;
use tonic::{Request, Response, Status};

/// Authentication interceptor for gRPC requests.
///
/// Every request must carry an `x-api-key` metadata entry equal to the key configured at startup.
#[derive(Clone)]
pub struct ApiKeyInterceptor {
    expected_key: Arc<str>,
}

impl ApiKeyInterceptor {
    pub fn new(expected_key: &str) -> Self {
        Self {
            expected_key: Arc::from(expected_key),
        }
    }
}

impl Interceptor for ApiKeyInterceptor {
    fn call(&mut self, req: Request<()>) -> Result<Request<()>, Status> {
        let api_key = req
            .metadata()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Status::unauthenticated("Missing x-api-key header"))?;

        auth::validate_api_key(api_key, &self.expected_key)?;
        Ok(req)
    }
}

#[derive(Default, Clone)]
pub struct NeoFeedService {
    evaluation_service: EvaluationService,
}

#[tonic::async_trait]
impl NeoFeed for NeoFeedService {
    async fn health(&self, _req: Request<()>) -> Result<Response<HealthRes>, Status> {
        Ok(Response::new(HealthService::check_health()))
    }

    async fn evaluate_discharge(
        &self,
        req: Request<EvaluateDischargeReq>,
    ) -> Result<Response<EvaluateDischargeRes>, Status> {
        match self.evaluation_service.evaluate(req.into_inner()) {
            Ok(res) => Ok(Response::new(res)),
            Err(violation) => Err(Status::invalid_argument(violation.to_string())),
        }
    }
}
