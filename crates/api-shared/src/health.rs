use crate::pb::HealthRes;

/// Health service used by both gRPC and REST APIs.
///
/// The evaluator has no backing store or downstream dependency, so a running process is a
/// healthy one.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Report the service as alive.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "NeoFeed is alive".into(),
        }
    }
}
