//! Standalone gRPC server binary.
//!
//! Runs the `neofeed.v1.NeoFeed` service on its own; `neofeed-run` runs it alongside REST.

use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::{pb::neo_feed_server::NeoFeedServer, ApiKeyInterceptor, NeoFeedService};
use api_shared::{ApiConfig, FILE_DESCRIPTOR_SET};

/// Main entry point for the NeoFeed gRPC server
///
/// # Environment Variables
/// - `NEOFEED_GRPC_ADDR`: Server address (default: "0.0.0.0:50051")
/// - `NEOFEED_ENABLE_REFLECTION`: Enable gRPC server reflection (default: "false")
/// - `API_KEY`: Required; clients send it as `x-api-key`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_grpc=info".parse()?)
                .add_directive("api_shared=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env()?;
    let addr = cfg.grpc_addr();
    let interceptor = ApiKeyInterceptor::new(cfg.require_api_key()?);

    tracing::info!("-- Starting NeoFeed gRPC on {}", addr);

    let mut server_builder = Server::builder().add_service(NeoFeedServer::with_interceptor(
        NeoFeedService::default(),
        interceptor,
    ));

    if cfg.enable_reflection() {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        server_builder = server_builder.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    server_builder.serve(addr).await?;

    Ok(())
}
