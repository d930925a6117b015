use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::{ApiKeyInterceptor, NeoFeedService, pb::neo_feed_server::NeoFeedServer};
use api_shared::{ApiConfig, FILE_DESCRIPTOR_SET};

/// Main entry point for the NeoFeed application
///
/// Starts both gRPC and REST servers concurrently:
/// - gRPC server on port 50051 (configurable via NEOFEED_GRPC_ADDR)
/// - REST server on port 3000 (configurable via NEOFEED_REST_ADDR)
///
/// The gRPC server requires authentication via x-api-key header.
/// The REST server is open; it serves the same evaluations.
///
/// # Environment Variables
/// - `NEOFEED_GRPC_ADDR`: gRPC server address (default: "0.0.0.0:50051")
/// - `NEOFEED_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NEOFEED_ENABLE_REFLECTION`: gRPC server reflection (default: "false")
/// - `API_KEY`: API key for gRPC authentication (required)
///
/// # Returns
/// * `Ok(())` - If servers start and run successfully
/// * `Err(anyhow::Error)` - If configuration, binding or either server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neofeed_run=info".parse()?)
                .add_directive("api_shared=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env()?;
    let interceptor = ApiKeyInterceptor::new(cfg.require_api_key()?);

    // Both ports are bound up front so an address clash fails startup.
    let rest_listener = bind("REST", cfg.rest_addr()).await?;
    let grpc_listener = bind("gRPC", cfg.grpc_addr()).await?;

    tracing::info!("++ Starting NeoFeed gRPC on {}", cfg.grpc_addr());
    tracing::info!("++ Starting NeoFeed REST on {}", cfg.rest_addr());

    let rest_server = async move {
        axum::serve(rest_listener, api_rest::router())
            .await
            .context("REST server failed")
    };

    let mut grpc_builder = Server::builder().add_service(NeoFeedServer::with_interceptor(
        NeoFeedService::default(),
        interceptor,
    ));
    if cfg.enable_reflection() {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        grpc_builder = grpc_builder.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    }
    let grpc_server = async move {
        grpc_builder
            .serve_with_incoming(TcpListenerStream::new(grpc_listener))
            .await
            .context("gRPC server failed")
    };

    serve_both(rest_server, grpc_server).await
}

async fn bind(name: &str, addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {name} server on {addr}"))
}

/// Runs both servers until the first one stops; its result becomes the process result.
async fn serve_both(
    rest: impl Future<Output = anyhow::Result<()>>,
    grpc: impl Future<Output = anyhow::Result<()>>,
) -> anyhow::Result<()> {
    tokio::select! {
        res = rest => res,
        res = grpc => res,
    }
}
