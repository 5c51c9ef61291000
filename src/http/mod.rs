//! The HTTP server, handler and routes.
//!
//! This file itself contains fairly little business logic and just sets up the
//! `hyper` server and catches errors. The main logic is in `handlers.rs`.

use bytes::Bytes;
use futures::FutureExt;
use http_body_util::Full;
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::{rt::TokioIo, server::graceful::GracefulShutdown};
use std::{
    convert::Infallible,
    future::Future,
    net::{IpAddr, SocketAddr},
    panic::AssertUnwindSafe,
    pin::pin,
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;

use crate::{api, config::Config, prelude::*, store::Store};
use self::handlers::handle;


mod handlers;
mod log;
mod response;



/// HTTP server configuration.
#[derive(Debug, Clone, confique::Config)]
pub(crate) struct HttpConfig {
    /// The TCP port the HTTP server should listen on.
    #[config(default = 3000)]
    pub(crate) port: u16,

    /// The bind address to listen on.
    #[config(default = "127.0.0.1")]
    pub(crate) address: IpAddr,

    /// Maximum size of request bodies in bytes. Larger requests are answered
    /// with "413 Payload Too Large".
    #[config(default = 1048576)]
    pub(crate) max_body_size: usize,

    /// How long to wait for open connections to finish when shutting down.
    #[config(default = "10s", deserialize_with = crate::config::deserialize_duration)]
    pub(crate) shutdown_timeout: Duration,
}


// All our responses have a body that is fully in memory.
type Response<T = Full<Bytes>> = hyper::Response<T>;
type Request<T> = hyper::Request<T>;


/// Context that the request handler has access to.
pub(crate) struct Context {
    api_root: api::RootNode,
    store: Arc<Store>,
    config: Config,
}

impl Context {
    pub(crate) fn new(config: Config, api_root: api::RootNode, store: Arc<Store>) -> Self {
        Self { api_root, store, config }
    }
}


/// Starts the HTTP server and runs it until a shutdown signal is received.
pub(crate) async fn serve(config: Config, api_root: api::RootNode, store: Arc<Store>) -> Result<()> {
    let http_config = config.http.clone();
    let ctx = Arc::new(Context::new(config, api_root, store));

    let addr = SocketAddr::new(http_config.address, http_config.port);
    let listener = TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    let graceful = GracefulShutdown::new();
    let mut shutdown = pin!(shutdown_signal());

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(v) => v,
                    Err(e) => {
                        warn!("Failed to accept connection: {e}");
                        continue;
                    }
                };
                trace!("Accepted connection from {peer}");

                // All our logic is encoded in the function `handle`. The only
                // thing we are doing here is to pass the context to that
                // function, and clone its `Arc` accordingly.
                let ctx = Arc::clone(&ctx);
                let service = service_fn(move |req| {
                    handle_internal_errors(handle(req, Arc::clone(&ctx)))
                });
                let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
                let conn = graceful.watch(conn);
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        debug!("Error serving connection from {peer}: {e}");
                    }
                });
            }

            () = &mut shutdown => {
                info!("Shutting down HTTP server...");
                break;
            }
        }
    }

    drop(listener);
    tokio::select! {
        () = graceful.shutdown() => info!("All connections closed"),
        () = tokio::time::sleep(http_config.shutdown_timeout) => {
            warn!(
                "Not all connections closed within {:?}, shutting down anyway",
                http_config.shutdown_timeout,
            );
        }
    }

    Ok(())
}

/// Resolves once SIGINT (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}

/// This just wraps another future and catches all panics that might occur when
/// resolving/polling that given future. This ensures that we always answer with
/// `500` instead of just closing the connection.
async fn handle_internal_errors(
    future: impl Future<Output = Response>,
) -> Result<Response, Infallible> {
    // The only shared state is the store. Its locks are released on unwinding
    // without being poisoned and no store operation panics halfway.
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(response) => Ok(response),
        Err(panic) => {
            // For most panics (which use `panic!` like `println!`), the payload
            // is either `&str` or `String`.
            let msg = panic.downcast_ref::<String>()
                .map(|s| s.as_str())
                .or(panic.downcast_ref::<&str>().copied());

            match msg {
                Some(msg) => error!("INTERNAL SERVER ERROR: HTTP handler panicked: '{}'", msg),
                None => error!("INTERNAL SERVER ERROR: HTTP handler panicked"),
            }

            Ok(response::internal_server_error())
        }
    }
}
