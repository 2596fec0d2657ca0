//! # HTTP Server
//!
//! The accept loop. The artifact is already loaded and published inside the
//! [`AppState`] before [`serve`] binds the listener, so the Unready → Ready
//! transition is complete before the first connection is accepted: no request
//! can ever observe a partially loaded artifact.

use crate::handlers::{route, AppState};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Binds `addr` and serves requests until `shutdown` resolves.
///
/// Each connection runs in its own task over a clone of `state`; request
/// handling is pure over the shared artifact, so tasks never contend.
pub async fn serve<F>(state: AppState, addr: SocketAddr, shutdown: F) -> std::io::Result<()>
where
  F: Future<Output = ()>,
{
  let listener = TcpListener::bind(addr).await?;
  info!(%addr, "accepting prediction traffic");
  tokio::pin!(shutdown);
  loop {
    tokio::select! {
      _ = &mut shutdown => {
        info!("shutdown signal received");
        break;
      }
      accepted = listener.accept() => {
        let (stream, peer) = match accepted {
          Ok(pair) => pair,
          Err(err) => {
            warn!(error = %err, "accept failed");
            continue;
          }
        };
        let state = state.clone();
        tokio::spawn(async move {
          let io = TokioIo::new(stream);
          let service = service_fn(move |req| {
            let state = state.clone();
            async move { Ok::<_, Infallible>(route(req, state).await) }
          });
          if let Err(err) = auto::Builder::new(TokioExecutor::new())
            .serve_connection(io, service)
            .await
          {
            debug!(%peer, error = %err, "connection closed with error");
          }
        });
      }
    }
  }
  Ok(())
}
