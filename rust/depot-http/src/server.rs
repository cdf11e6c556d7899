//! Serves a [Slice] over HTTP/1 (native only).

use std::net::SocketAddr;

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;

use crate::{DepotHttpError, Slice, SliceService};

/// A running HTTP server answering every request with one [Slice].
pub struct SliceServer {
    /// The endpoint URL where the server is listening
    pub endpoint: String,
    address: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl SliceServer {
    /// Bind `address` (e.g. `127.0.0.1:0` for an ephemeral port) and start
    /// serving `slice` on a background task.
    pub async fn start<S>(address: &str, slice: S) -> Result<Self, DepotHttpError>
    where
        S: Slice + 'static,
    {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|error| DepotHttpError::Transport(format!("{error}")))?;
        let address = listener
            .local_addr()
            .map_err(|error| DepotHttpError::Transport(format!("{error}")))?;
        let endpoint = format!("http://{}", address);
        let service = SliceService::new(slice);

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = listener.accept() => {
                        let (stream, peer) = match result {
                            Ok(accepted) => accepted,
                            Err(error) => {
                                tracing::warn!(%error, "Failed to accept connection");
                                continue;
                            }
                        };
                        let hyper_service = TowerToHyperService::new(service.clone());
                        tokio::spawn(async move {
                            if let Err(error) = http1::Builder::new()
                                .serve_connection(TokioIo::new(stream), hyper_service)
                                .await
                            {
                                tracing::debug!(%peer, %error, "Connection closed with error");
                            }
                        });
                    }
                }
            }
            tracing::debug!(%address, "Server stopped");
        });

        tracing::info!(%endpoint, "Serving slice");

        Ok(SliceServer {
            endpoint,
            address,
            shutdown_tx,
        })
    }

    /// The bound socket address
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Stop accepting connections. Connections already being served run to
    /// completion.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(());
    }
}
