//! Liveness endpoint
//!
//! A minimal HTTP responder for external process supervisors. Returns a
//! static string at `/`; nothing else.

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::error::Result;

/// Body returned by the liveness probe
pub const STATUS_LINE: &str = "ticketry online";

/// The single-route liveness router
#[must_use]
pub fn router() -> Router {
    Router::new().route("/", get(|| async { STATUS_LINE }))
}

/// Serve the liveness endpoint until the process exits
pub async fn serve(bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(%bind, "liveness endpoint listening");
    serve_on(listener).await
}

/// Serve on an already-bound listener
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn responds_with_status_line() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = serve_on(listener).await;
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains(STATUS_LINE));
    }
}
