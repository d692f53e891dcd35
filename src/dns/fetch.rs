use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Downloads the whole body of `url` as text. One attempt, no retry; any
/// transport failure or non-2xx status is an error, which the caller treats
/// as fatal at startup.
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serves a single canned HTTP response on a loopback port.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetch_returns_body_as_text() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 8\r\nConnection: close\r\n\r\n1.1.1.1\n",
        );
        let body = fetch_text(&url).await.expect("fetch should succeed");
        assert_eq!(body, "1.1.1.1\n");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let result = fetch_text(&url).await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let result = fetch_text(&format!("http://{}/", addr)).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
