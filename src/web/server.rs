//! WebSocket server mirroring the terminal to browsers.

use super::protocol::WebInput;
use crate::input::GameInput;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

const INDEX_HTML: &str = include_str!("../../web/index.html");

/// Terminal frames going out to every client.
pub type OutputSender = broadcast::Sender<Vec<u8>>;

type InputSender = mpsc::Sender<GameInput>;
type InputReceiver = mpsc::Receiver<GameInput>;

/// Channels shared between the game loop and client connections.
pub struct WebServer {
    output_tx: OutputSender,
    input_tx: InputSender,
    input_rx: Arc<Mutex<InputReceiver>>,
}

impl WebServer {
    pub fn new() -> Self {
        let (output_tx, _) = broadcast::channel(100);
        let (input_tx, input_rx) = mpsc::channel(100);

        Self {
            output_tx,
            input_tx,
            input_rx: Arc::new(Mutex::new(input_rx)),
        }
    }

    /// Sender for the terminal tee.
    pub fn output_sender(&self) -> OutputSender {
        self.output_tx.clone()
    }

    /// Next input from any browser, without blocking the game loop.
    pub fn try_recv_input_sync(&self) -> Option<GameInput> {
        let mut rx = self.input_rx.try_lock().ok()?;
        rx.try_recv().ok()
    }
}

impl Default for WebServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept connections on `port` forever.
pub async fn start_web_server(port: u16, server: Arc<WebServer>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(port, "Web server listening, open http://localhost:{port}");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, server).await {
                        warn!(%addr, error = %e, "Connection error");
                    }
                });
            }
            Err(e) => warn!(error = %e, "Accept error"),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<WebServer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut peek_buf = [0u8; 512];
    let n = stream.peek(&mut peek_buf).await?;
    if is_page_request(&peek_buf[..n]) {
        serve_html(stream).await?;
        return Ok(());
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!(%addr, "WebSocket connected");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut output_rx = server.output_tx.subscribe();
    let input_tx = server.input_tx.clone();

    let send_task = tokio::spawn(async move {
        loop {
            match output_rx.recv().await {
                Ok(data) => {
                    if ws_sender.send(Message::Binary(data)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(%addr, skipped, "Client lagging, frames dropped");
                }
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                match WebInput::parse(&text).and_then(|m| m.to_game_input()) {
                    Some(input) => {
                        if input_tx.send(input).await.is_err() {
                            break;
                        }
                    }
                    None => debug!(%addr, %text, "Ignored client message"),
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    info!(%addr, "WebSocket disconnected");
    Ok(())
}

/// A plain GET for the page, as opposed to a WebSocket upgrade.
fn is_page_request(head: &[u8]) -> bool {
    let request = String::from_utf8_lossy(head);
    request.starts_with("GET / ") && !request.to_ascii_lowercase().contains("upgrade: websocket")
}

async fn serve_html(mut stream: TcpStream) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        INDEX_HTML.len(),
        INDEX_HTML
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_detection() {
        assert!(is_page_request(b"GET / HTTP/1.1\r\nHost: localhost\r\n"));
        assert!(!is_page_request(
            b"GET / HTTP/1.1\r\nUpgrade: websocket\r\nConnection: Upgrade\r\n"
        ));
        assert!(!is_page_request(b"GET /favicon.ico HTTP/1.1\r\n"));
    }

    #[test]
    fn test_input_queue_is_non_blocking() {
        let server = WebServer::new();
        assert_eq!(server.try_recv_input_sync(), None);
        server.input_tx.try_send(GameInput::Jump).unwrap();
        assert_eq!(server.try_recv_input_sync(), Some(GameInput::Jump));
    }

    #[test]
    fn test_page_embeds_client() {
        assert!(INDEX_HTML.contains("WebSocket"));
        assert!(INDEX_HTML.contains("pointer"));
    }
}
