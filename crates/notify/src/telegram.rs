//! Telegram bot notifier.

use crate::Notifier;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Error, Debug)]
pub enum NotifyError {
    /// Transport level failure; the url is stripped since it embeds the bot token
    #[error("failed to reach telegram: {0}")]
    Request(reqwest::Error),

    /// Telegram answered with something other than 200
    #[error("telegram returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Sends messages to one chat through the bot `sendMessage` method.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: i64,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.into(),
            chat_id,
        }
    }

    /// Point the notifier at another bot API server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Send `message` as plain text.
    pub async fn send_message(&self, message: &str) -> Result<(), NotifyError> {
        let chat_id = self.chat_id.to_string();

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("chat_id", chat_id.as_str()), ("text", message)])
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.without_url()))?;

        match response.status() {
            StatusCode::OK => {
                debug!(chat_id = self.chat_id, "sent telegram message");
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(NotifyError::Status { status, body })
            }
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> eyre::Result<()> {
        self.send_message(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    /// Serve a single http request with a canned response and hand back the
    /// request head.
    fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base, handle)
    }

    #[test]
    fn test_endpoint() {
        let notifier = TelegramNotifier::new("123:abc", 42);
        assert_eq!(
            notifier.endpoint(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );

        let notifier = notifier.with_api_base("http://localhost:8081/");
        assert_eq!(notifier.endpoint(), "http://localhost:8081/bot123:abc/sendMessage");
    }

    #[test]
    fn test_debug_hides_token() {
        let notifier = TelegramNotifier::new("secret-token", 42);
        assert!(!format!("{:?}", notifier).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_send_ok() {
        let (base, server) = one_shot_server("HTTP/1.1 200 OK", r#"{"ok":true}"#);
        let notifier = TelegramNotifier::new("123:abc", -100).with_api_base(base);

        notifier.send_message("Alamat: 0xabc, Saldo WETH: 3 WETH").await.unwrap();

        let request = server.join().unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /bot123:abc/sendMessage?"));
        assert!(request_line.contains("chat_id=-100"));
        assert!(request_line.contains("text=Alamat%3A+0xabc%2C+Saldo+WETH%3A+3+WETH"));
    }

    #[tokio::test]
    async fn test_send_bad_status() {
        let (base, server) = one_shot_server(
            "HTTP/1.1 400 Bad Request",
            r#"{"ok":false,"description":"chat not found"}"#,
        );
        let notifier = TelegramNotifier::new("123:abc", 1).with_api_base(base);

        let err = notifier.send_message("hello").await.unwrap_err();
        server.join().unwrap();

        match err {
            NotifyError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("chat not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_send_unreachable() {
        let notifier =
            TelegramNotifier::new("secret-token", 1).with_api_base("http://127.0.0.1:1");

        let err = notifier.send("hello").await.unwrap_err();
        assert!(!err.to_string().contains("secret-token"));
    }
}
