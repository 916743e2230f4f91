//! Shared test doubles and fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, U256};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use fee_engine::blockchain::{CallBatch, ChainAddress, RequestId, SubmissionStatus, SubmitError, Submitter};
use fee_engine::config::{EngineConfig, SponsorshipConfig, SubmissionConfig};
use fee_engine::pricing::{FeeAsset, FetchError, PriceQuote, PriceSource};
use fee_engine::quoting::PaymentStrategy;

pub fn usdc() -> FeeAsset {
    FeeAsset::new("USDC", address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"), 6)
}

pub fn dai() -> FeeAsset {
    FeeAsset::new("DAI", address!("50c5725949a6f0c72e6c4a641f24049a917db0cb"), 18)
}

/// Config with USDC accepted and `mint` transactions sponsored.
pub fn engine_config() -> EngineConfig {
    EngineConfig {
        assets: vec![usdc()],
        sponsorship: SponsorshipConfig {
            eligible_kinds: vec!["mint".to_string()],
        },
        submission: SubmissionConfig {
            timeout_secs: 30,
            poll_interval_ms: 250,
        },
        ..Default::default()
    }
}

/// Price source answering from a fixed map; can be switched to failing.
pub struct StaticPrices {
    prices: Mutex<HashMap<ChainAddress, U256>>,
    failing: Mutex<bool>,
}

impl StaticPrices {
    pub fn new(prices: &[(ChainAddress, u64)]) -> Arc<Self> {
        Arc::new(Self {
            prices: Mutex::new(prices.iter().map(|(a, p)| (*a, U256::from(*p))).collect()),
            failing: Mutex::new(false),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl PriceSource for StaticPrices {
    async fn fetch_prices(&self, assets: &[ChainAddress]) -> Result<Vec<PriceQuote>, FetchError> {
        if *self.failing.lock().unwrap() {
            return Err(FetchError::Unreachable("scripted outage".to_string()));
        }
        let prices = self.prices.lock().unwrap();
        Ok(assets
            .iter()
            .filter_map(|a| prices.get(a).map(|p| PriceQuote::new(*a, *p)))
            .collect())
    }
}

/// How the scripted submitter answers `submit_transaction`.
#[derive(Debug, Clone, Copy)]
pub enum SubmitScript {
    Accept,
    Reject(SubmitError),
    Hang,
}

/// Submitter that records every call and replays scripted statuses.
pub struct ScriptedSubmitter {
    script: SubmitScript,
    statuses: Mutex<Vec<SubmissionStatus>>,
    submitted: Mutex<Vec<(RequestId, PaymentStrategy, usize)>>,
}

impl ScriptedSubmitter {
    pub fn new(script: SubmitScript, statuses: Vec<SubmissionStatus>) -> Arc<Self> {
        Arc::new(Self {
            script,
            statuses: Mutex::new(statuses),
            submitted: Mutex::new(Vec::new()),
        })
    }

    /// Every `(request id, strategy, call count)` handed to the submitter.
    pub fn submitted(&self) -> Vec<(RequestId, PaymentStrategy, usize)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Submitter for ScriptedSubmitter {
    async fn submit_transaction(
        &self,
        request_id: RequestId,
        calls: &CallBatch,
        fee_mode: &PaymentStrategy,
    ) -> Result<(), SubmitError> {
        self.submitted
            .lock()
            .unwrap()
            .push((request_id, fee_mode.clone(), calls.len()));

        match self.script {
            SubmitScript::Accept => Ok(()),
            SubmitScript::Reject(e) => Err(e),
            SubmitScript::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }

    async fn status(&self, _request_id: RequestId) -> Result<SubmissionStatus, SubmitError> {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.is_empty() {
            Ok(SubmissionStatus::Pending)
        } else {
            Ok(statuses.remove(0))
        }
    }
}

/// Start a programmable mock relay on an ephemeral localhost port.
///
/// `handler` receives the request body and returns `(status, body)`.
pub async fn start_relay<F>(handler: F) -> SocketAddr
where
    F: Fn(String) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let body = read_request_body(&mut socket).await;
                        let (status, response) = handler(body);
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a relay that accepts connections and never answers.
pub async fn start_silent_relay() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let header_end = find_header_end(&buf);
        if let Some(end) = header_end {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).into_owned();
            }
        }

        match tokio::time::timeout(Duration::from_secs(5), socket.read(&mut chunk)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => return String::new(),
            Ok(Ok(n)) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// JSON body for a relay price response.
pub fn quotes_json(quotes: &[(ChainAddress, &str)]) -> String {
    let quotes: Vec<_> = quotes
        .iter()
        .map(|(asset, price)| serde_json::json!({ "asset": asset, "native_unit_price": price }))
        .collect();
    serde_json::json!({ "quotes": quotes }).to_string()
}
