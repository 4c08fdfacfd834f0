//! Release download transport

use crate::error::{Result, UpdateError};
use eframe::egui;
use futures::StreamExt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Something that happened to an in-flight transfer
#[derive(Debug)]
pub enum TransferEvent {
    /// (received_bytes, total_bytes); total is 0 when the server sent no length
    Progress(u64, u64),
    Finished(std::result::Result<Vec<u8>, UpdateError>),
}

/// Upper bound on the body buffer reserved up front from Content-Length
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// Receiving end of a transfer. Dropping it abandons the transfer.
#[derive(Debug)]
pub struct TransferHandle {
    rx: Receiver<TransferEvent>,
}

/// Sending end, held by whoever performs the transfer
#[derive(Debug, Clone)]
pub struct TransferSender {
    tx: Sender<TransferEvent>,
}

impl TransferHandle {
    pub fn channel() -> (TransferSender, TransferHandle) {
        let (tx, rx) = mpsc::channel();
        (TransferSender { tx }, TransferHandle { rx })
    }

    /// Everything delivered since the last call, without blocking
    pub fn drain(&self) -> Drained {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => {
                    return Drained {
                        events,
                        disconnected: false,
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    return Drained {
                        events,
                        disconnected: true,
                    }
                }
            }
        }
    }
}

/// Result of one `drain` call
#[derive(Debug)]
pub struct Drained {
    pub events: Vec<TransferEvent>,
    /// Every sender is gone; no further events will arrive
    pub disconnected: bool,
}

impl TransferSender {
    /// Returns false once the handle is gone
    pub fn progress(&self, received: u64, total: u64) -> bool {
        self.tx.send(TransferEvent::Progress(received, total)).is_ok()
    }

    pub fn finish(&self, result: std::result::Result<Vec<u8>, UpdateError>) -> bool {
        self.tx.send(TransferEvent::Finished(result)).is_ok()
    }
}

/// Issues GET requests without blocking the caller
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> TransferHandle;
}

/// reqwest on a private Tokio runtime, waking the UI when events arrive
pub struct HttpTransport {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    ctx: egui::Context,
}

impl HttpTransport {
    pub fn new(ctx: egui::Context) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { runtime, client, ctx })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> TransferHandle {
        let (sender, handle) = TransferHandle::channel();
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        let url = url.to_string();

        self.runtime.spawn(async move {
            let result = fetch(&client, &url, &sender, &ctx).await;
            match &result {
                Ok(body) => info!(url = %url, bytes = body.len(), "Release download finished"),
                Err(e) => warn!(url = %url, error = %e, "Release download failed"),
            }
            if !sender.finish(result) {
                debug!(url = %url, "Dialog closed before download finished");
            }
            ctx.request_repaint();
        });

        handle
    }
}

/// Stream the body into memory, reporting progress as chunks arrive.
async fn fetch(
    client: &reqwest::Client,
    url: &str,
    sender: &TransferSender,
    ctx: &egui::Context,
) -> std::result::Result<Vec<u8>, UpdateError> {
    debug!(url, "Requesting release");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Transfer(format!("HTTP {}", status)));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut received: u64 = 0;
    let mut body = Vec::with_capacity(total_size.min(MAX_PREALLOC) as usize);
    let mut stream = response.bytes_stream();
    let mut last_repaint = Instant::now();

    sender.progress(0, total_size);

    while let Some(chunk) = stream.next().await {
        let data = chunk?;
        received += data.len() as u64;
        body.extend_from_slice(&data);

        let total = if total_size > 0 { total_size.max(received) } else { 0 };
        if !sender.progress(received, total) {
            return Err(UpdateError::Transfer("download abandoned".into()));
        }
        if last_repaint.elapsed() >= Duration::from_millis(100) {
            ctx.request_repaint();
            last_repaint = Instant::now();
        }
    }

    Ok(body)
}
