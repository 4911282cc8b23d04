//! Background JSON fetch client.
//!
//! HTTP is slow and the animation loop is not allowed to wait for it,
//! so blocking transport work runs on a dedicated worker thread.  The
//! control side and the worker talk over bounded channels:
//!
//! ```text
//!   submit(req, cb) ──▶ [request channel] ──▶ worker: execute + parse
//!        │                                          │
//!   pending cb ◀── pump() ◀── [completion channel] ◀┘
//! ```
//!
//! Completions are not invoked inline: [`FetchClient::pump`] hands the
//! stored callback to the deferred-call registry with a zero delay, so
//! it runs on the driver's next timer pass like any other deferred
//! work.  At most one request is in flight at a time; a second submit
//! is rejected with [`NetError::Busy`].

use core::fmt::Debug;
use std::sync::Arc;
use std::thread;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::future::block_on;
use log::{debug, warn};

use crate::error::{Error, NetError, Result};
use crate::timers::TimerPool;

/// Parsed JSON object delivered to fetch callbacks.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Reaction to a successful fetch, invoked with the driver context.
pub type FetchCallback<Ctx> = Box<dyn FnOnce(&mut Ctx, &Document)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body.into()),
        }
    }
}

/// Raw HTTP response handed back by a transport.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP backend.  Runs on the worker thread only.
pub trait HttpTransport {
    type Error: Debug;

    fn execute(&mut self, request: &FetchRequest) -> core::result::Result<FetchResponse, Self::Error>;
}

/// Transport that always fails; used when no network backend is wired
/// up (host simulation without connectivity).
pub struct NullTransport;

impl HttpTransport for NullTransport {
    type Error = &'static str;

    fn execute(
        &mut self,
        _request: &FetchRequest,
    ) -> core::result::Result<FetchResponse, Self::Error> {
        Err("no network backend")
    }
}

enum WorkerMsg {
    Request(FetchRequest),
    Shutdown,
}

type FetchOutcome = core::result::Result<Document, NetError>;

/// Channel depth 2: one request in flight plus the shutdown message.
struct NetChannels {
    requests: Channel<CriticalSectionRawMutex, WorkerMsg, 2>,
    completions: Channel<CriticalSectionRawMutex, FetchOutcome, 2>,
}

/// Control-side handle to the fetch worker.
pub struct FetchClient<Ctx> {
    channels: Arc<NetChannels>,
    pending: Option<FetchCallback<Ctx>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<Ctx: 'static> FetchClient<Ctx> {
    /// Spawns the worker thread around `transport`.
    pub fn spawn<T>(transport: T) -> Self
    where
        T: HttpTransport + Send + 'static,
    {
        let channels = Arc::new(NetChannels {
            requests: Channel::new(),
            completions: Channel::new(),
        });
        let worker_channels = Arc::clone(&channels);
        let worker = thread::spawn(move || worker_loop(transport, &worker_channels));
        Self {
            channels,
            pending: None,
            worker: Some(worker),
        }
    }

    /// Queues `request` for the worker.  `on_complete` runs via the
    /// deferred-call registry once a parsed document is back; it is
    /// skipped entirely when the fetch fails.
    pub fn submit(&mut self, request: FetchRequest, on_complete: FetchCallback<Ctx>) -> Result<()> {
        if self.pending.is_some() {
            return Err(Error::Net(NetError::Busy));
        }
        self.channels
            .requests
            .try_send(WorkerMsg::Request(request))
            .map_err(|_| Error::Net(NetError::ChannelFull))?;
        self.pending = Some(on_complete);
        Ok(())
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Drains finished fetches and schedules their callbacks onto
    /// `timers` with zero delay.  Returns how many callbacks were
    /// scheduled.
    pub fn pump(&mut self, now_ms: u64, timers: &mut TimerPool<Ctx>) -> usize {
        let mut scheduled = 0;
        while let Ok(outcome) = self.channels.completions.try_receive() {
            let callback = self.pending.take();
            match (outcome, callback) {
                (Ok(document), Some(callback)) => {
                    let slot = timers.schedule(
                        now_ms,
                        0,
                        Box::new(move |_timers, ctx| callback(ctx, &document)),
                    );
                    if slot.is_none() {
                        warn!("net: timer pool full, fetch result dropped");
                    } else {
                        scheduled += 1;
                    }
                }
                (Ok(_), None) => warn!("net: completion arrived with no pending request"),
                // failure details were logged by the worker; the
                // callback is skipped by design of the protocol
                (Err(_), _) => {}
            }
        }
        scheduled
    }

    /// Stops the worker and waits for it to drain.  A request still
    /// executing finishes first; its result is discarded.
    pub fn shutdown(mut self) {
        if self
            .channels
            .requests
            .try_send(WorkerMsg::Shutdown)
            .is_err()
        {
            warn!("net: request channel full at shutdown");
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("net: worker panicked");
            }
        }
    }
}

fn worker_loop<T: HttpTransport>(mut transport: T, channels: &NetChannels) {
    loop {
        match block_on(channels.requests.receive()) {
            WorkerMsg::Shutdown => break,
            WorkerMsg::Request(request) => {
                let outcome = run_request(&mut transport, &request);
                // depth 2 with one request in flight cannot overflow,
                // but a dropped completion must not go unnoticed: the
                // client would stay busy forever
                if channels.completions.try_send(outcome).is_err() {
                    warn!("net: completion channel full, result dropped");
                }
            }
        }
    }
    debug!("net: worker stopped");
}

fn run_request<T: HttpTransport>(transport: &mut T, request: &FetchRequest) -> FetchOutcome {
    let response = transport.execute(request).map_err(|e| {
        debug!("net: transport error for {}: {:?}", request.url, e);
        NetError::TransportFailed
    })?;

    if !(200..300).contains(&response.status) {
        debug!("net: {} returned HTTP {}", request.url, response.status);
        return Err(NetError::TransportFailed);
    }

    let value: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
        warn!("net: malformed JSON from {}: {}", request.url, e);
        NetError::MalformedResponse
    })?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => {
            warn!("net: response from {} is not a JSON object", request.url);
            Err(NetError::MalformedResponse)
        }
    }
}
