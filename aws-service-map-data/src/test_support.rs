//! Loopback HTTP fixtures for exercising remote loaders without network access.

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::warn;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

const PATH: &str = "/index.json";
const LOOPBACK: &str = "127.0.0.1:0";

/// `axum` server answering every request with the same canned response.
///
/// The server runs on its own Tokio runtime, so blocking callers can use it
/// directly. Request heads are recorded for inspection. Dropping the server
/// shuts the runtime down without waiting for open connections.
///
/// Constructors block on the fixture runtime and must not be called from
/// within an async context.
pub struct StaticServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for StaticServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticServer")
            .field("addr", &self.addr)
            .field("requests", &self.requests)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

#[derive(Debug)]
enum Reply {
    Respond { status: StatusCode, body: Bytes },
    Stall,
}

#[derive(Debug, Clone)]
struct Fixture {
    reply: Arc<Reply>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticServer {
    /// Serve `body` with `status` on an ephemeral loopback port.
    ///
    /// # Errors
    ///
    /// Returns an error if `status` is not a valid HTTP status code or the
    /// runtime or listener cannot be created.
    pub fn start(status: u16, body: impl Into<Vec<u8>>) -> io::Result<Self> {
        let code = StatusCode::from_u16(status)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        Self::spawn(Reply::Respond {
            status: code,
            body: Bytes::from(body.into()),
        })
    }

    /// Accept requests but never answer, forcing client timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or listener cannot be created.
    pub fn stalled() -> io::Result<Self> {
        Self::spawn(Reply::Stall)
    }

    /// URL of a loopback port with nothing listening on it.
    ///
    /// # Errors
    ///
    /// Returns an error if a port cannot be reserved.
    pub fn unreachable_url() -> io::Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()?;
        let addr = runtime.block_on(async { TcpListener::bind(LOOPBACK).await?.local_addr() })?;
        Ok(format!("http://{addr}{PATH}"))
    }

    /// Address the server listens on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Document URL served by this instance.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}{PATH}", self.addr)
    }

    /// Request heads received so far, oldest first.
    ///
    /// Each head is the request line followed by one `name: value` line per
    /// header, with lower-case header names.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn spawn(reply: Reply) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let listener = runtime.block_on(TcpListener::bind(LOOPBACK))?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let fixture = Fixture {
            reply: Arc::new(reply),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(answer).with_state(fixture);
        runtime.spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                warn!("static server on {addr} stopped: {err}");
            }
        });
        Ok(Self {
            addr,
            requests,
            runtime: Some(runtime),
        })
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

async fn answer(State(fixture): State<Fixture>, request: Request) -> Response {
    fixture
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request_head(&request));
    match fixture.reply.as_ref() {
        Reply::Respond { status, body } => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        Reply::Stall => std::future::pending().await,
    }
}

fn request_head(request: &Request) -> String {
    let mut head = format!(
        "{} {} {:?}",
        request.method(),
        request.uri(),
        request.version()
    );
    for (name, value) in request.headers() {
        head.push_str("\r\n");
        head.push_str(name.as_str());
        head.push_str(": ");
        head.push_str(&String::from_utf8_lossy(value.as_bytes()));
    }
    head
}
