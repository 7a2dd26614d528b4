//! Blocking HTTP server.
//!
//! A fixed pool of worker threads share one `tiny_http` listener. Each
//! worker opens its own database connection; SQLite's write lock is what
//! serializes their claims and releases.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Request, Response, Server};

use crate::database::{Database, DatabaseConfig};
use crate::error::{Error, Result};

use super::dto::ErrorBody;
use super::routes::{route, ApiResponse};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Largest request body the server will read; longer bodies get a 400.
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Stops a running [`ApiServer`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    stop: Arc<AtomicBool>,
    server: Arc<Server>,
    workers: usize,
}

impl ShutdownHandle {
    /// Asks every worker to finish its current request and exit.
    pub fn shutdown(&self) {
        self.stop.store(true, Ordering::SeqCst);
        for _ in 0..self.workers {
            self.server.unblock();
        }
    }
}

/// The parkade HTTP API server.
///
/// # Examples
///
/// ```no_run
/// use parkade::api::ApiServer;
/// use parkade::DatabaseConfig;
///
/// let server = ApiServer::bind("127.0.0.1:8080", DatabaseConfig::new("/tmp/parkade.db"), 4)
///     .unwrap();
/// println!("listening on {:?}", server.local_addr());
/// server.run().unwrap();
/// ```
pub struct ApiServer {
    server: Arc<Server>,
    db_config: DatabaseConfig,
    workers: usize,
    stop: Arc<AtomicBool>,
}

impl ApiServer {
    /// Binds the listener. Port 0 picks a free port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServerStart`] if the address cannot be bound.
    pub fn bind(address: &str, db_config: DatabaseConfig, workers: usize) -> Result<Self> {
        let server = Server::http(address).map_err(|e| Error::ServerStart {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
            db_config,
            workers: workers.max(1),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The bound socket address.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Returns a handle that stops [`ApiServer::run`].
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            stop: Arc::clone(&self.stop),
            server: Arc::clone(&self.server),
            workers: self.workers,
        }
    }

    /// Serves requests until shut down.
    ///
    /// Every worker opens its database before the first request is
    /// accepted; if any of them fails, the others are stopped and the error
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a worker cannot open the database or cannot be
    /// spawned.
    pub fn run(self) -> Result<()> {
        let address = self
            .local_addr()
            .map_or_else(|| "unknown address".to_string(), |a| a.to_string());
        log::info!("serving on {address} with {} workers", self.workers);

        let mut handles = Vec::with_capacity(self.workers);
        for index in 0..self.workers {
            let server = Arc::clone(&self.server);
            let stop = Arc::clone(&self.stop);
            let db = match Database::open(self.db_config.clone()) {
                Ok(db) => db,
                Err(e) => {
                    self.shutdown_handle().shutdown();
                    join_all(handles);
                    return Err(e);
                }
            };
            let handle = thread::Builder::new()
                .name(format!("parkade-http-{index}"))
                .spawn(move || worker_loop(&server, &db, &stop));
            match handle {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    self.shutdown_handle().shutdown();
                    join_all(handles);
                    return Err(e.into());
                }
            }
        }

        join_all(handles);
        log::info!("server stopped");
        Ok(())
    }
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            log::error!("HTTP worker panicked");
        }
    }
}

fn worker_loop(server: &Server, db: &Database, stop: &AtomicBool) {
    while !stop.load(Ordering::SeqCst) {
        match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => handle(db, request),
            Ok(None) => {}
            Err(e) => {
                log::warn!("failed to receive request: {e}");
            }
        }
    }
}

fn handle(db: &Database, mut request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let response = match read_body(&mut request) {
        Ok(body) => route(db, &method, &url, &body),
        Err(rejected) => rejected,
    };

    log::info!("{method} {url} -> {}", response.status);
    if let Err(e) = request.respond(to_http(response)) {
        log::warn!("failed to send response for {method} {url}: {e}");
    }
}

fn read_body(request: &mut Request) -> std::result::Result<String, ApiResponse> {
    let mut body = String::new();
    // One byte past the limit tells an oversized body from one that fits.
    let read = request
        .as_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_string(&mut body);

    match read {
        Ok(n) if u64::try_from(n).unwrap_or(u64::MAX) > MAX_BODY_BYTES => Err(bad_request(
            &format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
        )),
        Ok(_) => Ok(body),
        Err(e) => {
            log::debug!("unreadable request body: {e}");
            Err(bad_request("Request body is not valid UTF-8"))
        }
    }
}

fn bad_request(message: &str) -> ApiResponse {
    let error = ErrorBody::new(400, message);
    ApiResponse {
        status: error.status,
        body: serde_json::to_string(&error).unwrap_or_default(),
    }
}

fn to_http(response: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let http = Response::from_string(response.body).with_status_code(response.status);
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => http.with_header(header),
        Err(()) => http,
    }
}
