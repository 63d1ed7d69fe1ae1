//! Webserver state management

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

#[derive(Debug)]
pub struct WebServerState {
    pub bind_address: SocketAddr,
    pub server_start_time: Instant,
    requests_served: AtomicU64,
}

impl WebServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            server_start_time: Instant::now(),
            requests_served: AtomicU64::new(0),
        }
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Count one calculation request, returning the new total
    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }
}
