// Media Gateway configuration
//
// This module contains configuration structures and constants for the gateway.
// Upstream targets are resolved once at startup and are read-only afterwards.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Default values for configuration
pub mod defaults {
    // Listen address
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 3000;

    // 0 means one worker per CPU
    pub const WORKERS: usize = 0;

    // Keep-alive for client connections, in seconds
    pub const KEEPALIVE: u64 = 75;

    // Time allowed for a client to finish disconnecting, in seconds
    pub const CLIENT_TIMEOUT: u64 = 5;

    // Upstream call timeout in seconds (0 disables it)
    pub const UPSTREAM_TIMEOUT: u64 = 300;

    // Inbound body ceiling in bytes (0 means unlimited)
    pub const MAX_BODY_SIZE: usize = 0;

    // Conversion service
    pub const CONVERSION_API_URL: &str = "http://dh-server.fbk.eu";
    pub const CONVERSION_API_PORT: u16 = 7382;
    pub const CONVERSION_SUBMIT_PATH: &str = "/conversion-start";
    pub const CONVERSION_STATUS_PATH: &str = "/conversion-status";
    pub const CONVERSION_RESULT_PATH: &str = "/conversion-out";

    // Subtitling service
    pub const SUBTITLES_API_URL: &str = "http://dh-server.fbk.eu";
    pub const SUBTITLES_API_PORT: u16 = 7380;
    pub const SUBTITLES_SUBMIT_PATH: &str = "/create-subtitling-project";
    pub const SUBTITLES_STATUS_PATH: &str = "/project-state";
    pub const SUBTITLES_RESULT_PATH: &str = "/project-subtitles";

    // Multipart field carrying the media file
    pub const FILE_FIELD: &str = "file";
}

/// The two upstream services reachable through the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Conversion,
    Subtitles,
}

/// Lifecycle phase of an upstream job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Submit,
    Status,
    Result,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Conversion => write!(f, "conversion"),
            Backend::Subtitles => write!(f, "subtitles"),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Submit => write!(f, "submit"),
            Phase::Status => write!(f, "status"),
            Phase::Result => write!(f, "fetch"),
        }
    }
}

/// One of the six gateway operations, e.g. `status-conversion`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub backend: Backend,
    pub phase: Phase,
}

impl Operation {
    pub const fn new(backend: Backend, phase: Phase) -> Self {
        Self { backend, phase }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let service = match self.backend {
            Backend::Conversion => "conversion",
            Backend::Subtitles => "subtitling",
        };
        write!(f, "{}-{}", self.phase, service)
    }
}

/// Address of a single upstream operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub base_url: String,
    pub port: u16,
    pub path: String,
}

impl UpstreamTarget {
    /// Absolute URL of this target, without query string
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}:{}{}", base, self.port, self.path)
        } else {
            format!("{}:{}/{}", base, self.port, self.path)
        }
    }
}

/// Where one upstream service lives and the paths of its three operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoint {
    pub base_url: String,
    pub port: u16,
    pub submit_path: String,
    pub status_path: String,
    pub result_path: String,
}

impl BackendEndpoint {
    fn target(&self, path: &str) -> UpstreamTarget {
        UpstreamTarget {
            base_url: self.base_url.clone(),
            port: self.port,
            path: path.to_string(),
        }
    }

    fn targets(&self) -> BackendTargets {
        BackendTargets {
            submit: self.target(&self.submit_path),
            status: self.target(&self.status_path),
            result: self.target(&self.result_path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendTargets {
    pub submit: UpstreamTarget,
    pub status: UpstreamTarget,
    pub result: UpstreamTarget,
}

/// The six upstream targets, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct UpstreamTable {
    pub conversion: BackendTargets,
    pub subtitles: BackendTargets,
}

impl UpstreamTable {
    pub fn new(conversion: &BackendEndpoint, subtitles: &BackendEndpoint) -> Self {
        Self {
            conversion: conversion.targets(),
            subtitles: subtitles.targets(),
        }
    }

    /// Selects the single target serving `operation`
    pub fn target(&self, operation: Operation) -> &UpstreamTarget {
        let targets = match operation.backend {
            Backend::Conversion => &self.conversion,
            Backend::Subtitles => &self.subtitles,
        };
        match operation.phase {
            Phase::Submit => &targets.submit,
            Phase::Status => &targets.status,
            Phase::Result => &targets.result,
        }
    }
}

/// Type-safe gateway configuration holding validated values
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub workers: usize,
    pub keepalive: u64,
    pub client_timeout: u64,
    pub upstream_timeout: u64,
    pub max_body_size: usize,
    pub conversion: BackendEndpoint,
    pub subtitles: BackendEndpoint,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: defaults::PORT,
            workers: defaults::WORKERS,
            keepalive: defaults::KEEPALIVE,
            client_timeout: defaults::CLIENT_TIMEOUT,
            upstream_timeout: defaults::UPSTREAM_TIMEOUT,
            max_body_size: defaults::MAX_BODY_SIZE,
            conversion: BackendEndpoint {
                base_url: defaults::CONVERSION_API_URL.to_string(),
                port: defaults::CONVERSION_API_PORT,
                submit_path: defaults::CONVERSION_SUBMIT_PATH.to_string(),
                status_path: defaults::CONVERSION_STATUS_PATH.to_string(),
                result_path: defaults::CONVERSION_RESULT_PATH.to_string(),
            },
            subtitles: BackendEndpoint {
                base_url: defaults::SUBTITLES_API_URL.to_string(),
                port: defaults::SUBTITLES_API_PORT,
                submit_path: defaults::SUBTITLES_SUBMIT_PATH.to_string(),
                status_path: defaults::SUBTITLES_STATUS_PATH.to_string(),
                result_path: defaults::SUBTITLES_RESULT_PATH.to_string(),
            },
        }
    }
}

impl GatewayConfig {
    pub fn bind_address(&self) -> String {
        match self.host {
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
        }
    }

    /// Number of HTTP workers, falling back to the CPU count
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        (self.upstream_timeout > 0).then(|| Duration::from_secs(self.upstream_timeout))
    }

    pub fn max_body_size(&self) -> Option<usize> {
        (self.max_body_size > 0).then_some(self.max_body_size)
    }

    pub fn upstreams(&self) -> UpstreamTable {
        UpstreamTable::new(&self.conversion, &self.subtitles)
    }
}
