//! SSH transport for live devices (`ssh` feature).
//!
//! `ssh2` is blocking, so every command runs on the blocking thread pool with
//! a fresh session: connect, password login, exec, read until EOF.

use crate::live::{Credentials, Device, DeviceTransport};
use async_trait::async_trait;
use netassist_core::{AppError, AppResult};
use ssh2::Session;
use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SESSION_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct SshTransport {
    credentials: Credentials,
}

impl SshTransport {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

fn device_err(device: &Device, context: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Device(format!("{} ({}:{}): {}: {}", device.name, device.host, device.port, context, e))
}

fn run_command(device: &Device, credentials: &Credentials, command: &str) -> AppResult<String> {
    let addr = (device.host.as_str(), device.port)
        .to_socket_addrs()
        .map_err(|e| device_err(device, "resolve failed", e))?
        .next()
        .ok_or_else(|| device_err(device, "resolve failed", "no addresses"))?;

    let tcp = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .map_err(|e| device_err(device, "connect failed", e))?;

    let mut session = Session::new().map_err(|e| device_err(device, "session failed", e))?;
    session.set_tcp_stream(tcp);
    session.set_timeout(SESSION_TIMEOUT_MS);
    session
        .handshake()
        .map_err(|e| device_err(device, "handshake failed", e))?;
    session
        .userauth_password(&credentials.username, &credentials.password)
        .map_err(|e| device_err(device, "authentication failed", e))?;

    let mut channel = session
        .channel_session()
        .map_err(|e| device_err(device, "channel failed", e))?;
    channel
        .exec(command)
        .map_err(|e| device_err(device, "exec failed", e))?;

    let mut output = String::new();
    channel
        .read_to_string(&mut output)
        .map_err(|e| device_err(device, "read failed", e))?;
    channel
        .wait_close()
        .map_err(|e| device_err(device, "close failed", e))?;

    Ok(output)
}

#[async_trait]
impl DeviceTransport for SshTransport {
    async fn send_command(&self, device: &Device, command: &str) -> AppResult<String> {
        let device = device.clone();
        let credentials = self.credentials.clone();
        let command = command.to_string();

        tracing::debug!(device = %device.name, "Opening SSH session to {}:{}", device.host, device.port);

        tokio::task::spawn_blocking(move || run_command(&device, &credentials, &command))
            .await
            .map_err(|e| AppError::Device(format!("SSH task failed: {}", e)))?
    }
}
