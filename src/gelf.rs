use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpStream, UdpSocket};

use crate::error::SinkError;
use crate::sink::LogSink;

/// Default GELF input port.
pub const DEFAULT_GELF_PORT: u16 = 12201;

async fn resolve(addr: &str) -> Result<SocketAddr, SinkError> {
    lookup_host(addr)
        .await
        .map_err(|source| SinkError::Resolve { addr: addr.to_string(), source })?
        .next()
        .ok_or_else(|| SinkError::NoAddress(addr.to_string()))
}

/// Sends each payload as one uncompressed, unchunked GELF datagram.
///
/// A fresh socket is bound for every attempt and dropped afterwards.
#[derive(Debug, Clone)]
pub struct UdpSink {
    addr: String,
}

impl UdpSink {
    pub fn new(host: &str, port: u16) -> Self {
        UdpSink { addr: format!("{}:{}", host, port) }
    }

    pub fn address(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl LogSink for UdpSink {
    fn name(&self) -> &str {
        "udp"
    }

    async fn send(&self, payload: &[u8]) -> Result<(), SinkError> {
        let target = resolve(&self.addr).await?;
        let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };

        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| SinkError::Connect { addr: self.addr.clone(), source })?;
        socket
            .connect(target)
            .await
            .map_err(|source| SinkError::Connect { addr: self.addr.clone(), source })?;

        let sent = socket
            .send(payload)
            .await
            .map_err(|source| SinkError::Write { addr: self.addr.clone(), source })?;
        if sent != payload.len() {
            return Err(SinkError::ShortWrite {
                addr: self.addr.clone(),
                sent,
                len: payload.len(),
            });
        }
        Ok(())
    }
}

/// Sends each payload over its own TCP connection, terminated by `\n`.
///
/// GELF TCP inputs frame messages on the newline (or NUL) delimiter.
#[derive(Debug, Clone)]
pub struct TcpSink {
    addr: String,
}

impl TcpSink {
    pub fn new(host: &str, port: u16) -> Self {
        TcpSink { addr: format!("{}:{}", host, port) }
    }

    pub fn address(&self) -> &str {
        &self.addr
    }
}

/// Append the newline delimiter expected by line-framed collectors.
pub fn frame_line(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(payload.len() + 1);
    framed.extend_from_slice(payload);
    framed.push(b'\n');
    framed
}

#[async_trait]
impl LogSink for TcpSink {
    fn name(&self) -> &str {
        "tcp"
    }

    async fn send(&self, payload: &[u8]) -> Result<(), SinkError> {
        let target = resolve(&self.addr).await?;
        let mut stream = TcpStream::connect(target)
            .await
            .map_err(|source| SinkError::Connect { addr: self.addr.clone(), source })?;

        stream
            .write_all(&frame_line(payload))
            .await
            .map_err(|source| SinkError::Write { addr: self.addr.clone(), source })?;
        stream
            .shutdown()
            .await
            .map_err(|source| SinkError::Write { addr: self.addr.clone(), source })?;
        Ok(())
    }
}
