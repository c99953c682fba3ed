use crate::config::TfiacConfig;
use crate::error::{Result, TfiacError};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;

/// Largest reply datagram accepted
const RECV_BUFFER_SIZE: usize = 4096;

/// Low-level UDP request/reply handler
///
/// Each exchange binds its own socket and drops it before returning, whatever the
/// outcome. Nothing is pooled or retried.
#[derive(Debug, Clone)]
pub struct Connection {
    host: String,
    port: u16,
    timeout: Duration,
}

impl Connection {
    pub fn new(config: &TfiacConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            timeout: config.timeout(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Send one datagram and wait for one reply datagram
    pub async fn exchange(&self, payload: &str) -> Result<Vec<u8>> {
        let target = self.resolve().await?;
        let socket = UdpSocket::bind(unspecified_for(&target)).await?;

        tracing::debug!("Sending to {}: {}", target, payload);
        socket.send_to(payload.as_bytes(), target).await?;

        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        let (len, from) = match timeout(self.timeout, socket.recv_from(&mut buf)).await {
            Ok(Ok(received)) => received,
            Ok(Err(e)) => return Err(TfiacError::Network(e)),
            Err(_) => return Err(TfiacError::Timeout(self.timeout)),
        };
        buf.truncate(len);

        tracing::debug!("Received {} bytes from {}", len, from);
        Ok(buf)
    }

    async fn resolve(&self) -> Result<SocketAddr> {
        lookup_host((self.host.as_str(), self.port))
            .await?
            .next()
            .ok_or_else(|| {
                TfiacError::Network(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No address found for {}", self.host),
                ))
            })
    }
}

fn unspecified_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    async fn local_peer() -> (UdpSocket, u16) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, port)
    }

    #[tokio::test]
    async fn exchange_returns_reply_bytes() {
        let (peer, port) = local_peer().await;
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, from) = peer.recv_from(&mut buf).await.unwrap();
            let mut reply = b"ack:".to_vec();
            reply.extend_from_slice(&buf[..len]);
            peer.send_to(&reply, from).await.unwrap();
        });

        let connection = Connection::new(&TfiacConfig::new("127.0.0.1").with_port(port));
        let reply = connection.exchange("<msg/>").await.unwrap();
        assert_eq!(reply, b"ack:<msg/>");
    }

    #[tokio::test]
    async fn silent_peer_times_out_after_configured_timeout() {
        let (_peer, port) = local_peer().await;
        let config = TfiacConfig::new("127.0.0.1")
            .with_port(port)
            .with_timeout(Duration::from_millis(300));
        let connection = Connection::new(&config);

        let started = Instant::now();
        let err = connection.exchange("<msg/>").await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, TfiacError::Timeout(t) if t == Duration::from_millis(300)));
        assert!(elapsed >= Duration::from_millis(300), "returned after {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(3), "returned after {:?}", elapsed);
    }

    #[tokio::test]
    async fn default_timeout_is_five_seconds() {
        let (_peer, port) = local_peer().await;
        let connection = Connection::new(&TfiacConfig::new("127.0.0.1").with_port(port));

        let started = Instant::now();
        let err = connection.exchange("<msg/>").await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, TfiacError::Timeout(_)), "got {err}");
        assert!(elapsed >= Duration::from_secs(5), "returned after {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(7), "returned after {:?}", elapsed);
    }

    #[tokio::test]
    async fn unresolvable_host_is_network_error() {
        let connection = Connection::new(&TfiacConfig::new("host.invalid"));
        let err = connection.exchange("<msg/>").await.unwrap_err();
        assert!(matches!(err, TfiacError::Network(_)), "got {err}");
    }
}
