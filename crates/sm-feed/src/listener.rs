//! Per-instrument blocking UDP listener.
//!
//! One listener thread owns one socket bound to its instrument's fixed local
//! port. It blocks in `recv_from` with a short timeout so that cancellation
//! is observed within one timeout interval, parses each datagram as a single
//! textual float, and hands the stamped observation to the channel. The
//! listener never touches the history store.
//!
//! Error behavior, by class:
//! - bind or socket-option failure: one `Status(Failed)` event, thread exits
//! - malformed datagram: dropped without a trace, loop continues
//! - receive timeout: cancellation checkpoint, loop continues
//! - any other receive error: swallowed, loop continues

use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use crossbeam_channel::Sender;
use sm_core::error::MonitorError;
use sm_core::{FeedEvent, Instrument, LinkState, Observation, ShutdownToken};
use tracing::{info, warn};

/// Largest datagram we accept. One textual float never comes close.
const RECV_BUF_LEN: usize = 1024;

/// Socket parameters shared by every listener.
///
/// `bind_ip` and `recv_timeout` exist so tests can bind explicitly and keep
/// shutdown latency short; production uses the defaults (loopback, 1 s).
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub bind_ip: IpAddr,
    pub recv_timeout: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            recv_timeout: Duration::from_secs(1),
        }
    }
}

/// Decode a datagram payload as one whitespace-padded decimal float.
///
/// Returns `None` for anything else: invalid UTF-8, empty payloads, trailing
/// garbage. Malformed payloads carry no information worth reporting.
#[inline]
pub fn parse_payload(buf: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(buf).ok()?;
    fast_float2::parse(text.trim()).ok()
}

fn bind_socket(
    inst: &Instrument,
    addr: SocketAddr,
    timeout: Duration,
) -> Result<UdpSocket, MonitorError> {
    let sock = UdpSocket::bind(addr).map_err(|e| MonitorError::Bind {
        ticker: inst.ticker.clone(),
        port: inst.port,
        source: e,
    })?;
    sock.set_read_timeout(Some(timeout))
        .map_err(|e| MonitorError::Socket {
            ticker: inst.ticker.clone(),
            source: e,
        })?;
    Ok(sock)
}

/// Service one instrument's port until cancellation or a terminal failure.
///
/// Runs on a dedicated thread owned by `FeedRuntime`. A bind failure is
/// terminal for this listener only; the rest of the feed is unaffected.
pub fn run_listener(
    inst: &Instrument,
    cfg: &ListenerConfig,
    tx: &Sender<FeedEvent>,
    token: &ShutdownToken,
) {
    let addr = SocketAddr::new(cfg.bind_ip, inst.port);

    let sock = match bind_socket(inst, addr, cfg.recv_timeout) {
        Ok(sock) => sock,
        Err(e) => {
            warn!("{e}");
            let _ = tx.send(FeedEvent::Status {
                ticker: inst.ticker.clone(),
                state: LinkState::Failed(e.to_string()),
            });
            return;
        }
    };

    info!("[{}] listening on {addr}", inst.ticker);
    if tx
        .send(FeedEvent::Status {
            ticker: inst.ticker.clone(),
            state: LinkState::Listening,
        })
        .is_err()
    {
        return; // consumer already gone
    }

    let mut buf = [0u8; RECV_BUF_LEN];
    while !token.is_cancelled() {
        match sock.recv_from(&mut buf) {
            Ok((len, _src)) => {
                // Malformed payloads are discarded without an event or a log.
                if let Some(value) = parse_payload(&buf[..len]) {
                    let event = FeedEvent::Observation {
                        ticker: inst.ticker.clone(),
                        obs: Observation::now(value),
                    };
                    if tx.send(event).is_err() {
                        break; // consumer gone, stop servicing the socket
                    }
                }
            }
            // Timeout is the cancellation checkpoint, not an error.
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => continue,
            // Per-packet receive errors are swallowed; the listener keeps going.
            Err(_) => continue,
        }
    }

    info!("[{}] listener stopped", inst.ticker);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use crossbeam_channel::unbounded;
    use sm_core::time_util;

    fn free_port() -> u16 {
        let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
        sock.local_addr().unwrap().port()
    }

    fn test_cfg() -> ListenerConfig {
        ListenerConfig {
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            recv_timeout: Duration::from_millis(50),
        }
    }

    fn spawn_listener(
        inst: Instrument,
        cfg: ListenerConfig,
        tx: Sender<FeedEvent>,
        token: ShutdownToken,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || run_listener(&inst, &cfg, &tx, &token))
    }

    #[test]
    fn parse_accepts_plain_and_padded_floats() {
        assert_eq!(parse_payload(b"0.42"), Some(0.42));
        assert_eq!(parse_payload(b"  3.14 \n"), Some(3.14));
        assert_eq!(parse_payload(b"-0.5"), Some(-0.5));
        assert_eq!(parse_payload(b"+2.5"), Some(2.5));
        assert_eq!(parse_payload(b"1e-3"), Some(0.001));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_payload(b"not-a-number"), None);
        assert_eq!(parse_payload(b""), None);
        assert_eq!(parse_payload(b"   "), None);
        assert_eq!(parse_payload(b"12.5abc"), None);
        assert_eq!(parse_payload(&[0xff, 0xfe]), None); // invalid UTF-8
    }

    #[test]
    fn valid_payload_becomes_one_observation() {
        let port = free_port();
        let inst = Instrument::new("AAPL", "Apple", port);
        let (tx, rx) = unbounded();
        let token = ShutdownToken::new();
        let handle = spawn_listener(inst, test_cfg(), tx, token.clone());

        // First event is the Listening status from the successful bind.
        let ev = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            ev,
            FeedEvent::Status {
                ticker: "AAPL".into(),
                state: LinkState::Listening,
            }
        );

        let before = time_util::now_us();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender
            .send_to(b"0.42", ("127.0.0.1", port))
            .unwrap();

        let ev = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match ev {
            FeedEvent::Observation { ticker, obs } => {
                assert_eq!(ticker, "AAPL");
                assert_eq!(obs.value, 0.42);
                assert!(obs.at_us >= before);
            }
            other => panic!("expected observation, got {other:?}"),
        }

        token.cancel();
        handle.join().unwrap();
    }

    #[test]
    fn malformed_payload_produces_no_event() {
        let port = free_port();
        let inst = Instrument::new("GOOGL", "Google Class A", port);
        let (tx, rx) = unbounded();
        let token = ShutdownToken::new();
        let handle = spawn_listener(inst, test_cfg(), tx, token.clone());

        // Consume the Listening status.
        let _ = rx.recv_timeout(Duration::from_secs(2)).unwrap();

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender
            .send_to(b"not-a-number", ("127.0.0.1", port))
            .unwrap();
        sender.send_to(b"", ("127.0.0.1", port)).unwrap();
        sender.send_to(b"1.5", ("127.0.0.1", port)).unwrap();

        // The next event must be the valid sample; the garbage vanished.
        let ev = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match ev {
            FeedEvent::Observation { ticker, obs } => {
                assert_eq!(ticker, "GOOGL");
                assert_eq!(obs.value, 1.5);
            }
            other => panic!("expected observation, got {other:?}"),
        }

        token.cancel();
        handle.join().unwrap();
    }

    #[test]
    fn bind_conflict_reports_single_failure() {
        // Hold the port so the listener cannot bind it.
        let occupant = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = occupant.local_addr().unwrap().port();

        let inst = Instrument::new("PLTR", "Palantir Technologies", port);
        let (tx, rx) = unbounded();
        let token = ShutdownToken::new();
        let handle = spawn_listener(inst, test_cfg(), tx, token);

        let ev = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        match ev {
            FeedEvent::Status { ticker, state } => {
                assert_eq!(ticker, "PLTR");
                assert!(state.is_failed());
            }
            other => panic!("expected failed status, got {other:?}"),
        }

        // Thread terminated; channel drained and now disconnected.
        handle.join().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn cancellation_stops_listener_within_timeout() {
        let port = free_port();
        let inst = Instrument::new("AAPL", "Apple", port);
        let (tx, rx) = unbounded();
        let token = ShutdownToken::new();
        let handle = spawn_listener(inst, test_cfg(), tx, token.clone());

        // Wait for the bind so the listener is inside its receive loop.
        let _ = rx.recv_timeout(Duration::from_secs(2)).unwrap();

        let started = std::time::Instant::now();
        token.cancel();
        handle.join().unwrap();
        // One 50 ms timeout interval, with generous scheduling slack.
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
