use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use gelf_log_sink::config::CollectorConfig;
use gelf_log_sink::console::ConsoleSink;
use gelf_log_sink::dispatcher::Dispatcher;
use gelf_log_sink::error::SinkError;
use gelf_log_sink::gelf::{TcpSink, UdpSink};
use gelf_log_sink::init::make_dispatcher;
use gelf_log_sink::sink::LogSink;
use gelf_log_sink::{Level, LogRecordFields, Logger};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, UdpSocket};
use tokio::time::Duration;

#[derive(Default)]
struct MemoryConsole {
    lines: Mutex<Vec<(Level, String)>>,
}

impl ConsoleSink for MemoryConsole {
    fn emit(&self, level: Level, line: &str) {
        self.lines.lock().unwrap().push((level, line.to_string()));
    }
}

struct SlowSink(Duration);

#[async_trait]
impl LogSink for SlowSink {
    fn name(&self) -> &str {
        "slow"
    }

    async fn send(&self, _payload: &[u8]) -> Result<(), SinkError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

struct UnresolvableSink;

#[async_trait]
impl LogSink for UnresolvableSink {
    fn name(&self) -> &str {
        "udp"
    }

    async fn send(&self, _payload: &[u8]) -> Result<(), SinkError> {
        Err(SinkError::NoAddress("collector.invalid:12201".to_string()))
    }
}

async fn read_one_line(listener: TcpListener) -> Vec<u8> {
    let (mut conn, _) = listener.accept().await.unwrap();
    let mut received = Vec::new();
    conn.read_to_end(&mut received).await.unwrap();
    received
}

#[tokio::test]
async fn test_record_reaches_udp_and_tcp_collectors() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let udp_collector = UdpSocket::bind(("127.0.0.1", port)).await.unwrap();
    let tcp_reader = tokio::spawn(read_one_line(listener));

    let console = Arc::new(MemoryConsole::default());
    let logger = Logger::new("payments-api")
        .with_console(console.clone())
        .with_dispatcher(make_dispatcher(&CollectorConfig::new("127.0.0.1", port)));
    let stats = logger.dispatch_stats().unwrap();

    let fields = LogRecordFields {
        bank_code: Some("HDFC".to_string()),
        rrn: Some("123456789012".to_string()),
        ..Default::default()
    };
    logger.log("ERROR", "upstream declined", fields);
    logger.shutdown().await;

    let mut buf = [0u8; 4096];
    let (n, _) = udp_collector.recv_from(&mut buf).await.unwrap();
    let datagram = buf[..n].to_vec();
    let stream = tcp_reader.await.unwrap();

    assert_eq!(stream, [datagram.as_slice(), b"\n".as_slice()].concat());
    assert!(!datagram.ends_with(b"\n"));

    let json: Value = serde_json::from_slice(&datagram).unwrap();
    assert_eq!(json["level"], "ERROR");
    assert_eq!(json["message"], "u****d");
    assert_eq!(json["appname"], "payments-api");
    assert_eq!(json["bank_code"], "HDFC");
    assert_eq!(json["rrn"], "123456789012");
    assert!(json.get("hostname").is_none());

    let lines = console.lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, Level::Error);
    assert_eq!(lines[0].1.as_bytes(), datagram.as_slice());

    let snap = stats.snapshot();
    assert_eq!(snap.delivered, 2);
    assert_eq!(snap.failed, 0);
}

#[tokio::test]
async fn test_udp_failure_does_not_block_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let tcp_reader = tokio::spawn(read_one_line(listener));

    let sinks: Vec<Arc<dyn LogSink>> = vec![
        Arc::new(UnresolvableSink),
        Arc::new(TcpSink::new("127.0.0.1", port)),
    ];
    let dispatcher = Dispatcher::new(sinks, 16, Duration::from_secs(2));
    let logger = Logger::new("svc")
        .with_console(Arc::new(MemoryConsole::default()))
        .with_dispatcher(dispatcher);
    let stats = logger.dispatch_stats().unwrap();

    logger.info("hello", LogRecordFields::default());
    logger.shutdown().await;

    let stream = tcp_reader.await.unwrap();
    assert!(stream.ends_with(b"\"}\n"));

    let snap = stats.snapshot();
    assert_eq!(snap.failed, 1);
    assert_eq!(snap.delivered, 1);
}

#[tokio::test]
async fn test_tcp_failure_is_reported_independently() {
    let udp_collector = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = udp_collector.local_addr().unwrap().port();

    // Nothing listens on this TCP port.
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_port = closed.local_addr().unwrap().port();
    drop(closed);

    let sinks: Vec<Arc<dyn LogSink>> = vec![
        Arc::new(UdpSink::new("127.0.0.1", port)),
        Arc::new(TcpSink::new("127.0.0.1", dead_port)),
    ];
    let dispatcher = Dispatcher::new(sinks, 16, Duration::from_secs(2));
    let stats = dispatcher.stats();
    dispatcher.forward(br#"{"message":"h****o"}"#.to_vec());
    dispatcher.close().await;

    let mut buf = [0u8; 1024];
    let (n, _) = udp_collector.recv_from(&mut buf).await.unwrap();
    assert_eq!(&buf[..n], br#"{"message":"h****o"}"#);

    let snap = stats.snapshot();
    assert_eq!(snap.delivered, 1);
    assert_eq!(snap.failed, 1);
}

#[tokio::test]
async fn test_log_returns_before_forwarding_completes() {
    let dispatcher = Dispatcher::new(
        vec![Arc::new(SlowSink(Duration::from_millis(500))) as Arc<dyn LogSink>],
        64,
        Duration::from_secs(5),
    );
    let logger = Logger::new("svc")
        .with_console(Arc::new(MemoryConsole::default()))
        .with_dispatcher(dispatcher);
    let stats = logger.dispatch_stats().unwrap();

    let start = Instant::now();
    for _ in 0..10 {
        logger.log("INFO", "payload", LogRecordFields::default());
    }
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_millis(200), "log calls took {:?}", elapsed);
    assert_eq!(stats.snapshot().delivered, 0);
    assert_eq!(stats.snapshot().enqueued, 10);
}

#[tokio::test]
async fn test_console_only_logger_never_forwards() {
    let console = Arc::new(MemoryConsole::default());
    let logger = Logger::new("svc").with_console(console.clone());

    logger.log("DEBUG", "ab", LogRecordFields::default());
    logger.shutdown().await;

    let lines = console.lines.lock().unwrap();
    let json: Value = serde_json::from_str(&lines[0].1).unwrap();
    assert_eq!(lines[0].0, Level::Debug);
    assert_eq!(json["message"], "****");
}
