use gelf_log_sink::config::{CollectorConfig, LoggerConfig};
use gelf_log_sink::init::init_logger;
use gelf_log_sink::LogRecordFields;

/// Forward records to a Graylog GELF input. Point it somewhere real with
/// `GELF_COLLECTOR_URL=gelf://graylog.internal:12201`.
#[tokio::main]
async fn main() {
    let collector = CollectorConfig::from_env().unwrap_or_else(|e| {
        eprintln!("falling back to default collector: {}", e);
        CollectorConfig::default()
    });

    let config = LoggerConfig {
        application_name: "collector-example".to_string(),
        collector: Some(collector),
        ..Default::default()
    };
    let logger = init_logger(config).expect("init logger");

    logger.log("INFO", "service started", LogRecordFields::default());
    logger.log(
        "ERROR",
        "payment declined by issuer",
        LogRecordFields {
            transaction_id: Some("TXN-20261016-0001".to_string()),
            bank_code: Some("HDFC".to_string()),
            channel: Some("UPI".to_string()),
            ..Default::default()
        },
    );

    logger.shutdown().await;
}
