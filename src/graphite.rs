//! Sends metric records to Graphite using the plaintext protocol.
//!
//! Every line has the form `<path> <value> <timestamp>\n`, where the path is
//! `<prefix>.<container name>.<record name>`.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

use crate::metric::MetricRecord;

/// The records collected for one named container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMetrics {
    pub name: String,
    pub records: Vec<MetricRecord>,
}

#[derive(Debug, Clone)]
pub struct GraphiteClient {
    address: String,
    prefix: String,
}

impl GraphiteClient {
    pub fn new(host: &str, port: u16, prefix: &str) -> Self {
        Self {
            address: format!("{host}:{port}"),
            prefix: prefix.trim().trim_matches('.').to_owned(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the full metric path of `record` for the container `name`.
    pub fn metric_path(&self, name: &str, record: &MetricRecord) -> String {
        let name = name.trim();
        let record_name = record.name().trim();
        if self.prefix.is_empty() {
            format!("{name}.{record_name}")
        } else {
            format!("{}.{name}.{record_name}", self.prefix)
        }
    }

    pub fn format_line(&self, name: &str, record: &MetricRecord, timestamp: u64) -> String {
        format!(
            "{} {} {}\n",
            self.metric_path(name, record),
            record.value().trim(),
            timestamp
        )
    }

    /// Opens and immediately closes a connection to check reachability.
    pub async fn probe(&self) -> std::io::Result<()> {
        let mut stream = TcpStream::connect(&self.address).await?;
        stream.shutdown().await
    }

    /// Writes all records over a fresh connection and returns the number of lines sent.
    pub async fn send(&self, batch: &[ContainerMetrics], timestamp: u64) -> std::io::Result<usize> {
        let stream = TcpStream::connect(&self.address).await?;
        let mut writer = BufWriter::new(stream);
        let mut lines = 0;

        for metrics in batch {
            for record in &metrics.records {
                writer
                    .write_all(self.format_line(&metrics.name, record, timestamp).as_bytes())
                    .await?;
                lines += 1;
            }
        }

        writer.flush().await?;
        writer.into_inner().shutdown().await?;
        log::trace!(target: "graphite", "sent {} lines to {}", lines, self.address);

        Ok(lines)
    }
}

/// Current time in UNIX epoch seconds.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
