//! Parser for the one-line-per-interface output of `ip -s -o link`.
//!
//! Each line holds one interface, with the multi-line human layout folded into
//! backslash-separated segments:
//!
//! ```text
//! 2: eth0@if7: <BROADCAST,...> mtu 1500 ...\    link/ether ...\    RX: bytes  packets  errors  dropped overrun mcast   \    1296       16       0       0       0       0       \    TX: bytes  packets  errors  dropped carrier collsns \    656        8        0       0       0       0
//! ```
//!
//! Segment 0 names the interface, segment 3 holds the receive counters and
//! segment 5 the transmit counters.

use std::sync::LazyLock;

use regex::Regex;

use crate::metric::MetricRecord;

/// Record prefix for network counters.
pub const NETWORK_PREFIX: &str = "network";

/// Interface header: `<index>: <name>` terminated by `:` or `@`.
pub const INTERFACE_PATTERN: &str = r"^\d+: ([^:@]+)[:@].*$";

const SEGMENT_SEPARATOR: char = '\\';
const MIN_SEGMENTS: usize = 6;
const RX_SEGMENT: usize = 3;
const TX_SEGMENT: usize = 5;

/// Counter names, in the column order of both the RX and the TX segment.
pub const COUNTER_FIELDS: [&str; 6] = ["bytes", "packets", "errors", "dropped", "overrun", "mcast"];
const PACKETS: usize = 1;

static INTERFACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(INTERFACE_PATTERN).unwrap_or_else(|err| panic!("invalid interface pattern: {err}"))
});

/// Counters of a single interface as found in one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats<'a> {
    pub interface: &'a str,
    pub rx: Option<[&'a str; 6]>,
    pub tx: Option<[&'a str; 6]>,
}

/// Parses one output line.
///
/// Returns `None` if the line has fewer than six segments or no recognisable
/// interface header. A direction whose segment does not hold exactly six
/// fields is `None`.
pub fn parse_link_line(line: &str) -> Option<LinkStats<'_>> {
    let segments: Vec<&str> = line.split(SEGMENT_SEPARATOR).collect();
    if segments.len() < MIN_SEGMENTS {
        return None;
    }

    let interface = INTERFACE.captures(segments[0])?.get(1)?.as_str();

    Some(LinkStats {
        interface,
        rx: counters(segments[RX_SEGMENT]),
        tx: counters(segments[TX_SEGMENT]),
    })
}

/// Parses the complete query output into `network.<iface>.{rx,tx}.<field>` records.
///
/// A direction is only emitted if its packet counter is non-zero; idle
/// interfaces produce no records.
pub fn parse_link_stats(output: &str) -> Vec<MetricRecord> {
    let mut records = Vec::new();
    for line in output.lines() {
        let Some(stats) = parse_link_line(line) else {
            if !line.trim().is_empty() {
                log::debug!(target: "netns", "skipping link line: {}", line);
            }
            continue;
        };
        let prefix = format!("{NETWORK_PREFIX}.{}", stats.interface);
        push_direction(&mut records, &prefix, "rx", stats.rx);
        push_direction(&mut records, &prefix, "tx", stats.tx);
    }
    records
}

fn counters(segment: &str) -> Option<[&str; 6]> {
    let mut fields = segment.split_whitespace();
    let values = [
        fields.next()?,
        fields.next()?,
        fields.next()?,
        fields.next()?,
        fields.next()?,
        fields.next()?,
    ];
    if fields.next().is_some() {
        return None;
    }
    Some(values)
}

fn push_direction(
    records: &mut Vec<MetricRecord>,
    prefix: &str,
    direction: &str,
    values: Option<[&str; 6]>,
) {
    let Some(values) = values else {
        return;
    };
    if values[PACKETS].parse::<u64>().unwrap_or(0) == 0 {
        return;
    }
    for (field, value) in COUNTER_FIELDS.iter().zip(values) {
        records.push(MetricRecord::new(
            format!("{prefix}.{direction}.{field}"),
            value,
        ));
    }
}
