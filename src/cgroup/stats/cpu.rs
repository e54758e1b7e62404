//! Parsing of the cgroup v1 CPU accounting controller.
//!
//! - `cpuacct.stat` holds `user` and `system` time in USER_HZ ticks, one
//!   `key value` pair per line. Each line becomes a `cpu.<key>` record.
//! - `cpuacct.usage` holds the total CPU time consumed in nanoseconds and
//!   becomes the single `cpu.usage_ns` record.
//!
//! # Examples
//!
//! ```rust
//! use docker_graphite::cgroup::stats::{CpuStat, CpuUsage, LineStat, SingleLineStat};
//!
//! let records = CpuStat.from_reader(&mut "user 5306\nsystem 2417\n".as_bytes()).unwrap();
//! assert_eq!(records[0].name(), "cpu.user");
//!
//! let usage = CpuUsage::from_reader(&mut "84302128334\n".as_bytes()).unwrap().unwrap();
//! assert_eq!(usage.name(), "cpu.usage_ns");
//! assert_eq!(usage.value(), "84302128334");
//! ```

use crate::metric::MetricRecord;

use super::{LineStat, SingleLineStat, StatParseError, key_value_record};

/// Record prefix for CPU accounting.
pub const CPU_PREFIX: &str = "cpu";

/// Parser for `cpuacct.stat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuStat;

impl LineStat for CpuStat {
    fn parse_line(
        &self,
        line: &str,
        lineno: usize,
    ) -> Result<Option<MetricRecord>, StatParseError> {
        key_value_record(CPU_PREFIX, line, lineno)
    }
}

/// Parser for `cpuacct.usage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuUsage;

impl SingleLineStat for CpuUsage {
    const NAME: &'static str = "cpu.usage_ns";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpuacct_stat() {
        let data = "user 5306\nsystem 2417\n";
        let records = CpuStat.from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                MetricRecord::new("cpu.user", "5306"),
                MetricRecord::new("cpu.system", "2417"),
            ]
        );
    }

    #[test]
    fn test_parse_cpuacct_usage_trims_newline() {
        let record = CpuUsage::from_reader(&mut "123456789\n".as_bytes())
            .unwrap()
            .unwrap();
        assert_eq!(record, MetricRecord::new("cpu.usage_ns", "123456789"));
    }

    #[test]
    fn test_parse_empty_cpuacct_usage() {
        assert!(CpuUsage::from_reader(&mut "".as_bytes()).unwrap().is_none());
        assert!(CpuUsage::from_reader(&mut "\n".as_bytes()).unwrap().is_none());
    }
}
