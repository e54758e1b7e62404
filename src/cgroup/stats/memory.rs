//! Parsing of the cgroup v1 `memory.stat` file.
//!
//! Every `key value` line becomes a `memory.<key>` record. The kernel reports
//! both per-cgroup (`cache`, `rss`, ...) and hierarchical (`total_cache`,
//! `total_rss`, ...) counters; all of them are forwarded.

use crate::metric::MetricRecord;

use super::{LineStat, StatParseError, key_value_record};

/// Record prefix for memory accounting.
pub const MEMORY_PREFIX: &str = "memory";

/// Parser for `memory.stat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStat;

impl LineStat for MemoryStat {
    fn parse_line(
        &self,
        line: &str,
        lineno: usize,
    ) -> Result<Option<MetricRecord>, StatParseError> {
        key_value_record(MEMORY_PREFIX, line, lineno)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
cache 11492564992
rss 1930993664
rss_huge 0
shmem 0
mapped_file 306728960
dirty 131072
writeback 0
pgpgin 406632648
pgpgout 403355412
pgfault 728281223
pgmajfault 1724
hierarchical_memory_limit 9223372036854771712
total_cache 11492564992
total_rss 1930993664
";

    #[test]
    fn test_parse_memory_stat() {
        let records = MemoryStat.from_reader(&mut SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 14);
        assert_eq!(records[0], MetricRecord::new("memory.cache", "11492564992"));
        assert_eq!(
            records[11],
            MetricRecord::new("memory.hierarchical_memory_limit", "9223372036854771712")
        );
        assert!(records.iter().all(|r| r.name().starts_with("memory.")));
    }

    #[test]
    fn test_memory_stat_keeps_value_text() {
        let records = MemoryStat
            .from_reader(&mut "odd_key 12 kB\n".as_bytes())
            .unwrap();
        assert_eq!(records, vec![MetricRecord::new("memory.odd_key", "12 kB")]);
    }
}
