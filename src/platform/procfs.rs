//! Parsers for the Linux `/proc` and sysfs text formats.
//!
//! Kept free of file access so they can be exercised on any host.

use crate::cpu::CoreTicks;
use crate::error::{Error, Result};
use crate::memory::VmStatistics;

/// `/proc/meminfo` reports kB; each kB is treated as one 1024-byte page.
pub const MEMINFO_PAGE_SIZE: u64 = 1024;

/// Parses the per-core `cpuN` lines of `/proc/stat`.
///
/// The aggregate `cpu` line is skipped. `iowait`, when present, is counted as idle time.
pub fn parse_proc_stat(content: &str) -> Result<Vec<CoreTicks>> {
    let mut cores = Vec::new();

    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else { continue };
        let is_core = label.strip_prefix("cpu").is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        if !is_core {
            continue;
        }

        let values = fields
            .take(5)
            .map(|v| v.parse::<u64>().map_err(|_| Error::invalid_data(format!("bad tick count in {:?}", line))))
            .collect::<Result<Vec<_>>>()?;
        let [user, nice, system, idle, rest @ ..] = values.as_slice() else {
            return Err(Error::invalid_data(format!("too few fields in {:?}", line)));
        };
        let iowait = rest.first().copied().unwrap_or(0);

        cores.push(CoreTicks::new(*user, *system, *nice, idle.saturating_add(iowait)));
    }

    if cores.is_empty() {
        return Err(Error::invalid_data("no cpuN lines in /proc/stat"));
    }
    Ok(cores)
}

/// Parses `/proc/meminfo` into page statistics and physical memory bytes.
///
/// `Unevictable` stands in for wired memory and `Zswap` for compressed memory. The active count is whatever remains
/// of `MemTotal - MemAvailable`, so that used memory matches what `free` reports. Kernels without `MemAvailable`
/// fall back to the `Active` field, which includes active page cache.
pub fn parse_meminfo(content: &str) -> Result<(VmStatistics, u64)> {
    let field = |key: &str| -> Option<u64> {
        content.lines().find_map(|line| {
            let (name, rest) = line.split_once(':')?;
            if name.trim() != key {
                return None;
            }
            rest.split_whitespace().next()?.parse().ok()
        })
    };
    let required = |key: &str| field(key).ok_or_else(|| Error::invalid_data(format!("{} missing from /proc/meminfo", key)));

    let total_kb = required("MemTotal")?;
    let wired = field("Unevictable").unwrap_or(0);
    let compressed = field("Zswap").unwrap_or(0);
    let active = match field("MemAvailable") {
        Some(available) => total_kb.saturating_sub(available).saturating_sub(wired).saturating_sub(compressed),
        None => required("Active")?,
    };
    let stats = VmStatistics {
        free: required("MemFree")?,
        active,
        inactive: required("Inactive")?,
        wired,
        compressed,
        page_size: MEMINFO_PAGE_SIZE,
    };

    Ok((stats, total_kb.saturating_mul(MEMINFO_PAGE_SIZE)))
}

/// Parses a single numeric sysfs attribute such as `gpu_busy_percent` or `capacity`.
pub fn parse_number<T: std::str::FromStr>(content: &str) -> Result<T> {
    let trimmed = content.trim();
    trimmed.parse().map_err(|_| Error::invalid_data(format!("not a number: {:?}", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROC_STAT: &str = "\
cpu  4705 356 584 3699 23 0 21 0 0 0
cpu0 1393 280 290 1000 10 0 11 0 0 0
cpu1 3312 76 294 2699 13 0 10 0 0 0
intr 114930548 113199788 3 0 5 263 0 4 [... lots more numbers ...]
ctxt 1990473
btime 1062191376
";

    const MEMINFO: &str = "\
MemTotal:       16311304 kB
MemFree:         1234567 kB
MemAvailable:    9876543 kB
Active:          4000000 kB
Inactive:        3000000 kB
Unevictable:       12345 kB
Zswap:              2048 kB
";

    #[test]
    fn test_parse_proc_stat_skips_aggregate() {
        let cores = parse_proc_stat(PROC_STAT).unwrap();
        assert_eq!(cores.len(), 2);
        assert_eq!(cores[0], CoreTicks::new(1393, 290, 280, 1010));
        assert_eq!(cores[1].in_use(), 3312 + 76 + 294);
    }

    #[test]
    fn test_parse_proc_stat_without_iowait() {
        let cores = parse_proc_stat("cpu0 10 20 30 40\n").unwrap();
        assert_eq!(cores, vec![CoreTicks::new(10, 30, 20, 40)]);
    }

    #[test]
    fn test_parse_proc_stat_rejects_garbage() {
        assert!(parse_proc_stat("").is_err());
        assert!(parse_proc_stat("cpu0 1 2\n").is_err());
        assert!(parse_proc_stat("cpu0 a b c d\n").is_err());
    }

    #[test]
    fn test_parse_meminfo() {
        let (stats, physical) = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(physical, 16311304 * 1024);
        assert_eq!(stats.active, 16311304 - 9876543 - 12345 - 2048);
        assert_eq!(stats.wired, 12345);
        assert_eq!(stats.compressed, 2048);
        assert_eq!(stats.page_size, 1024);
        assert_eq!(stats.used_bytes(), (16311304 - 9876543) * 1024);
    }

    #[test]
    fn test_parse_meminfo_used_excludes_reclaimable_cache() {
        // 6 GiB of Active is page cache the kernel can drop; MemAvailable already counts it as available
        let content = "\
MemTotal:       16000000 kB
MemFree:         1000000 kB
MemAvailable:   12000000 kB
Active:          8000000 kB
Inactive:        5000000 kB
";
        let (stats, physical) = parse_meminfo(content).unwrap();
        assert_eq!(stats.used_bytes(), 4000000 * 1024);
        assert!(stats.used_bytes() < physical);
    }

    #[test]
    fn test_parse_meminfo_optional_fields() {
        let content = "MemTotal: 100 kB\nMemFree: 10 kB\nActive: 20 kB\nInactive: 30 kB\n";
        let (stats, _) = parse_meminfo(content).unwrap();
        assert_eq!(stats.wired, 0);
        assert_eq!(stats.compressed, 0);
        // No MemAvailable: Active is used as is
        assert_eq!(stats.active, 20);

        assert!(parse_meminfo("MemFree: 10 kB\n").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<f64>("37\n").unwrap(), 37.0);
        assert_eq!(parse_number::<i64>(" 88 ").unwrap(), 88);
        assert!(parse_number::<i64>("full").is_err());
    }
}
