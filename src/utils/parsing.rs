//! String parsing utilities

/// Extract value after a colon and space
pub fn extract_after_colon(line: &str) -> Option<String> {
    line.split(':')
        .nth(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a meminfo value such as `16318572 kB` into kB
pub fn parse_kb(value: &str) -> Option<u64> {
    value.trim().trim_end_matches("kB").trim().parse().ok()
}

/// Pull `(MemTotal, MemAvailable)` in kB out of `/proc/meminfo` text
pub fn parse_meminfo(meminfo: &str) -> Option<(u64, u64)> {
    let mut total = None;
    let mut available = None;

    for line in meminfo.lines() {
        if total.is_none() && line.starts_with("MemTotal") {
            total = extract_after_colon(line).as_deref().and_then(parse_kb);
        } else if available.is_none() && line.starts_with("MemAvailable") {
            available = extract_after_colon(line).as_deref().and_then(parse_kb);
        }

        if total.is_some() && available.is_some() {
            break;
        }
    }

    Some((total?, available?))
}

/// Convert kB to GiB
pub fn kb_to_gb(kb: u64) -> f64 {
    kb as f64 / 1_048_576.0 // 1024^2
}

/// Format memory usage as `used/totalG`
pub fn format_memory(total_kb: u64, available_kb: u64) -> String {
    let used_kb = total_kb.saturating_sub(available_kb);
    format!("{:.1}/{:.1}G", kb_to_gb(used_kb), kb_to_gb(total_kb))
}

/// Fallback code for a governor name that is not recognised
pub const UNKNOWN_GOVERNOR: &str = "unk";

/// Map a cpufreq governor name to its one-letter code
pub fn governor_code(raw: &str) -> &'static str {
    match raw.trim_end_matches('\n') {
        "performance" => "P",
        "powersave" => "S",
        "schedutil" => "U",
        "ondemand" => "O",
        "conservative" => "C",
        "userspace" => "X",
        _ => UNKNOWN_GOVERNOR,
    }
}
