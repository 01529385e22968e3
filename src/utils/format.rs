//! Human-readable number formatting for console output

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a nanosecond duration with the largest unit that keeps it readable
/// Examples: 950 ns, 12.35 us, 4.20 ms, 1.50 s
pub fn format_ns(ns: u64) -> String {
    match ns {
        0..=999 => format!("{} ns", ns),
        1_000..=999_999 => format!("{:.2} us", ns as f64 / 1_000.0),
        1_000_000..=999_999_999 => format!("{:.2} ms", ns as f64 / 1_000_000.0),
        _ => format!("{:.2} s", ns as f64 / 1_000_000_000.0),
    }
}
