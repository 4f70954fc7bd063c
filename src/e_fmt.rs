use std::time::Duration;

/// Short elapsed time for log lines: `850ms`, `1.25s`, `2m05s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    match millis {
        0..=999 => format!("{}ms", millis),
        1_000..=59_999 => format!("{:.2}s", elapsed.as_secs_f64()),
        _ => format!("{}m{:02}s", millis / 60_000, (millis % 60_000) / 1_000),
    }
}

/// "1 problem", "3 problems".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
