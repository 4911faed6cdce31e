use humansize::{format_size as humansize_format, BINARY};

/// Format bytes as kilobytes with two decimals, e.g. `1.50 KB`
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Format size in human-readable binary units
pub fn format_size(bytes: u64) -> String {
    humansize_format(bytes, BINARY)
}
