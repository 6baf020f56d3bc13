//! Number formatting for sizes

/// How sizes are written. Sizes are in the scan tool's units, taken to be
/// kibibytes (`du -k`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// Plain count with thousands separators: `1,234,567`
    #[default]
    Grouped,
    /// Binary units with one decimal: `1.2 GiB`
    Human,
}

impl NumberFormat {
    pub fn toggled(self) -> Self {
        match self {
            NumberFormat::Grouped => NumberFormat::Human,
            NumberFormat::Human => NumberFormat::Grouped,
        }
    }

    pub fn format(self, size: u64) -> String {
        match self {
            NumberFormat::Grouped => format_grouped(size),
            NumberFormat::Human => format_human(size),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumberFormat::Grouped => "exact",
            NumberFormat::Human => "human",
        }
    }
}

/// Format a number with thousand separators.
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format a size in kibibytes using the largest unit that keeps it below 1024.
pub fn format_human(kib: u64) -> String {
    const UNITS: [&str; 7] = ["kiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB"];

    let mut value = kib as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} YiB", value)
}
