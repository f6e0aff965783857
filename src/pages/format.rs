use chrono::{DateTime, Local, TimeZone};

/// Play time given in seconds: `0h`, `45m`, `3h`, `3h 12m`.
pub fn play_time(seconds: u64) -> String {
    if seconds == 0 {
        return "0h".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Uptime given in milliseconds, showing the two largest units.
pub fn uptime(millis: u64) -> String {
    let seconds = millis / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

// Binary units, at most two decimals, trailing zeros dropped.
pub fn file_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "0 B".to_string(),
    };
    let units = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut i = 0usize;
    while value >= 1024.0 && i < units.len() - 1 {
        value /= 1024.0;
        i += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, units[i])
}

/// Modification time (epoch milliseconds) in local time, `dd/mm/YYYY, HH:MM`.
pub fn file_date(millis: Option<i64>) -> String {
    match millis.and_then(DateTime::from_timestamp_millis) {
        Some(utc) => date_in(&utc.with_timezone(&Local)),
        None => "-".to_string(),
    }
}

pub(crate) fn date_in<Tz: TimeZone>(when: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    when.format("%d/%m/%Y, %H:%M").to_string()
}

/// Turns `max-players` or `doMobSpawning` into `Max Players` / `Do Mob Spawning`.
pub fn humanize_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 8);
    for ch in key.chars() {
        if ch == '-' || ch == '_' {
            spaced.push(' ');
        } else {
            if ch.is_ascii_uppercase() {
                spaced.push(' ');
            }
            spaced.push(ch);
        }
    }
    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn enabled(value: bool) -> &'static str {
    if value {
        "Enabled"
    } else {
        "Disabled"
    }
}
