use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeZone};

/// Local record of file operations, newest first.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ChangeLog {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity.min(64)), capacity: capacity.max(1) }
    }

    pub fn record(&mut self, action: &str) {
        self.record_at(action, &Local::now());
    }

    pub fn record_at<Tz: TimeZone>(&mut self, action: &str, when: &DateTime<Tz>)
    where
        Tz::Offset: std::fmt::Display,
    {
        self.entries.push_front(format!("[{}] {}", when.format("%d/%m/%Y %H:%M"), action));
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
