//! Pure listing logic: filtering, ordering and breadcrumbs.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::ClientError;
use crate::types::FileEntry;
use crate::view::Crumb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Name,
    Size,
    Modified,
}

impl SortColumn {
    /// Names read A to Z first; sizes and dates show the largest or newest first.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortColumn::Name => SortDirection::Ascending,
            SortColumn::Size | SortColumn::Modified => SortDirection::Descending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Size => "Size",
            SortColumn::Modified => "Modified",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortColumn::Name),
            "size" => Ok(SortColumn::Size),
            "date" | "modified" | "time" => Ok(SortColumn::Modified),
            other => Err(ClientError::validation("sort", format!("Unknown sort column: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self { column: SortColumn::Name, direction: SortDirection::Ascending }
    }
}

impl SortState {
    /// Clicking the active column flips it; another column starts at its default.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = column.default_direction();
        }
    }
}

/// File-manager state, owned by one [`FileManager`](super::FileManager).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Directory of the last successful listing, relative to the backend root.
    pub current_path: String,
    /// Entries of that listing, unfiltered and in backend order.
    pub entries: Vec<FileEntry>,
    pub sort: SortState,
    pub search: String,
    pub loading: bool,
}

fn compare(a: &FileEntry, b: &FileEntry, sort: SortState) -> Ordering {
    // Directories first whatever the column or direction
    match (a.is_directory, b.is_directory) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let ord = match sort.column {
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.name.cmp(&b.name)),
        SortColumn::Size => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
        SortColumn::Modified => a.modified.unwrap_or(0).cmp(&b.modified.unwrap_or(0)),
    };
    match sort.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// What the list shows: case-insensitive name filter, then a stable sort with
/// directories first.
pub fn visible_entries(entries: &[FileEntry], search: &str, sort: SortState) -> Vec<FileEntry> {
    let needle = search.trim().to_lowercase();
    let mut visible: Vec<FileEntry> =
        entries.iter().filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle)).cloned().collect();
    visible.sort_by(|a, b| compare(a, b, sort));
    visible
}

/// Root plus one crumb per path segment, each pointing at its cumulative path.
pub fn breadcrumb(path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb { label: "Root".to_string(), path: String::new() }];
    let mut cumulative = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !cumulative.is_empty() {
            cumulative.push('/');
        }
        cumulative.push_str(segment);
        crumbs.push(Crumb { label: segment.to_string(), path: cumulative.clone() });
    }
    crumbs
}

pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Last segment of a path.
pub fn file_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

pub fn is_image(name: &str) -> bool {
    let lower = name.to_lowercase();
    [".webp", ".jpg", ".jpeg", ".png"].iter().any(|ext| lower.ends_with(ext))
}
