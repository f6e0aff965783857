use crate::surface::Viewport;
use crate::types::FileEntry;

use super::listing::is_image;

pub const MENU_WIDTH: i32 = 150;
pub const MENU_HEIGHT: i32 = 200;
const MARGIN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Edit,
    OpenPicture,
    Download,
    Rename,
    Delete,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Edit => "Edit",
            MenuItem::OpenPicture => "Open Picture",
            MenuItem::Download => "Download",
            MenuItem::Rename => "Rename",
            MenuItem::Delete => "Delete",
        }
    }
}

/// Entries offered for one row. Directories only get rename and delete.
pub fn menu_items(entry: &FileEntry) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(5);
    if !entry.is_directory {
        if entry.editable {
            items.push(MenuItem::Edit);
        }
        if is_image(&entry.name) {
            items.push(MenuItem::OpenPicture);
        }
        items.push(MenuItem::Download);
    }
    items.push(MenuItem::Rename);
    items.push(MenuItem::Delete);
    items
}

/// Moves the menu back inside the viewport when it would overflow.
pub fn clamp_position(x: i32, y: i32, viewport: Viewport) -> (i32, i32) {
    let mut x = x;
    let mut y = y;
    if x + MENU_WIDTH > viewport.width {
        x = viewport.width - MENU_WIDTH - MARGIN;
    }
    if y + MENU_HEIGHT > viewport.height {
        y = viewport.height - MENU_HEIGHT - MARGIN;
    }
    (x.max(0), y.max(0))
}
