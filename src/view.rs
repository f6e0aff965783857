//! Render models handed to a [`Surface`](crate::surface::Surface).
//!
//! Every loader builds one of these from scratch on each refresh and replaces
//! the whole target with it; there is no diffing.

use std::fmt;

use crate::command::Command;
use crate::modal::DialogSnapshot;

/// A fixed render target on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Status,
    Sidebar,
    Players,
    PlayerInventory,
    Whitelist,
    Blacklist,
    Ops,
    Plugins,
    ServerInfo,
    Worlds,
    Console,
    Chat,
    Properties,
    GameRules,
    Recipes,
    RecipeForm,
    Logs,
    FileToolbar,
    FileBreadcrumb,
    FileList,
    FileEditor,
    ImageViewer,
    ContextMenu,
    ChangeLog,
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    Monospace,
    Badge(Tone),
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
    /// Optional image shown in front of the text (player heads).
    pub image: Option<String>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: CellStyle::Plain, image: None }
    }

    pub fn mono(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: CellStyle::Monospace, image: None }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), style: CellStyle::Badge(tone), image: None }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

/// A clickable button bound to a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub label: String,
    pub tone: Tone,
    pub command: Command,
}

impl Action {
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self { label: label.into(), tone: Tone::Neutral, command }
    }

    pub fn danger(label: impl Into<String>, command: Command) -> Self {
        Self { label: label.into(), tone: Tone::Danger, command }
    }

    pub fn warning(label: impl Into<String>, command: Command) -> Self {
        Self { label: label.into(), tone: Tone::Warning, command }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Stable identity of the row (uuid, path, id).
    pub key: String,
    pub cells: Vec<Cell>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Shown instead of rows when the table is empty.
    pub empty_text: String,
}

impl Table {
    pub fn new(columns: &[&str], empty_text: impl Into<String>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            empty_text: empty_text.into(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, cells: Vec<Cell>, actions: Vec<Action>) {
        self.rows.push(Row { key: key.into(), cells, actions });
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub highlight: bool,
}

/// A titled block of label/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub image: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), image: None, fields: Vec::new() }
    }

    pub fn field(mut self, label: &str, value: impl fmt::Display) -> Self {
        self.fields.push((label.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.iter().find(|(l, _)| l == label).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Toggle(bool),
    Number(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub input: InputKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
    pub title: String,
    pub fields: Vec<FormField>,
}

/// One clickable breadcrumb segment; clicking browses to `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub path: String,
    pub title: String,
    pub content: String,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub x: i32,
    pub y: i32,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Empty,
    Message(String),
    Table(Table),
    Lines(Vec<Line>),
    Cards(Vec<Card>),
    Form(Vec<FormSection>),
    Breadcrumb(Vec<Crumb>),
    Toolbar(Vec<Action>),
    Editor(EditorView),
    Image(String),
    Menu(MenuView),
    Dialog(DialogSnapshot),
}

impl View {
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            View::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_lines(&self) -> Option<&[Line]> {
        match self {
            View::Lines(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_cards(&self) -> Option<&[Card]> {
        match self {
            View::Cards(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_breadcrumb(&self) -> Option<&[Crumb]> {
        match self {
            View::Breadcrumb(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Empty => Ok(()),
            View::Message(m) => writeln!(f, "{}", m),
            View::Table(t) => {
                writeln!(f, "{}", t.columns.join(" | "))?;
                if t.rows.is_empty() {
                    return writeln!(f, "  {}", t.empty_text);
                }
                for row in &t.rows {
                    let cells: Vec<&str> = row.cells.iter().map(|c| c.text.as_str()).collect();
                    let actions: Vec<&str> = row.actions.iter().map(|a| a.label.as_str()).collect();
                    if actions.is_empty() {
                        writeln!(f, "  {}", cells.join(" | "))?;
                    } else {
                        writeln!(f, "  {} | [{}]", cells.join(" | "), actions.join("] ["))?;
                    }
                }
                Ok(())
            }
            View::Lines(lines) => {
                for line in lines {
                    let mark = if line.highlight { ">" } else { " " };
                    writeln!(f, "{} {}", mark, line.text)?;
                }
                Ok(())
            }
            View::Cards(cards) => {
                for card in cards {
                    writeln!(f, "== {} ==", card.title)?;
                    for (label, value) in &card.fields {
                        writeln!(f, "  {}: {}", label, value)?;
                    }
                }
                Ok(())
            }
            View::Form(sections) => {
                for section in sections {
                    writeln!(f, "-- {} --", section.title)?;
                    for field in &section.fields {
                        let value = match &field.input {
                            InputKind::Toggle(b) => b.to_string(),
                            InputKind::Number(v) | InputKind::Text(v) => v.clone(),
                        };
                        writeln!(f, "  {} ({}): {}", field.label, field.key, value)?;
                    }
                }
                Ok(())
            }
            View::Breadcrumb(crumbs) => {
                let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
                writeln!(f, "{}", labels.join(" / "))
            }
            View::Toolbar(actions) => {
                let labels: Vec<&str> = actions.iter().map(|a| a.label.as_str()).collect();
                writeln!(f, "[{}]", labels.join("] ["))
            }
            View::Editor(e) => {
                writeln!(f, "{} ({} lines)", e.title, e.line_count)?;
                for (n, line) in e.content.lines().enumerate() {
                    writeln!(f, "{:>4} {}", n + 1, line)?;
                }
                Ok(())
            }
            View::Image(url) => writeln!(f, "image: {}", url),
            View::Menu(m) => {
                let labels: Vec<&str> = m.actions.iter().map(|a| a.label.as_str()).collect();
                writeln!(f, "menu @({}, {}): [{}]", m.x, m.y, labels.join("] ["))
            }
            View::Dialog(d) => {
                writeln!(f, "** {} **", d.title)?;
                writeln!(f, "{}", d.message)
            }
        }
    }
}
