//! Line-oriented front end used by the binary.
//!
//! Each input line is tokenised and parsed with clap into a [`ShellLine`]; the
//! subcommand is then turned into a dashboard [`Command`]. Free-text commands
//! (`cmd`, `say`, `who`, `grep`, `find`) take the rest of the raw line so that
//! spacing inside the text survives.

use std::error::Error as _;
use std::path::PathBuf;
use std::str::FromStr;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde_json::Value as JsonValue;

use crate::command::Command;
use crate::error::{ClientError, ClientResult};
use crate::filemanager::{MenuItem, SortColumn};
use crate::modal::{DialogHost, DialogKey, DialogKind};
use crate::pages::settings::setting_value;
use crate::router::PageId;
use crate::types::{AccessListKind, PlayerAction, RecipeDraft, RecipeResult};

const SHELL_AFTER_HELP: &str = "\
Dialogs: answer y/n for confirmations, type text for prompts, 'esc' cancels";

/// One line typed at the dashboard prompt.
#[derive(Parser, Debug)]
#[command(
    name = "mccontrol",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    color = clap::ColorChoice::Never,
    help_template = "Commands:\n{subcommands}\n{after-help}",
    after_help = SHELL_AFTER_HELP
)]
pub struct ShellLine {
    #[command(subcommand)]
    verb: Verb,
}

#[derive(Args, Debug)]
struct PlayerArgs {
    /// Player UUID
    uuid: String,
    /// Display name used in confirmations (defaults to the UUID)
    name: Option<String>,
}

#[derive(Args, Debug)]
struct AccessArgs {
    /// Player name
    name: String,
    /// Player UUID; looked up by name when omitted
    uuid: Option<String>,
}

#[derive(Args, Debug)]
struct FreeText {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TEXT")]
    words: Vec<String>,
}

#[derive(Args, Debug)]
struct Pairs {
    #[arg(required = true, value_name = "KEY=VALUE", value_parser = key_value)]
    pairs: Vec<(String, JsonValue)>,
}

#[derive(Subcommand, Debug)]
enum Verb {
    /// Switch to a page (status, players, whitelist, ..., files)
    Page {
        #[arg(value_parser = PageId::from_str)]
        page: PageId,
    },

    /// Filter the player table by name or UUID
    Who(FreeText),
    /// Show a player's inventory
    Inv(PlayerArgs),
    /// Kick an online player
    Kick(PlayerArgs),
    /// Ban a player
    Ban(PlayerArgs),
    /// Lift a ban
    Unban(PlayerArgs),
    /// Give a player operator status
    Op(PlayerArgs),
    /// Take operator status away
    Deop(PlayerArgs),

    /// Add a player to the whitelist
    Allow(AccessArgs),
    /// Add a player to the blacklist
    Deny(AccessArgs),
    /// Add a player to the operator list
    Opadd(AccessArgs),
    /// Remove a player from an access list
    Unlist {
        #[arg(value_parser = list_kind)]
        list: AccessListKind,
        uuid: String,
        name: Option<String>,
    },

    /// Run a server console command
    Cmd(FreeText),
    /// Send a chat message
    Say(FreeText),
    /// Save server properties
    Prop(Pairs),
    /// Save game rules
    Rule(Pairs),
    /// Manage custom recipes
    Recipe {
        #[command(subcommand)]
        action: RecipeVerb,
    },
    /// Search the server log
    Grep(FreeText),

    /// Change directory (`..` for the parent, nothing for the root)
    Cd { path: Option<String> },
    /// Reload the current directory
    Ls,
    /// Sort files by name, size or date
    Sort {
        #[arg(value_parser = SortColumn::from_str)]
        column: SortColumn,
    },
    /// Filter the file list
    Find(FreeText),
    /// Open a folder, picture or editable file
    Open { path: String },
    /// Create a folder in the current directory
    Mkdir,
    /// Rename a file or folder
    Mv { path: String },
    /// Delete a file
    Rm { path: String },
    /// Delete a folder
    Rmdir { path: String },
    /// Download a file
    Get { path: String },
    /// Open a file in the editor
    Edit { path: String },
    /// Save a local file into the open editor
    Save { file: PathBuf },
    /// Close the editor
    Close,
    /// Upload local files into the current directory
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show the file change log
    Log,
    /// Open the context menu for a path at a screen position
    Menu {
        path: String,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Run a context menu entry (edit, picture, download, rename, delete)
    Pick {
        #[arg(value_parser = menu_item)]
        item: MenuItem,
    },

    /// Show this help
    #[command(alias = "?")]
    Help,
    /// Leave the dashboard
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecipeShape {
    Shaped,
    Shapeless,
}

#[derive(Subcommand, Debug)]
enum RecipeVerb {
    /// Load a recipe into the form
    Edit { id: String },
    /// Delete a recipe
    Rm { id: String },
    /// Clear the recipe form
    Clear,
    /// Create or update the recipe in the form
    Save {
        #[arg(value_parser = recipe_shape)]
        shape: RecipeShape,
        result: String,
        #[arg(value_parser = recipe_count)]
        count: u32,
        /// Comma-separated ingredient slots; '-' or nothing leaves a slot empty
        slots: String,
    },
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Dispatch(Command),
    /// Browse to the parent of the current directory.
    Parent,
    /// Read a local file and save it into the open editor.
    SaveFrom(PathBuf),
    /// Read local files and upload them into the current directory.
    UploadFrom(Vec<PathBuf>),
    Help,
    Quit,
    Empty,
}

fn usage(message: &str) -> ClientError {
    ClientError::validation("command", message)
}

fn key_value(pair: &str) -> ClientResult<(String, JsonValue)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), setting_value(value))),
        _ => Err(usage(&format!("not a key=value pair: {}", pair))),
    }
}

fn list_kind(word: &str) -> ClientResult<AccessListKind> {
    match word {
        "whitelist" => Ok(AccessListKind::Whitelist),
        "blacklist" => Ok(AccessListKind::Blacklist),
        "ops" => Ok(AccessListKind::Ops),
        other => Err(usage(&format!("unknown list: {}", other))),
    }
}

fn recipe_shape(word: &str) -> ClientResult<RecipeShape> {
    match word {
        "shaped" => Ok(RecipeShape::Shaped),
        "shapeless" => Ok(RecipeShape::Shapeless),
        other => Err(usage(&format!("expected shaped or shapeless, got {}", other))),
    }
}

fn recipe_count(word: &str) -> ClientResult<u32> {
    word.parse().map_err(|_| usage(&format!("not a count: {}", word)))
}

fn menu_item(word: &str) -> ClientResult<MenuItem> {
    match word {
        "edit" => Ok(MenuItem::Edit),
        "picture" | "open" => Ok(MenuItem::OpenPicture),
        "download" => Ok(MenuItem::Download),
        "rename" => Ok(MenuItem::Rename),
        "delete" => Ok(MenuItem::Delete),
        other => Err(usage(&format!("unknown menu entry: {}", other))),
    }
}

/// The text after the command word, with its inner spacing intact.
fn free_text(line: &str, text: &FreeText) -> String {
    if text.words.is_empty() {
        return String::new();
    }
    let line = line.trim_start();
    let verb_end = line.find(char::is_whitespace).unwrap_or(line.len());
    line[verb_end..].trim().to_string()
}

fn player(args: PlayerArgs, action: PlayerAction) -> Command {
    let name = args.name.unwrap_or_else(|| args.uuid.clone());
    Command::PlayerAction { uuid: args.uuid, name, action }
}

fn access_add(args: AccessArgs, kind: AccessListKind) -> Command {
    Command::AccessAdd { kind, name: args.name, uuid: args.uuid }
}

fn recipe(action: RecipeVerb) -> Command {
    match action {
        RecipeVerb::Edit { id } => Command::EditRecipe(id),
        RecipeVerb::Rm { id } => Command::DeleteRecipe(id),
        RecipeVerb::Clear => Command::ClearRecipeForm,
        RecipeVerb::Save { shape, result, count, slots } => {
            let ingredients = slots
                .split(',')
                .map(str::trim)
                .map(|s| if s.is_empty() || s == "-" { None } else { Some(s.to_string()) })
                .collect();
            Command::SaveRecipe(RecipeDraft {
                shaped: shape == RecipeShape::Shaped,
                ingredients,
                result: RecipeResult { item: result, count },
            })
        }
    }
}

/// Turns a clap failure into the one-line message shown at the prompt.
fn parse_error(err: clap::Error) -> ClientError {
    if let Some(inner) = err.source().and_then(|e| e.downcast_ref::<ClientError>()) {
        return inner.clone();
    }
    let rendered = err.to_string();
    if err.kind() == ErrorKind::DisplayHelp {
        return usage(rendered.trim_end());
    }
    let head = rendered.split("\n\n").next().unwrap_or_default();
    let head = head.strip_prefix("error: ").unwrap_or(head);
    let mut message = head.split_whitespace().collect::<Vec<_>>().join(" ");
    if err.kind() == ErrorKind::InvalidSubcommand {
        message.push_str(", try 'help'");
    }
    usage(&message)
}

/// The command reference printed by `help`.
pub fn help() -> String {
    ShellLine::command().render_help().to_string()
}

/// Parses one line typed while no dialog is open.
pub fn parse_line(line: &str) -> ClientResult<ShellCommand> {
    if line.trim().is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let parsed = ShellLine::try_parse_from(line.split_whitespace()).map_err(parse_error)?;
    let dispatch = |command: Command| Ok(ShellCommand::Dispatch(command));

    match parsed.verb {
        Verb::Help => Ok(ShellCommand::Help),
        Verb::Quit => Ok(ShellCommand::Quit),
        Verb::Page { page } => dispatch(Command::SelectPage(page)),

        Verb::Who(text) => dispatch(Command::SearchPlayers(free_text(line, &text))),
        Verb::Inv(args) => {
            let name = args.name.unwrap_or_else(|| args.uuid.clone());
            dispatch(Command::ShowInventory { uuid: args.uuid, name })
        }
        Verb::Kick(args) => dispatch(player(args, PlayerAction::Kick)),
        Verb::Ban(args) => dispatch(player(args, PlayerAction::Ban)),
        Verb::Unban(args) => dispatch(player(args, PlayerAction::Unban)),
        Verb::Op(args) => dispatch(player(args, PlayerAction::Op)),
        Verb::Deop(args) => dispatch(player(args, PlayerAction::Deop)),

        Verb::Allow(args) => dispatch(access_add(args, AccessListKind::Whitelist)),
        Verb::Deny(args) => dispatch(access_add(args, AccessListKind::Blacklist)),
        Verb::Opadd(args) => dispatch(access_add(args, AccessListKind::Ops)),
        Verb::Unlist { list, uuid, name } => {
            let name = name.unwrap_or_else(|| uuid.clone());
            dispatch(Command::AccessRemove { kind: list, uuid, name })
        }

        Verb::Cmd(text) => dispatch(Command::SendCommand(free_text(line, &text))),
        Verb::Say(text) => dispatch(Command::SendChat(free_text(line, &text))),
        Verb::Prop(pairs) => dispatch(Command::SaveProperties(pairs.pairs.into_iter().collect())),
        Verb::Rule(pairs) => dispatch(Command::SaveGameRules(pairs.pairs.into_iter().collect())),
        Verb::Recipe { action } => dispatch(recipe(action)),
        Verb::Grep(text) => dispatch(Command::SearchLogs(free_text(line, &text))),

        Verb::Cd { path } if path.as_deref() == Some("..") => Ok(ShellCommand::Parent),
        Verb::Cd { path } => dispatch(Command::Browse(path.unwrap_or_default())),
        Verb::Ls => dispatch(Command::RefreshFiles),
        Verb::Sort { column } => dispatch(Command::SortFiles(column)),
        Verb::Find(text) => dispatch(Command::SearchFiles(free_text(line, &text))),
        Verb::Open { path } => dispatch(Command::OpenEntry(path)),
        Verb::Mkdir => dispatch(Command::CreateFolder),
        Verb::Mv { path } => dispatch(Command::Rename(path)),
        Verb::Rm { path } => dispatch(Command::Delete { path, is_directory: false }),
        Verb::Rmdir { path } => dispatch(Command::Delete { path, is_directory: true }),
        Verb::Get { path } => dispatch(Command::Download(path)),
        Verb::Edit { path } => dispatch(Command::EditFile(path)),
        Verb::Save { file } => Ok(ShellCommand::SaveFrom(file)),
        Verb::Close => dispatch(Command::CloseEditor),
        Verb::Upload { files } => Ok(ShellCommand::UploadFrom(files)),
        Verb::Log => dispatch(Command::ShowChangeLog),
        Verb::Menu { path, x, y } => dispatch(Command::ContextMenu { path, x, y }),
        Verb::Pick { item } => dispatch(Command::MenuAction(item)),
    }
}

/// Feeds a line to the open dialog. Returns false when no dialog was open.
pub fn answer_dialog(host: &DialogHost, line: &str) -> bool {
    let Some(dialog) = host.current() else {
        return false;
    };
    let text = line.trim_end_matches(['\r', '\n']);
    if text.trim().eq_ignore_ascii_case("esc") {
        return host.press(DialogKey::Escape);
    }
    match dialog.kind {
        DialogKind::Alert => host.press(DialogKey::Enter),
        DialogKind::Confirm => match text.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "ok" => host.press(DialogKey::Enter),
            _ => host.press(DialogKey::Escape),
        },
        DialogKind::Prompt => host.submit(text),
    }
}
