use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::{format, ActionOutcome, PageContext};
use crate::error::ClientResult;
use crate::router::{PageId, PageLoader};
use crate::view::{FormField, FormSection, InputKind, Target, View};

const PROPERTY_GROUPS: &[(&str, &[&str])] = &[
    ("Basic Settings", &["motd", "max-players", "difficulty", "whitelist"]),
    ("Network Settings", &["online-mode", "allow-flight", "allow-nether", "allow-end"]),
];

const GAMERULE_GROUPS: &[(&str, &[&str])] = &[
    (
        "Mob Behaviour",
        &["doMobSpawning", "doMobLoot", "mobGriefing", "doPatrolSpawning", "doTraderSpawning", "doWardenSpawning"],
    ),
    (
        "Player Settings",
        &["keepInventory", "doImmediateRespawn", "playersSleepingPercentage", "naturalRegeneration", "showDeathMessages"],
    ),
    ("World Settings", &["doDaylightCycle", "doWeatherCycle", "randomTickSpeed", "spawnRadius"]),
    ("Block & Fire", &["doFireTick", "doTileDrops", "tntExplodes"]),
];

fn value_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Booleans become toggles, numbers number inputs, everything else text.
pub fn input_kind(value: &JsonValue) -> InputKind {
    let text = value_text(value);
    match text.to_lowercase().as_str() {
        "true" => InputKind::Toggle(true),
        "false" => InputKind::Toggle(false),
        _ if !text.trim().is_empty() && text.trim().parse::<f64>().is_ok() => InputKind::Number(text),
        _ => InputKind::Text(text),
    }
}

/// A value typed by the user, as the backend expects it: toggles as booleans,
/// everything else as the entered string.
pub fn setting_value(raw: &str) -> JsonValue {
    match raw.trim() {
        "true" => JsonValue::Bool(true),
        "false" => JsonValue::Bool(false),
        other => JsonValue::String(other.to_string()),
    }
}

/// Groups `values` by the given key lists; keys in no group land in "Other".
pub fn group_settings(values: &BTreeMap<String, JsonValue>, groups: &[(&str, &[&str])]) -> Vec<FormSection> {
    let field = |key: &str, value: &JsonValue| FormField {
        key: key.to_string(),
        label: format::humanize_label(key),
        input: input_kind(value),
    };

    let mut used = HashSet::new();
    let mut sections = Vec::new();
    for (title, keys) in groups {
        let fields: Vec<FormField> = keys
            .iter()
            .filter_map(|key| values.get(*key).map(|value| (*key, value)))
            .map(|(key, value)| {
                used.insert(key);
                field(key, value)
            })
            .collect();
        if !fields.is_empty() {
            sections.push(FormSection { title: title.to_string(), fields });
        }
    }
    let other: Vec<FormField> =
        values.iter().filter(|(key, _)| !used.contains(key.as_str())).map(|(key, value)| field(key, value)).collect();
    if !other.is_empty() {
        sections.push(FormSection { title: "Other".to_string(), fields: other });
    }
    sections
}

/// `server.properties` and game rules; loaded once per selection.
pub struct SettingsPage {
    ctx: PageContext,
}

impl SettingsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    pub async fn save_properties(&self, properties: &BTreeMap<String, JsonValue>) -> ActionOutcome {
        if let Err(err) = self.ctx.api.save_properties(properties).await {
            return self.ctx.report_failure("save server properties", &err).await;
        }
        tracing::info!(count = properties.len(), "server properties saved");
        self.ctx.dialogs.alert("Server properties saved successfully").await;
        ActionOutcome::Completed
    }

    pub async fn save_gamerules(&self, gamerules: &BTreeMap<String, JsonValue>) -> ActionOutcome {
        if let Err(err) = self.ctx.api.save_gamerules(gamerules).await {
            return self.ctx.report_failure("save game rules", &err).await;
        }
        tracing::info!(count = gamerules.len(), "game rules saved");
        self.ctx.dialogs.alert("Game rules saved successfully").await;
        ActionOutcome::Completed
    }
}

#[async_trait]
impl PageLoader for SettingsPage {
    fn page(&self) -> PageId {
        PageId::Settings
    }

    fn refresh_interval(&self) -> Option<Duration> {
        None
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let settings = self.ctx.api.settings().await?;
        self.ctx.surface.render(Target::Properties, View::Form(group_settings(&settings.properties, PROPERTY_GROUPS)));
        self.ctx.surface.render(Target::GameRules, View::Form(group_settings(&settings.gamerules, GAMERULE_GROUPS)));
        Ok(())
    }
}
