use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionOutcome, PageContext};
use crate::command::Command;
use crate::error::{validation, ClientError, ClientResult};
use crate::lifecycle::lock;
use crate::router::{PageId, PageLoader};
use crate::types::{Recipe, RecipeDraft};
use crate::view::{Action, Cell, FormField, FormSection, InputKind, Table, Target, View};

/// Slots of the 3x3 crafting grid.
pub const GRID_SLOTS: usize = 9;

/// Trims ingredients, turns blanks into empty slots and checks every item id.
pub fn validate_draft(draft: &RecipeDraft) -> ClientResult<RecipeDraft> {
    let ingredients: Vec<Option<String>> = draft
        .ingredients
        .iter()
        .map(|slot| slot.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .collect();
    if ingredients.iter().all(Option::is_none) {
        return Err(ClientError::validation("ingredients", "Please add at least one ingredient"));
    }
    let result_item = draft.result.item.trim().to_string();
    if result_item.is_empty() {
        return Err(ClientError::validation("result", "Please specify a result item"));
    }
    for item in ingredients.iter().flatten().chain(std::iter::once(&result_item)) {
        validation::validate_item_id(item)?;
    }
    if draft.result.count == 0 {
        return Err(ClientError::validation("count", "Result count must be at least 1"));
    }

    let mut clean = draft.clone();
    clean.ingredients = ingredients;
    clean.result.item = result_item;
    Ok(clean)
}

fn recipe_form(editing: Option<&str>, recipe: Option<&Recipe>) -> Vec<FormSection> {
    let text = |key: &str, label: &str, value: String| FormField {
        key: key.to_string(),
        label: label.to_string(),
        input: InputKind::Text(value),
    };
    let shaped = recipe.map(|r| r.shaped).unwrap_or(true);
    let slots = (0..GRID_SLOTS)
        .map(|i| {
            let value = recipe.and_then(|r| r.ingredients.get(i).cloned().flatten()).unwrap_or_default();
            text(&format!("slot{}", i + 1), &format!("Slot {}", i + 1), value)
        })
        .collect();
    let title = match editing {
        Some(id) => format!("Update Recipe {}", id),
        None => "New Recipe".to_string(),
    };
    vec![
        FormSection {
            title,
            fields: vec![FormField { key: "shaped".into(), label: "Shaped".into(), input: InputKind::Toggle(shaped) }],
        },
        FormSection { title: "Ingredients".into(), fields: slots },
        FormSection {
            title: "Result".into(),
            fields: vec![
                text("result", "Result Item", recipe.map(|r| r.result.item.clone()).unwrap_or_default()),
                FormField {
                    key: "count".into(),
                    label: "Count".into(),
                    input: InputKind::Number(recipe.map(|r| r.result.count).unwrap_or(1).to_string()),
                },
            ],
        },
    ]
}

/// Custom crafting recipes: list, create, edit, delete.
pub struct RecipesPage {
    ctx: PageContext,
    editing: Mutex<Option<String>>,
}

impl RecipesPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx, editing: Mutex::new(None) }
    }

    /// Id of the recipe loaded into the form, if any.
    pub fn editing(&self) -> Option<String> {
        lock(&self.editing).clone()
    }

    fn render_list(&self, recipes: &[Recipe]) {
        let mut table = Table::new(&["ID", "Type", "Result", "Actions"], "No custom recipes yet");
        for recipe in recipes {
            table.push(
                recipe.id.clone(),
                vec![
                    Cell::mono(recipe.id.clone()),
                    Cell::plain(if recipe.shaped { "Shaped" } else { "Shapeless" }),
                    Cell::plain(format!("{} ×{}", recipe.result.item, recipe.result.count)),
                ],
                vec![
                    Action::new("Edit", Command::EditRecipe(recipe.id.clone())),
                    Action::danger("Delete", Command::DeleteRecipe(recipe.id.clone())),
                ],
            );
        }
        self.ctx.surface.render(Target::Recipes, View::Table(table));
    }

    pub fn clear_form(&self) {
        *lock(&self.editing) = None;
        self.ctx.surface.render(Target::RecipeForm, View::Form(recipe_form(None, None)));
    }

    pub async fn edit(&self, id: &str) -> ActionOutcome {
        let recipe = match self.ctx.api.recipe(id).await {
            Ok(Some(recipe)) => recipe,
            Ok(None) => {
                let err = ClientError::Backend(format!("Recipe {} not found", id));
                return self.ctx.report_failure("load recipe", &err).await;
            }
            Err(err) => return self.ctx.report_failure("load recipe", &err).await,
        };
        *lock(&self.editing) = Some(id.to_string());
        self.ctx.surface.render(Target::RecipeForm, View::Form(recipe_form(Some(id), Some(&recipe))));
        ActionOutcome::Completed
    }

    /// Creates a recipe, or updates the one loaded by [`edit`](Self::edit).
    pub async fn save(&self, draft: &RecipeDraft) -> ActionOutcome {
        let draft = match validate_draft(draft) {
            Ok(draft) => draft,
            Err(err) => return self.ctx.report_failure("save recipe", &err).await,
        };
        let editing = self.editing();
        let (saved, message) = match editing.as_deref() {
            Some(id) => (self.ctx.api.update_recipe(id, &draft).await, "Recipe updated successfully"),
            None => (self.ctx.api.create_recipe(&draft).await, "Recipe created successfully"),
        };
        if let Err(err) = saved {
            return self.ctx.report_failure("save recipe", &err).await;
        }
        tracing::info!(recipe = ?editing, result = %draft.result.item, "recipe saved");
        self.ctx.dialogs.alert(message).await;
        self.clear_form();
        if let Err(err) = self.load(0).await {
            tracing::warn!(error = %err, "recipe list refresh failed");
        }
        ActionOutcome::Completed
    }

    pub async fn delete(&self, id: &str) -> ActionOutcome {
        if !self.ctx.dialogs.confirm(&format!("Are you sure you want to delete recipe \"{}\"?", id)).await {
            return ActionOutcome::Cancelled;
        }
        if let Err(err) = self.ctx.api.delete_recipe(id).await {
            return self.ctx.report_failure("delete recipe", &err).await;
        }
        tracing::info!(recipe = %id, "recipe deleted");
        self.ctx.dialogs.alert("Recipe deleted successfully").await;
        if let Err(err) = self.load(0).await {
            tracing::warn!(error = %err, "recipe list refresh failed");
        }
        ActionOutcome::Completed
    }
}

#[async_trait]
impl PageLoader for RecipesPage {
    fn page(&self) -> PageId {
        PageId::Recipes
    }

    fn refresh_interval(&self) -> Option<Duration> {
        None
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        match self.ctx.api.recipes().await {
            Ok(recipes) => {
                self.render_list(&recipes.recipes);
                Ok(())
            }
            Err(err) => {
                // Older backends have no recipe endpoint; show an empty list.
                self.render_list(&[]);
                Err(err)
            }
        }
    }
}
