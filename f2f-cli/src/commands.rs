//! Subcommands and their text rendering
//!
//! Commands return the text to print rather than printing it, so tests can
//! drive them directly.

use clap::builder::PossibleValuesParser;
use clap::Subcommand;
use f2f_common::catalog::PANTRY_CATEGORIES;
use f2f_common::profile::ProfileSummary;
use f2f_common::{filter_recipes, overlay, session, Ingredient};

use crate::{App, CliError, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with the demo account (test / test)
    Login { email: String, password: String },

    /// Log out and clear pantry, favorites and exclusions
    Logout,

    /// Show whether a user is logged in
    Status,

    /// Manage pantry ingredients
    Pantry {
        #[command(subcommand)]
        action: PantryAction,
    },

    /// Suggest ingredient names matching a search
    Search { text: String },

    /// Manage dietary preferences
    Diets {
        #[command(subcommand)]
        action: DietAction,
    },

    /// List recipes matching the active pantry ingredients
    Recipes,

    /// Show one recipe in full
    Recipe { id: String },

    /// Toggle a recipe as favorite
    Favorite { id: String },

    /// Toggle a recipe as excluded (shown dimmed)
    Exclude { id: String },

    /// Show profile statistics
    Profile {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PantryAction {
    /// List pantry ingredients grouped by category
    List,

    /// Add an ingredient
    Add {
        name: String,
        #[arg(
            short,
            long,
            default_value = "vegetables",
            value_parser = PossibleValuesParser::new(PANTRY_CATEGORIES.iter().copied())
        )]
        category: String,
    },

    /// Remove an ingredient by id
    Remove { id: String },

    /// Select or deselect an ingredient (by id or name)
    Toggle { ingredient: String },

    /// Select all, or unselect all when everything is selected
    ToggleAll,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DietAction {
    /// List dietary preferences
    List,

    /// Turn a dietary preference on or off
    Toggle { id: String },
}

impl Command {
    /// Everything except logging in and checking status needs a user
    pub fn requires_login(&self) -> bool {
        !matches!(self, Command::Login { .. } | Command::Status)
    }
}

impl App {
    /// Run one command and return its output
    pub async fn execute(&mut self, command: Command) -> Result<String> {
        if command.requires_login() && !session::is_logged_in(self.kv.as_ref()).await? {
            return Err(CliError::NotLoggedIn);
        }

        match command {
            Command::Login { email, password } => {
                session::login(self.kv.as_ref(), &email, &password).await?;
                Ok("Logged in successfully!".to_string())
            }
            Command::Status => match session::current_user(self.kv.as_ref()).await? {
                Some(email) => Ok(format!("Logged in as {}", email)),
                None => Ok("Not logged in".to_string()),
            },
            Command::Logout => {
                // Drain pending writes so none land after the wipe
                self.persister.flush().await;
                session::logout(self.kv.as_ref()).await?;
                Ok("Logged out successfully!".to_string())
            }
            Command::Pantry { action } => self.pantry_command(action),
            Command::Search { text } => {
                let suggestions = self.catalog.suggest_ingredients(&text);
                if suggestions.is_empty() {
                    Ok("No suggestions".to_string())
                } else {
                    Ok(suggestions.join("\n"))
                }
            }
            Command::Diets { action } => self.diet_command(action),
            Command::Recipes => self.render_recipes(),
            Command::Recipe { id } => self.render_recipe(&id),
            Command::Favorite { id } => {
                let name = self.catalog.recipe(&id)?.name.clone();
                let now = self.favorites.toggle_favorite(&id)?;
                Ok(format!(
                    "{} {} favorites",
                    name,
                    if now { "added to" } else { "removed from" }
                ))
            }
            Command::Exclude { id } => {
                let name = self.catalog.recipe(&id)?.name.clone();
                let now = self.favorites.toggle_excluded(&id)?;
                Ok(format!("{} {}", name, if now { "excluded" } else { "included" }))
            }
            Command::Profile { json } => {
                let summary = ProfileSummary::collect(&self.pantry, &self.dietary, &self.favorites);
                if json {
                    let json =
                        serde_json::to_string_pretty(&summary).map_err(f2f_common::Error::from)?;
                    return Ok(json);
                }
                let email = session::current_user(self.kv.as_ref()).await?.unwrap_or_default();
                Ok([
                    format!("User: {}", email),
                    format!("Saved recipes: {}", summary.saved_recipes),
                    format!("Pantry ingredients: {}", summary.pantry_ingredients),
                    format!("Excluded recipes: {}", summary.excluded_recipes),
                    format!("Dietary preferences: {}", summary.active_diets),
                ]
                .join("\n"))
            }
        }
    }

    fn pantry_command(&mut self, action: PantryAction) -> Result<String> {
        match action {
            PantryAction::List => Ok(self.render_pantry()),
            PantryAction::Add { name, category } => {
                let added = self.pantry.add_ingredient(&name, &category)?;
                Ok(format!("Added {} ({}) [{}]", added.name, added.category, added.id))
            }
            PantryAction::Remove { id } => {
                if self.pantry.remove_ingredient(&id)? {
                    Ok(format!("Removed ingredient {}", id))
                } else {
                    Err(CliError::UnknownIngredient(id))
                }
            }
            PantryAction::Toggle { ingredient } => {
                let found = self.find_ingredient(&ingredient)?;
                let now = self.pantry.toggle_active(&found)?;
                Ok(format!("{} {}", found.name, if now { "selected" } else { "unselected" }))
            }
            PantryAction::ToggleAll => {
                self.pantry.toggle_all()?;
                let selected = self.pantry.active_ingredients().len();
                Ok(format!(
                    "{} of {} ingredients selected",
                    selected,
                    self.pantry.pantry_ingredients().len()
                ))
            }
        }
    }

    fn find_ingredient(&self, key: &str) -> Result<Ingredient> {
        let pantry = self.pantry.pantry_ingredients();
        pantry
            .iter()
            .find(|i| i.id == key)
            .or_else(|| pantry.iter().find(|i| i.name.eq_ignore_ascii_case(key)))
            .cloned()
            .ok_or_else(|| CliError::UnknownIngredient(key.to_string()))
    }

    fn render_pantry(&self) -> String {
        let groups = self.pantry.grouped_by_category();
        if groups.is_empty() {
            return "Your pantry is empty".to_string();
        }

        let mut lines = Vec::new();
        for (category, ingredients) in groups {
            lines.push(format!("{}:", category));
            for ingredient in ingredients {
                let mark = if self.pantry.is_active(&ingredient.id) { "x" } else { " " };
                lines.push(format!("  [{}] {} ({})", mark, ingredient.name, ingredient.id));
            }
        }
        let toggle_label = if self.pantry.all_active() { "Unselect All" } else { "Select All" };
        lines.push(format!("({} with `f2f pantry toggle-all`)", toggle_label));
        lines.join("\n")
    }

    fn diet_command(&mut self, action: DietAction) -> Result<String> {
        match action {
            DietAction::List => {
                let lines: Vec<String> = self
                    .catalog
                    .diets()
                    .iter()
                    .map(|diet| {
                        let mark = if self.dietary.is_active(&diet.id) { "x" } else { " " };
                        format!(
                            "[{}] {} ({}) excludes {}",
                            mark,
                            diet.name,
                            diet.id,
                            diet.excluded_ingredients.join(", ")
                        )
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
            DietAction::Toggle { id } => {
                if self.catalog.diet(&id).is_none() {
                    let missing = format!("dietary preference {}", id);
                    return Err(f2f_common::Error::NotFound(missing).into());
                }
                let excluded = self.dietary.toggle_diet(&id)?;
                if excluded.is_empty() {
                    Ok("No ingredients excluded".to_string())
                } else {
                    Ok(format!("Excluding: {}", excluded.join(", ")))
                }
            }
        }
    }

    fn render_recipes(&self) -> Result<String> {
        let selected = self.pantry.active_names()?;
        if selected.is_empty() {
            return Ok("Please select ingredients to see recipes.".to_string());
        }

        let excluded = self.dietary.excluded_names()?;
        let candidates = filter_recipes(&selected, &excluded, self.catalog.recipes());
        if candidates.is_empty() {
            return Ok("No recipes match your ingredients and dietary preferences".to_string());
        }

        let lines: Vec<String> = overlay(candidates, &self.favorites)?
            .into_iter()
            .map(|card| {
                let star = if card.favorite { "*" } else { " " };
                let dimmed = if card.excluded { " (excluded)" } else { "" };
                format!(
                    "{} {:>3}  {} - {}, {}, serves {}{}",
                    star,
                    card.recipe.id,
                    card.recipe.name,
                    card.recipe.time,
                    card.recipe.difficulty,
                    card.recipe.servings,
                    dimmed
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn render_recipe(&self, id: &str) -> Result<String> {
        let recipe = self.catalog.recipe(id)?;
        let mut lines = vec![
            recipe.name.clone(),
            recipe.description.clone(),
            format!(
                "{} | {} | {} servings",
                recipe.time, recipe.difficulty, recipe.servings
            ),
            String::new(),
            "Ingredients:".to_string(),
        ];
        lines.extend(recipe.ingredients.iter().map(|i| format!("  - {}", i)));
        lines.push(String::new());
        lines.push("Instructions:".to_string());
        lines.extend(
            recipe
                .steps
                .iter()
                .enumerate()
                .map(|(n, step)| format!("  {}. {}", n + 1, step)),
        );
        Ok(lines.join("\n"))
    }
}
