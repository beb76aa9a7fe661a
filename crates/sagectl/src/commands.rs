//! Command dispatch: build the coach from config and run the requested
//! surface.

use crate::cli::{Cli, Commands};
use crate::render;
use crate::repl;
use anyhow::{bail, Result};
use chrono::Local;
use sage_core::coach::Coach;
use sage_core::config::CoachConfig;
use sage_core::engine;
use sage_core::impact::{self, AchievementLevel};
use sage_core::pantry;
use sage_core::personalize;
use sage_core::prevention;
use sage_core::recipes::Cuisine;
use sage_core::tables::{DietaryPreference, ReferenceTables, StorageLocation};
use sage_core::variety::Variety;

fn load_config(cli: &Cli) -> CoachConfig {
    match &cli.config {
        Some(path) => CoachConfig::load(path),
        None => CoachConfig::load_default(),
    }
}

/// Ingredients arrive as free-form words; rejoin and re-split them the
/// same way the chat path does.
fn parse_ingredients(words: &[String]) -> Vec<String> {
    sage_core::extract::extract(&words.join(" "))
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let mut coach = Coach::new(config)?;
            repl::run(&mut coach)
        }
        Commands::Ask { message } => {
            let mut coach = Coach::new(config)?;
            let today = Local::now().date_naive();
            let reply = coach.respond(&message.join(" "), &[], today);
            println!("{}", render::render_reply(&reply));
            Ok(())
        }
        Commands::Recipes {
            ingredients,
            cuisine,
            diets,
        } => run_recipes(&config, &ingredients, cuisine.as_deref(), &diets),
        Commands::Plan { ingredients } => run_plan(&config, &ingredients),
        Commands::Impact { ingredients } => run_impact(&config, &ingredients),
        Commands::Expiry {
            ingredients,
            location,
        } => run_expiry(&config, &ingredients, &location),
        Commands::Tip => {
            let mut variety = Variety::from_seed_option(config.rng_seed);
            println!("{}", render::render_fact(&prevention::daily_fact(&mut variety)));
            Ok(())
        }
    }
}

fn require_ingredients(raw: &[String]) -> Result<Vec<String>> {
    let ingredients = parse_ingredients(raw);
    if ingredients.is_empty() {
        bail!("please provide a list of ingredients, e.g. \"tomato, bread, cheese\"");
    }
    Ok(ingredients)
}

fn run_recipes(
    config: &CoachConfig,
    raw: &[String],
    cuisine: Option<&str>,
    diets: &[String],
) -> Result<()> {
    let ingredients = require_ingredients(raw)?;
    let tables = ReferenceTables::load(&config.nutrition_data_path);

    let preferences: Vec<DietaryPreference> = diets
        .iter()
        .filter_map(|d| {
            let parsed = DietaryPreference::parse(d);
            if parsed.is_none() {
                eprintln!("Unknown dietary preference '{d}', skipping");
            }
            parsed
        })
        .collect();

    match cuisine {
        Some(name) => {
            let Some(cuisine) = Cuisine::parse(name) else {
                bail!("unknown cuisine '{name}'");
            };
            let suggestions = engine::suggestions_by_cuisine(&tables, &ingredients);
            let bucket: Vec<_> = suggestions
                .into_iter()
                .filter(|(c, _)| *c == cuisine)
                .collect();
            if bucket.is_empty() {
                println!("No {cuisine} recipes cleared the bar for those ingredients.");
            } else {
                println!("{}", render::render_cuisine_suggestions(&bucket));
            }
        }
        None => {
            let ranked = engine::find_best_recipes(&tables, &ingredients, 5);
            println!("{}", render::render_scored_recipes(&ranked));

            if !preferences.is_empty() {
                for scored in &ranked {
                    let personalized =
                        personalize::personalize(&tables, &scored.recipe, &preferences);
                    let swaps = render::render_substitutions(&personalized);
                    if !swaps.is_empty() {
                        println!("{}: {}", personalized.recipe.name, swaps);
                    }
                }
            }
        }
    }

    let creative = engine::creative_combinations(&ingredients);
    if !creative.is_empty() {
        println!();
        println!("{}", render::render_creative(&creative));
    }

    Ok(())
}

fn run_plan(config: &CoachConfig, raw: &[String]) -> Result<()> {
    let ingredients = require_ingredients(raw)?;
    let mut variety = Variety::from_seed_option(config.rng_seed);

    let today = Local::now().date_naive();
    let plan = sage_core::planner::generate_weekly_plan(&ingredients, today, &mut variety);
    let challenge = impact::weekly_challenge(&mut variety);

    println!("{}", render::render_meal_plan(&plan, Some(&challenge), 7));
    Ok(())
}

fn run_impact(config: &CoachConfig, raw: &[String]) -> Result<()> {
    let ingredients = require_ingredients(raw)?;
    let tables = ReferenceTables::load(&config.nutrition_data_path);
    let mut variety = Variety::from_seed_option(config.rng_seed);

    let report = impact::calculate_total_impact(&tables, &ingredients, &mut variety);
    let achievement = AchievementLevel::for_co2_kg(report.totals.co2_reduced_kg);
    println!("{}", render::render_impact(&report, achievement));
    Ok(())
}

fn run_expiry(config: &CoachConfig, raw: &[String], location: &str) -> Result<()> {
    let ingredients = require_ingredients(raw)?;
    let Some(location) = StorageLocation::parse(location) else {
        bail!("unknown storage location '{location}' (try fridge, counter, freezer, pantry)");
    };

    let tables = ReferenceTables::load(&config.nutrition_data_path);
    let today = Local::now().date_naive();
    let forecasts = pantry::forecast_all(&tables, &ingredients, location, today);
    println!("{}", render::render_forecasts(&forecasts));

    let urgent: Vec<_> = forecasts.iter().filter(|f| pantry::is_urgent(f)).collect();
    if !urgent.is_empty() {
        println!();
        println!(
            "⚠️  Use soon: {}",
            urgent
                .iter()
                .map(|f| f.ingredient.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}
