//! CLI - command-line argument parsing.
//!
//! Keeps argument parsing separate from execution logic; see
//! `commands` for dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sage CLI
#[derive(Parser)]
#[command(name = "sagectl")]
#[command(about = "Sage - Food waste and nutrition coach", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to config file (defaults to ./sage.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand (if not provided, starts the interactive chat)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Chat interactively with the coach
    Chat,

    /// Send one message through the coach and print the reply
    Ask {
        /// The message, e.g. "tomato, bread, cheese"
        message: Vec<String>,
    },

    /// Ranked recipe recommendations for a list of ingredients
    Recipes {
        /// Available ingredients
        ingredients: Vec<String>,

        /// Restrict suggestions to one cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Dietary preference (repeatable): vegan, gluten_free,
        /// dairy_free, keto
        #[arg(long = "diet")]
        diets: Vec<String>,
    },

    /// Weekly meal plan built around available ingredients
    Plan {
        /// Available ingredients
        ingredients: Vec<String>,
    },

    /// Environmental impact of rescuing ingredients
    Impact {
        /// Ingredients to estimate
        ingredients: Vec<String>,
    },

    /// Expiration forecasts, most urgent first
    Expiry {
        /// Ingredients to forecast
        ingredients: Vec<String>,

        /// Storage location: fridge, counter, freezer, pantry
        #[arg(long, default_value = "fridge")]
        location: String,
    },

    /// Daily sustainability tip
    Tip,
}
