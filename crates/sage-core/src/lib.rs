//! Core engine for Sage, the food-waste and nutrition coach.
//!
//! Everything here is presentation-free: components consume immutable
//! reference tables and produce structured results. Rendering user-facing
//! text is the job of the `sagectl` composer.

pub mod coach;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod impact;
pub mod matcher;
pub mod nutrition;
pub mod pantry;
pub mod personalize;
pub mod planner;
pub mod prevention;
pub mod recipes;
pub mod search;
pub mod tables;
pub mod text;
pub mod variety;
