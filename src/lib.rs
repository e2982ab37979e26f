//! # Conference Dominance
//!
//! Ranks college football teams within a conference by transitive win credit.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, team records, rankings)
//! - **calculate**: Win graph, weighted credit and ranking normalization
//! - **fetch**: Game data sources (CollegeFootballData API, JSON files)
//! - **render**: Terminal chart and detail table
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod render;

pub use calculate::{analyze, analyze_report, list_conferences};
pub use models::*;
