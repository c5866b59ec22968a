//! Skill recommendation synthesis.

pub mod rules;

pub use rules::generate_recommendations;
