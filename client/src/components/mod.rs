//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome and list items while reading the session
//! from Leptos context; pages own data loading.

pub mod navbar;
pub mod post_card;
