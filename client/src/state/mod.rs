//! Reactive application state provided through Leptos context.

pub mod auth;
