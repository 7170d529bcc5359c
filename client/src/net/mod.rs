//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` plugs `gloo-net` into the shared HTTP adapter and builds the
//! session store every page talks to.

pub mod api;
