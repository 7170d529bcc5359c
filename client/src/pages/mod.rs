//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, guard, navigation)
//! and delegates rendering details to `components`. Pages under a protected
//! route wrap their body in `RequireAuth`.

pub mod create_group;
pub mod edit_post;
pub mod feed;
pub mod group;
pub mod home;
pub mod login;
pub mod new_post;
pub mod profile;
