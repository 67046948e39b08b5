//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own provider calls and session bookkeeping so route
//! handlers can stay focused on protocol translation and cookie plumbing.

pub mod session;
pub mod spotify;
