//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages wire browser implementations into the `wrapped` crate's gate and
//! loader and own only rendering.

pub mod login;
pub mod wrapped;
