//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the browser implementation of the loader's transport port.

pub mod api;
