//! Browser-side implementations of the loader's navigation and diagnostic
//! ports.

pub mod diagnostics;
pub mod navigation;
