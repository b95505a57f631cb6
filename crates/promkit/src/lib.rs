//! Top-level facade crate for promkit.
//!
//! Re-exports the metric primitives and the HTTP exporter so users can depend on a single crate.

pub mod core {
    pub use promkit_core::*;
}

pub mod exporter {
    pub use promkit_exporter::*;
}
