// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file I/O that no business layer should own:
//
//   artifact.rs — Saving and loading the fitted pipeline
//                 (bincode, atomic replace, shape validation)
//                 plus the JSON training report beside it.
//
//   metrics.rs  — Run-level metrics log (CSV, append-only)
//                 for comparing training runs over time.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §12 (I/O and File Handling)

/// Model artifact persistence
pub mod artifact;

/// Training-run metrics CSV logger
pub mod metrics;
