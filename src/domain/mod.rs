// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define the core
// concepts of the system: what an employee record is, what
// can go wrong, and which capabilities the other layers provide.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model math (trees, encoders)
//   - Only types and trait contracts
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Employee profiles (features) and labelled training records
pub mod record;

// The error taxonomy shared by every library layer
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
