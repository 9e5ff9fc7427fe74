// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
//
//   train_use_case    — CSV → split → fit → evaluate → artifact
//   predict_use_case  — artifact (loaded once) → predictions
//   insights_use_case — CSV → descriptive statistics
//
// Rules for this layer:
//   - No model math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Errors leave this layer as anyhow::Error; the typed
// SalaryError inside can still be recovered with downcast_ref.

// The training workflow
pub mod train_use_case;

// The prediction workflow
pub mod predict_use_case;

// The exploratory statistics workflow
pub mod insights_use_case;
