// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the rows the
// model trains on:
//
//   employee_data.csv
//       │
//       ▼
//   CsvRecordLoader   → reads + type-checks rows into EmployeeRecords
//       │
//       ▼
//   split_train_test  → seeded 80/20 shuffle split
//       │
//       ▼
//   ml::SalaryPipeline (Layer 5)
//
// insights.rs summarises the same dataset for the `insights`
// command (salary distribution, per-group statistics).
//
// Reference: csv crate documentation
//            Rust Book §13 (Iterators and Closures)

/// Reads training records and prediction inputs from CSV
pub mod loader;

/// Seeded shuffle-split into training and held-out subsets
pub mod splitter;

/// Descriptive statistics over the training dataset
pub mod insights;

#[cfg(test)]
pub mod fixtures;
