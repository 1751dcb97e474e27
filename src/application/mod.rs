pub mod use_cases;

pub use use_cases::column_pipeline::ColumnPipeline;
pub use use_cases::duplicate_patterns::{duplicated_mask, DuplicatePattern, PatternRegistry};
pub use use_cases::format_classifier::FormatClassifier;
