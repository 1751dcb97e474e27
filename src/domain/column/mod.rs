// ============================================================
// COLUMN DOMAIN LAYER
// ============================================================
// Core types and value objects for column classification
// No I/O, no async, no external collaborators

mod cell;
mod detection_config;
mod import_column;
mod semantic_type;

pub use cell::{format_bare_number, CellValue, CoercedCell};
pub use detection_config::DetectionConfig;
pub use import_column::{ChangedBy, FormatChange, ImportColumn};
pub use semantic_type::SemanticType;
