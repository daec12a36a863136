pub mod formula;
pub mod grading_service;
pub mod layout_service;
pub mod workbook_service;

pub use grading_service::{GradingSheetBuilder, SOLUTION_SHEET_NAME};
pub use layout_service::{LayoutEngine, STUDENT_SHEET_NAME};
pub use workbook_service::{output_filename, WorkbookService};
