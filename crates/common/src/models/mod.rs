pub mod selected_file;
pub mod signal;

pub use selected_file::SelectedFile;
pub use signal::{AnalysisResult, DisplayValue};
