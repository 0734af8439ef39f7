//! File reading for the pipeline, bounded by compile-time limits

mod processor;

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use std::path::Path;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default preferences
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_max_line_count() -> usize {
    MAX_LINE_COUNT
}

/// Verify every file processing error code is registered
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes::file_processing::*;

    let file_codes = [
        FILE_NOT_FOUND,
        INVALID_EXTENSION,
        FILE_TOO_LARGE,
        EMPTY_FILE,
        PERMISSION_DENIED,
        INVALID_ENCODING,
        IO_ERROR,
        INVALID_PATH,
        TOO_MANY_LINES,
    ];

    for code in &file_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processing error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}
