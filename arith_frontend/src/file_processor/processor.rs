//! Reads expression source files within the compile-time size limits

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_performance, log_success};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .{expected}, found {extension:?}")]
    InvalidExtension {
        expected: String,
        extension: Option<String>,
    },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::InvalidExtension { .. } => codes::file_processing::INVALID_EXTENSION,
            Self::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            Self::EmptyFile => codes::file_processing::EMPTY_FILE,
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
            Self::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            Self::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: std::io::Error, path: &Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::InvalidData => Self::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => Self::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased extension without the dot
    pub extension: Option<String>,
    pub line_count: usize,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn has_extension(&self, expected: &str) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
    }
}

/// File contents plus what was learned while reading them
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    preferences: FileProcessorPreferences,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self::from_preferences(&FileProcessorPreferences::default())
    }

    pub fn from_preferences(preferences: &FileProcessorPreferences) -> Self {
        Self {
            preferences: preferences.clone(),
        }
    }

    pub fn with_extension_required(mut self, required: bool) -> Self {
        self.preferences.require_extension = required;
        self
    }

    pub fn preferences(&self) -> &FileProcessorPreferences {
        &self.preferences
    }

    /// Validate, read and measure the file at `file_path`
    pub fn process_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = file_path.as_ref();
        let display_path = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.collect_metadata(&path)?;
        self.validate_file(&metadata)?;

        let source = fs::read_to_string(&path).map_err(|e| {
            let error = FileProcessorError::from_io(e, &path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => display_path,
                "error" => error
            );
            error
        })?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => display_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT
            );
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        if self.preferences.enable_performance_logging {
            log_performance!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                duration = result.processing_duration,
                "file" => display_path,
                "size" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => display_path
            );
        }

        Ok(result)
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path.display());
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path.display());
            return Err(error);
        }

        file_path
            .canonicalize()
            .map_err(|e| FileProcessorError::from_io(e, file_path))
    }

    fn collect_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(e, path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display()
            );
            error
        })?;

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase),
            line_count: 0,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none")
        );

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds maximum size limit",
                "size_bytes" => metadata.size,
                "limit_bytes" => MAX_FILE_SIZE
            );
            return Err(error);
        }

        if metadata.size == 0 {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "path" => metadata.path.display());
            return Err(error);
        }

        let expected = &self.preferences.expected_extension;
        if self.preferences.require_extension && !metadata.has_extension(expected) {
            let error = FileProcessorError::InvalidExtension {
                expected: expected.clone(),
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have the required extension",
                "extension" => metadata.extension.as_deref().unwrap_or("none"),
                "required" => expected
            );
            return Err(error);
        }

        Ok(())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn temp_file_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_process_valid_file() {
        let file = temp_file_with(".arith", "1 + 2\n");
        let result = FileProcessor::new().process_file(file.path()).unwrap();

        assert_eq!(result.source, "1 + 2\n");
        assert_eq!(result.metadata.line_count, 1);
        assert_eq!(result.metadata.size, 6);
        assert!(result.metadata.has_extension("arith"));
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.arith");

        assert_matches!(
            FileProcessor::new().process_file(&missing),
            Err(FileProcessorError::FileNotFound { .. })
        );
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        assert_matches!(
            FileProcessor::new().process_file(dir.path()),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_file_size_limit() {
        let content = "1".repeat(MAX_FILE_SIZE as usize + 1);
        let file = temp_file_with(".arith", &content);

        let error = FileProcessor::new().process_file(file.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::FileTooLarge { .. });
        assert_eq!(error.error_code(), codes::file_processing::FILE_TOO_LARGE);
    }

    #[test]
    fn test_extension_requirement() {
        let file = temp_file_with(".txt", "1");

        let relaxed = FileProcessor::new().with_extension_required(false);
        assert!(relaxed.process_file(file.path()).is_ok());

        let strict = FileProcessor::new().with_extension_required(true);
        let error = strict.process_file(file.path()).unwrap_err();
        assert_matches!(
            error,
            FileProcessorError::InvalidExtension { ref extension, .. } if extension.as_deref() == Some("txt")
        );
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_empty_file() {
        let file = temp_file_with(".arith", "");
        assert_matches!(
            FileProcessor::new().process_file(file.path()),
            Err(FileProcessorError::EmptyFile)
        );
    }

    #[test]
    fn test_too_many_lines() {
        let content = "1\n".repeat(MAX_LINE_COUNT + 1);
        if content.len() as u64 > MAX_FILE_SIZE {
            return;
        }
        let file = temp_file_with(".arith", &content);

        assert_matches!(
            FileProcessor::new().process_file(file.path()),
            Err(FileProcessorError::TooManyLines { .. })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = tempfile::Builder::new().suffix(".arith").tempfile().unwrap();
        file.write_all(&[0x31, 0xff, 0xfe]).unwrap();

        assert_matches!(
            FileProcessor::new().process_file(file.path()),
            Err(FileProcessorError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("x.arith"),
            size: 2048,
            extension: Some("arith".to_string()),
            line_count: 1,
            modified: None,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
    }
}
