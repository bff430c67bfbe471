use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Dataset source returned status {status}: {source_url}")]
    SourceStatusError { status: u16, source_url: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{control} must be between {min} and {max}, got {value}")]
    ControlOutOfRange {
        control: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Unknown command: {input}")]
    UnknownCommand { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::ZipError(_) | DashError::IoError(_) => ErrorCategory::Io,
            DashError::HttpError(_) | DashError::SourceStatusError { .. } => {
                ErrorCategory::Network
            }
            DashError::CsvError(_)
            | DashError::SerializationError(_)
            | DashError::MissingColumn { .. } => ErrorCategory::Data,
            DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashError::ControlOutOfRange { .. } | DashError::UnknownCommand { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 互動輸入錯誤只需提示
            DashError::ControlOutOfRange { .. } | DashError::UnknownCommand { .. } => {
                ErrorSeverity::Low
            }
            DashError::HttpError(_) | DashError::SourceStatusError { .. } => {
                ErrorSeverity::Medium
            }
            DashError::CsvError(_)
            | DashError::SerializationError(_)
            | DashError::MissingColumn { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::MissingConfigError { .. } => ErrorSeverity::High,
            DashError::ZipError(_) | DashError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DashError::ZipError(_) => "Check free disk space and retry without --bundle".to_string(),
            DashError::HttpError(_) | DashError::SourceStatusError { .. } => {
                "Check the dataset URL and network connection, or use a local copy".to_string()
            }
            DashError::CsvError(_) => {
                "Make sure the dataset is a cleaned CSV with numeric Year and CO2 columns"
                    .to_string()
            }
            DashError::IoError(_) => {
                "Check that the dataset path exists and the output path is writable".to_string()
            }
            DashError::SerializationError(_) => "Report this as a bug".to_string(),
            DashError::MissingColumn { column } => {
                format!("Add a '{}' column to the dataset header", column)
            }
            DashError::ConfigValidationError { field, .. }
            | DashError::InvalidConfigValueError { field, .. }
            | DashError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and try again", field)
            }
            DashError::ControlOutOfRange { min, max, .. } => {
                format!("Pick a value between {} and {}", min, max)
            }
            DashError::UnknownCommand { .. } => "Type 'help' to list commands".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File operation failed: {}", self),
            ErrorCategory::Network => format!("Could not fetch the dataset: {}", self),
            ErrorCategory::Data => format!("The dataset could not be read: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => self.to_string(),
        }
    }

    /// 嚴重程度對應的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
