use logstat_core::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// Too many log lines could not be parsed; the report was not written.
    QualityBelowThreshold = 10,

    /// No usable input (no matching log, empty log, no parsed records).
    InputError = 20,

    /// Invalid CLI flags or configuration.
    InvalidConfig = 30,

    /// Reading the log or template, or writing the report, failed.
    IoError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) => Self::InvalidConfig,
            Error::NoLogFound { .. } | Error::EmptyLog { .. } | Error::NoRecords => {
                Self::InputError
            }
            Error::QualityBelowThreshold { .. } => Self::QualityBelowThreshold,
            Error::Io(_) | Error::Json(_) | Error::Template { .. } => Self::IoError,
        }
    }
}
