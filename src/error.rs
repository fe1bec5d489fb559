/// Broad failure category. Each kind maps to a distinct process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad selector, unknown item, unusable flag combination.
    Config,
    /// Network, HTTP or payload failure while talking to a source.
    Fetch,
    /// The source returned nothing usable for the requested series.
    DataUnavailable,
    /// Fewer observations than the lag requires (strict policy only).
    InsufficientHistory,
    /// Observations that cannot produce a finite change (e.g. a zero base).
    InvalidData,
    /// Writing results failed.
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Fetch => 3,
            ErrorKind::DataUnavailable => 4,
            ErrorKind::InsufficientHistory => 5,
            ErrorKind::InvalidData => 6,
            ErrorKind::Output => 7,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, message)
    }

    pub fn data_unavailable(series_id: &str) -> Self {
        Self::new(
            ErrorKind::DataUnavailable,
            format!("No observations available for series {series_id}."),
        )
    }

    pub fn insufficient_history(series_id: &str, have: usize, lag: usize) -> Self {
        Self::new(
            ErrorKind::InsufficientHistory,
            format!(
                "Series {series_id} has {have} monthly observations; a lag of {lag} needs at least {}.",
                lag + 1
            ),
        )
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
