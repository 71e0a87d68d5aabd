use crate::core::error::AppError;

/// Sink for errors caught at a service boundary.
///
/// Reporting is fire-and-forget: implementations must not panic and have no
/// way to fail the request that triggered them.
pub trait ErrorReporter: Send + Sync {
    fn capture_exception(&self, error: &AppError);
}

/// Reports captured errors as structured `tracing` events
pub struct TracingErrorReporter {
    environment: String,
}

impl TracingErrorReporter {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
        }
    }

    fn kind(error: &AppError) -> &'static str {
        match error {
            AppError::Database(_) => "database",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::BadRequest(_) => "bad_request",
            AppError::FetchFailed(_) => "fetch_failed",
        }
    }
}

impl ErrorReporter for TracingErrorReporter {
    fn capture_exception(&self, error: &AppError) {
        tracing::error!(
            environment = %self.environment,
            kind = Self::kind(error),
            error = ?error,
            "Captured exception: {}",
            error
        );
    }
}
