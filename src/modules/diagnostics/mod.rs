mod reporter;

pub use reporter::{ErrorReporter, TracingErrorReporter};
