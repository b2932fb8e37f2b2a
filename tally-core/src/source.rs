use crate::{SourceFrame, TallyError};

/// A provider of dated rows (CSV file, in-memory fixture, ...).
///
/// Sources only read and parse; gap handling, bucketing and every derived
/// value are computed by the orchestrator from the returned `SourceFrame`.
pub trait ObservationSource {
    /// Stable name used in logs and error messages.
    fn name(&self) -> &str;

    /// Read every row of the source.
    ///
    /// # Errors
    /// - `Io` if the underlying data cannot be read.
    /// - `MissingColumn` if an expected field is absent.
    /// - `MalformedInput` if a date or value cannot be parsed.
    fn load(&self) -> Result<SourceFrame, TallyError>;
}
