use thiserror::Error;

/// Errors that may occur while loading or writing a structure.
#[derive(Debug, Error)]
pub enum PDBError {
    /// An `ATOM` or `HETATM` record line could not be parsed
    #[error("Invalid PDB record: {line}")]
    InvalidRecordFormat { line: String },
    /// A field of a PDB record holds an unparsable value
    #[error("Can't parse '{value}' as {field}")]
    FieldParsingError { field: &'static str, value: String },
    /// The file does not look like a PDB-formatted deposit
    #[error("File {file_name} doesn't appear to hold PDB-formatted content")]
    InvalidFileFormat { file_name: String },
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
