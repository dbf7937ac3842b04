#[derive(Debug)]
pub enum AbotkError {
    UnsupportedFormatError(String),
    MissingColumnError(String),
    MappingFileError(String),
}

impl std::fmt::Display for AbotkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormatError(ext) => write!(
                f,
                "Unsupported sequence file format {ext:?}. Supported suffixes are .fasta, .fa, .fastq and .fq"
            ),
            Self::MissingColumnError(column) => {
                write!(f, "The export file has no {column:?} column")
            }
            Self::MappingFileError(msg) => write!(
                f,
                "Invalid mapping file: {msg}. Acc# is expected in column A and Patient Name in column C"
            ),
        }
    }
}
