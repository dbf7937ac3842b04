use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::Path;

use bio::io::{fasta, fastq};
use calamine::{open_workbook_auto, Data, Reader as WorkbookReader};
use color_eyre::eyre::{ensure, eyre, WrapErr};
use color_eyre::Result;
use csv::{Reader, ReaderBuilder, Writer, WriterBuilder};

use crate::error::AbotkError::{MappingFileError, UnsupportedFormatError};

/// Missing-value token used by the lab when exporting the workbook.
const MAPPING_NA: &str = "NA";

/// Sequence file format, resolved from the filename suffix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqFormat {
    Fasta,
    Fastq,
    Unknown,
}

impl SeqFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(OsStr::to_str) {
            Some("fasta" | "fa") => Self::Fasta,
            Some("fastq" | "fq") => Self::Fastq,
            _ => Self::Unknown,
        }
    }
}

/// A sequence record normalized over FASTA and FASTQ. FASTA records carry
/// no qualities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastxRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Option<Vec<u8>>,
}

impl From<fasta::Record> for FastxRecord {
    fn from(record: fasta::Record) -> Self {
        FastxRecord {
            id: record.id().to_string(),
            desc: record.desc().map(String::from),
            seq: record.seq().to_vec(),
            qual: None,
        }
    }
}

impl From<fastq::Record> for FastxRecord {
    fn from(record: fastq::Record) -> Self {
        FastxRecord {
            id: record.id().to_string(),
            desc: record.desc().map(String::from),
            seq: record.seq().to_vec(),
            qual: Some(record.qual().to_vec()),
        }
    }
}

/// Lazy record iterator over either sequence format.
pub enum FastxReader {
    Fasta(fasta::Records<io::BufReader<File>>),
    Fastq(fastq::Records<io::BufReader<File>>),
}

impl Iterator for FastxReader {
    type Item = Result<FastxRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Fasta(records) => records
                .next()
                .map(|record| Ok(record.wrap_err("invalid FASTA record")?.into())),
            Self::Fastq(records) => records
                .next()
                .map(|record| Ok(record.wrap_err("invalid FASTQ record")?.into())),
        }
    }
}

/// Open a sequence file and return its records numbered from 0, in file
/// order. The iterator is finite and not restartable, parse errors
/// surface per record.
pub fn load_seq_records(path: &Path) -> Result<std::iter::Enumerate<FastxReader>> {
    let reader = match SeqFormat::from_path(path) {
        SeqFormat::Fasta => {
            let file = File::open(path).wrap_err(eyre!("failed to open {path:?}"))?;
            FastxReader::Fasta(fasta::Reader::new(file).records())
        }
        SeqFormat::Fastq => {
            let file = File::open(path).wrap_err(eyre!("failed to open {path:?}"))?;
            FastxReader::Fastq(fastq::Reader::new(file).records())
        }
        SeqFormat::Unknown => {
            let extension = path.extension().and_then(OsStr::to_str).unwrap_or_default();
            return Err(eyre!(UnsupportedFormatError(extension.to_string())));
        }
    };
    Ok(reader.enumerate())
}

/// Directory-safe file creation: missing parent directories are created
/// first, then the file is opened with truncate-create semantics. The
/// handle closes on drop on every exit path.
pub fn create_output_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).wrap_err(eyre!("Error creating directory {dir:?}"))?;
        }
    }
    File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .wrap_err(eyre!("failed to open {path:?} for writing"))
}

pub fn get_csv_reader<R: io::Read>(input: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(false)
        .from_reader(input)
}

pub fn get_csv_writer<W: io::Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_writer(output)
}

pub fn open_csv_writer(path: &Path) -> Result<Writer<File>> {
    Ok(get_csv_writer(create_output_file(path)?))
}

/// Deobfuscation file format, the workbook is the primary path.
pub enum MappingFileType {
    Xlsx,
    Csv,
}

impl MappingFileType {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension: &str = path
            .extension()
            .and_then(OsStr::to_str)
            .ok_or_else(|| eyre!("No filetype in path"))?;

        Ok(match extension {
            "xlsx" | "xls" => Self::Xlsx,
            "csv" => Self::Csv,
            _ => {
                return Err(eyre!(
                    "File extension: {extension} is not supported for mapping files"
                ))
            }
        })
    }
}

/// Read the deobfuscation file, keeping only the accession column (A) and
/// the patient name column (C) in row order. The header row is skipped,
/// `NA` and empty cells are read as missing.
pub fn read_renaming_file(path: &Path) -> Result<Vec<(String, String)>> {
    match MappingFileType::from_path(path)? {
        MappingFileType::Xlsx => read_xlsx_mapping(path),
        MappingFileType::Csv => read_csv_mapping(path),
    }
}

fn read_xlsx_mapping(path: &Path) -> Result<Vec<(String, String)>> {
    let mut workbook = open_workbook_auto(path).wrap_err(eyre!("failed to open {path:?}"))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| eyre!(MappingFileError(format!("{path:?} has no worksheets"))))??;

    ensure!(
        range.width() >= 3,
        MappingFileError(format!("{path:?} has only {} columns", range.width()))
    );

    let mut rows = range.rows();
    if let Some(header) = rows.next() {
        warn_on_header(
            &cell_to_string(header.first()),
            &cell_to_string(header.get(2)),
        );
    }

    Ok(rows
        .map(|row| {
            (
                mapping_value(&cell_to_string(row.first())),
                mapping_value(&cell_to_string(row.get(2))),
            )
        })
        .collect())
}

fn read_csv_mapping(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path).wrap_err(eyre!("failed to open {path:?}"))?;
    let mut rdr = get_csv_reader(file);

    let header = rdr.headers()?.clone();
    ensure!(
        header.len() >= 3,
        MappingFileError(format!("{path:?} has only {} columns", header.len()))
    );
    warn_on_header(header.get(0).unwrap_or(""), header.get(2).unwrap_or(""));

    let mut records = vec![];
    for line in rdr.records() {
        let record = line?;
        records.push((
            mapping_value(record.get(0).unwrap_or("")),
            mapping_value(record.get(2).unwrap_or("")),
        ));
    }
    Ok(records)
}

fn warn_on_header(acc: &str, patient: &str) {
    if acc != "Acc#" || patient != "Patient Name" {
        tracing::warn!("Unexpected mapping file header: {acc:?} / {patient:?}");
    }
}

fn mapping_value(raw: &str) -> String {
    let value = raw.trim();
    match value == MAPPING_NA {
        true => String::new(),
        false => value.to_string(),
    }
}

fn cell_to_string(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => format!("{f}"),
        Some(Data::Int(i)) => i.to_string(),
        Some(other) => other.to_string(),
    }
}
