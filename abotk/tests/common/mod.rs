#![allow(dead_code)]

pub const TEST_FASTA: &str = "tests/data/reads.fasta";
pub const TEST_FASTQ: &str = "tests/data/reads.fq";
pub const TEST_EXPORT: &str = "tests/data/final_export.csv";
pub const TEST_MAPPING_CSV: &str = "tests/data/deobfuscation.csv";
pub const TEST_MAPPING_XLSX: &str = "tests/data/deobfuscation.xlsx";
pub const OUTDIR: &str = "tests/results";
