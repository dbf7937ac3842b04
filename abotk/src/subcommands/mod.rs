/// Rekey a pipeline export with deobfuscated sample IDs
pub mod rename_samples;

/// List the records of a FASTA/FASTQ file
pub mod list_records;
