use std::fs::File;
use std::path::{Path, PathBuf};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use indexmap::IndexMap;
use regex::Regex;

use crate::error::AbotkError::MissingColumnError;
use crate::io::{get_csv_reader, open_csv_writer, read_renaming_file};
use crate::structs::{MappingRecord, Table, WriteOutcome};
use crate::utils::{date_suffix, normalize_sample_id, SAMPLE_ID_PATTERN};

pub const SAMPLE_ID_COL: &str = "Sample ID";
pub const GRID_COL: &str = "Grid_number";
pub const SEQUENCING_ACC_COL: &str = "SequencingAcc#";

/// Turn raw (accession, patient name) pairs into usable mapping records.
///
/// The grid number keeps only its first comma-separated token. Rows with a
/// missing accession or grid, and rows whose grid starts with a letter
/// (non-numeric grid codes), are dropped. Survivors keep their order.
pub fn preprocess_renaming_file(rows: Vec<(String, String)>) -> Vec<MappingRecord> {
    rows.into_iter()
        .filter_map(|(acc, patient)| {
            let grid = patient.split(',').next().unwrap_or_default().trim().to_string();
            match acc.is_empty() || grid.is_empty() {
                true => None,
                false => Some(MappingRecord {
                    sample_id: acc,
                    grid_number: grid,
                }),
            }
        })
        .filter(|record| !record.grid_number.starts_with(|c: char| c.is_ascii_alphabetic()))
        .collect()
}

/// Strip the barcode suffix off every mapping accession before joining.
pub fn normalize_mapping_keys(mapping: &mut [MappingRecord], pattern: &Regex) {
    for record in mapping {
        record.sample_id = normalize_sample_id(pattern, &record.sample_id).into_inner();
    }
}

/// Read the pipeline export verbatim: all columns, in order.
pub fn read_final_export_file(path: &Path) -> Result<Table> {
    let file = File::open(path).wrap_err(eyre!("failed to open {path:?}"))?;
    let mut rdr = get_csv_reader(file);

    let header: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = vec![];
    for line in rdr.records() {
        let record = line?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(Table { header, rows })
}

/// Left join the export onto the mapping, keyed explicitly on the
/// "Sample ID" column. The normalized key is only used for matching, the
/// export keeps its original accessions. Export rows without a match get
/// an empty grid number. The first mapping record wins on duplicate keys.
pub fn merge_tables(mut export: Table, mapping: &[MappingRecord], pattern: &Regex) -> Result<Table> {
    let sample_idx = export
        .column_index(SAMPLE_ID_COL)
        .ok_or_else(|| eyre!(MissingColumnError(SAMPLE_ID_COL.to_string())))?;

    let mut grid_by_key: IndexMap<&str, &str> = IndexMap::new();
    for record in mapping {
        grid_by_key
            .entry(record.sample_id.as_str())
            .or_insert(record.grid_number.as_str());
    }

    let grids = export
        .rows
        .iter()
        .map(|row| {
            let key = normalize_sample_id(pattern, &row[sample_idx]);
            grid_by_key
                .get(key.as_str())
                .map_or_else(String::new, |grid| (*grid).to_string())
        })
        .collect();

    export.push_column(GRID_COL, grids);
    Ok(export)
}

fn output_paths(outdir: &Path, date: &str) -> (PathBuf, PathBuf) {
    (
        outdir.join(format!("MatchPointExport_with_sequencingAcc_{date}.txt")),
        outdir.join(format!("MatchPointExport_{date}.txt")),
    )
}

fn write_table(table: &Table, path: &Path) -> Result<()> {
    let mut wrtr = open_csv_writer(path)?;
    wrtr.write_record(&table.header)?;
    for row in &table.rows {
        wrtr.write_record(row)?;
    }
    wrtr.flush()?;
    Ok(())
}

/// Write both MatchPoint exports with the current date as suffix and
/// report each file separately.
pub fn write_outputs(with_acc: &Table, without_acc: &Table, outdir: &Path) -> Vec<WriteOutcome> {
    let (path_with, path_without) = output_paths(outdir, &date_suffix());

    [(with_acc, path_with), (without_acc, path_without)]
        .into_iter()
        .map(|(table, path)| {
            let result = write_table(table, &path);
            WriteOutcome { path, result }
        })
        .collect()
}

/// Replace the obfuscated sequencing accessions of a pipeline export with
/// patient grid numbers from the deobfuscation file, for import into
/// MatchPoint.
pub fn run(final_export_file: PathBuf, deobfuscation: PathBuf, outdir: PathBuf) -> Result<()> {
    let pattern = Regex::new(SAMPLE_ID_PATTERN)?;

    let renaming_file = read_renaming_file(&deobfuscation)?;
    let mut mapping = preprocess_renaming_file(renaming_file);
    tracing::info!(
        "Read {} usable mapping records from {deobfuscation:?}",
        mapping.len()
    );

    normalize_mapping_keys(&mut mapping, &pattern);

    let final_export = read_final_export_file(&final_export_file)?;
    tracing::info!(
        "Read {} export rows from {final_export_file:?}",
        final_export.rows.len()
    );

    let mut merged = merge_tables(final_export, &mapping, &pattern)?;
    merged.move_column_first(GRID_COL);
    merged.rename_column(SAMPLE_ID_COL, SEQUENCING_ACC_COL);
    merged.rename_column(GRID_COL, SAMPLE_ID_COL);

    let without_accession = merged.without_column(SEQUENCING_ACC_COL);

    // Best effort: a failed write is logged, not raised
    for outcome in write_outputs(&merged, &without_accession, &outdir) {
        match &outcome.result {
            Ok(()) => tracing::info!("Wrote {:?}", outcome.path),
            Err(err) => tracing::error!("Error writing {:?}: {err}", outcome.path),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[(&str, &str)]) -> Vec<(String, String)> {
        rows.iter()
            .map(|(a, p)| (a.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn test_preprocess_drops_lettered_grids() {
        let records = preprocess_renaming_file(raw(&[
            ("S1_barcode01", "A123"),
            ("S2_barcode02", "123,456"),
            ("S3_barcode03", "789"),
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sample_id, "S2_barcode02");
        assert_eq!(records[0].grid_number, "123");
        assert_eq!(records[1].grid_number, "789");
    }

    #[test]
    fn test_preprocess_drops_missing_values() {
        let records = preprocess_renaming_file(raw(&[
            ("", "123"),
            ("S1_barcode01", ""),
            ("S2_barcode02", "55"),
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].grid_number, "55");
    }

    #[test]
    fn test_merge_keeps_unmatched_rows() {
        let pattern = Regex::new(SAMPLE_ID_PATTERN).unwrap();
        let export = Table {
            header: vec!["Sample ID".into(), "Value".into()],
            rows: vec![
                vec!["S1_barcode01".into(), "10".into()],
                vec!["S3_barcode03".into(), "30".into()],
            ],
        };
        let mut mapping = vec![MappingRecord {
            sample_id: "S1_barcode01".into(),
            grid_number: "77".into(),
        }];
        normalize_mapping_keys(&mut mapping, &pattern);

        let merged = merge_tables(export, &mapping, &pattern).unwrap();

        assert_eq!(merged.header, vec!["Sample ID", "Value", "Grid_number"]);
        // Original accessions survive the join
        assert_eq!(merged.rows[0], vec!["S1_barcode01", "10", "77"]);
        assert_eq!(merged.rows[1], vec!["S3_barcode03", "30", ""]);
    }

    #[test]
    fn test_merge_without_sample_id_column() {
        let pattern = Regex::new(SAMPLE_ID_PATTERN).unwrap();
        let export = Table {
            header: vec!["Value".into()],
            rows: vec![],
        };
        let result = merge_tables(export, &[], &pattern);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_first_mapping_record_wins() {
        let pattern = Regex::new(SAMPLE_ID_PATTERN).unwrap();
        let export = Table {
            header: vec!["Sample ID".into()],
            rows: vec![vec!["S1".into()]],
        };
        let mapping = vec![
            MappingRecord {
                sample_id: "S1".into(),
                grid_number: "11".into(),
            },
            MappingRecord {
                sample_id: "S1".into(),
                grid_number: "22".into(),
            },
        ];

        let merged = merge_tables(export, &mapping, &pattern).unwrap();
        assert_eq!(merged.rows[0], vec!["S1", "11"]);
    }

    #[test]
    fn test_output_paths() {
        let (with_acc, without_acc) = output_paths(&PathBuf::from("out"), "2024_01_31");
        assert_eq!(
            with_acc,
            PathBuf::from("out/MatchPointExport_with_sequencingAcc_2024_01_31.txt")
        );
        assert_eq!(without_acc, PathBuf::from("out/MatchPointExport_2024_01_31.txt"));
    }
}
