mod common;
use common::{TEST_EXPORT, TEST_FASTA, TEST_FASTQ, TEST_MAPPING_XLSX};

#[cfg(test)]
mod io {
    use super::*;

    use std::io::Write;
    use std::path::{Path, PathBuf};

    use abotk::io::{create_output_file, load_seq_records, read_renaming_file};

    #[test]
    fn load_fasta_records() {
        let file = PathBuf::from(TEST_FASTA);
        let records: Vec<_> = load_seq_records(&file)
            .unwrap()
            .map(|(i, record)| (i, record.unwrap()))
            .collect();

        let indices: Vec<usize> = records.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        assert_eq!(records[0].1.id, "read1");
        assert_eq!(records[0].1.desc.as_deref(), Some("first exon"));
        assert_eq!(records[0].1.seq, b"ACGTACGTACGT");
        assert!(records[0].1.qual.is_none());
        assert_eq!(records[1].1.id, "read2");
        assert_eq!(records[2].1.seq, b"ACGT");

        // A fresh call yields the identical sequence, the source is untouched
        let again: Vec<_> = load_seq_records(&file)
            .unwrap()
            .map(|(i, record)| (i, record.unwrap()))
            .collect();
        assert_eq!(records, again);
    }

    #[test]
    fn load_fastq_records() {
        let file = PathBuf::from(TEST_FASTQ);
        let records: Vec<_> = load_seq_records(&file)
            .unwrap()
            .map(|(i, record)| (i, record.unwrap()))
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1.id, "read1");
        assert_eq!(records[0].1.qual.as_deref(), Some(b"IIIIIIII".as_slice()));
        assert_eq!(records[1].1.seq, b"TTTTGGGG");
    }

    #[test]
    fn unsupported_suffix_is_rejected() {
        let result = load_seq_records(Path::new(TEST_EXPORT));
        let err = result.err().unwrap().to_string();
        assert!(err.contains("Unsupported sequence file format"));
    }

    #[test]
    fn create_output_file_makes_missing_directories() {
        let path = PathBuf::from("tests/results/io/nested/deep/out.txt");
        let mut file = create_output_file(&path).unwrap();
        file.write_all(b"hello\n").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");

        // Pre-existing directories are not an error, the file is truncated
        let mut file = create_output_file(&path).unwrap();
        file.write_all(b"again\n").unwrap();
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "again\n");
    }

    #[test]
    fn read_xlsx_mapping_file() {
        let rows = read_renaming_file(Path::new(TEST_MAPPING_XLSX)).unwrap();

        // Column B is skipped, NA reads as missing, numerics come out as strings
        assert_eq!(
            rows,
            vec![
                ("S1_barcode01".to_string(), "77".to_string()),
                ("S2_barcode02".to_string(), "X9".to_string()),
                ("S4_barcode04".to_string(), String::new()),
                ("S5_barcode05".to_string(), "123,456".to_string()),
            ]
        );
    }
}
