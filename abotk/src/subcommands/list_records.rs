use std::path::PathBuf;

use color_eyre::Result;

use crate::io::load_seq_records;

/// Print `index`, `id` and sequence length for every record in the file.
pub fn run(file: PathBuf) -> Result<()> {
    for (index, record) in load_seq_records(&file)? {
        let record = record?;
        println!("{index}\t{}\t{}", record.id, record.seq.len());
    }
    Ok(())
}
