// ABOTK - ABO sequencing sample toolkit
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! ABOTK - ABO sequencing sample toolkit
//!
//! Small utilities around the ABO sequencing pipeline: loading read files,
//! directory-safe output creation and de-obfuscating sequencing sample
//! identifiers for the MatchPoint export.
//!
//! ABOTK commands
//!
//! * Rename samples in a pipeline export using the deobfuscation workbook
//! * List the records of a FASTA/FASTQ file
//!
//! ## Running ABOTK
//!
//! To print the available commands use:
//! ```bash
//! abotk --help
//! ```
//!
//! To rekey a pipeline export for MatchPoint run:
//! ```bash
//! abotk rename-samples $final_export $deobfuscation -o $outdir
//! ```

#[doc(hidden)]
pub mod io;

/// ABOTK structs
pub mod structs;

#[doc(hidden)]
pub mod utils;

#[doc(hidden)]
pub mod error;

#[cfg(feature = "clap")]
pub mod clap;
