//! Column layout of IDG target list files.

use std::path::Path;

use idgprep_common::{IdgPrepError, Result};

/// Header every input file must carry, compared case-insensitively.
pub const EXPECTED_HEADER: [&str; 2] = ["gene", "idgfamily"];

/// Header written to the consolidated output.
pub const OUTPUT_HEADER: [&str; 2] = ["Gene", "IDGFamily"];

/// Check an input header row against [`EXPECTED_HEADER`].
///
/// Fields are lower-cased and compared in order; a different field count
/// is a mismatch too.
pub fn validate_header<'a, I>(file: &Path, fields: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let found: Vec<String> = fields.into_iter().map(str::to_string).collect();
    let matches = found.len() == EXPECTED_HEADER.len()
        && found
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(field, expected)| field.to_lowercase() == expected);

    if matches {
        Ok(())
    } else {
        Err(IdgPrepError::HeaderMismatch {
            file: file.to_path_buf(),
            expected: EXPECTED_HEADER.iter().map(|s| s.to_string()).collect(),
            found,
        })
    }
}
