//! `rulex normalize`: print the normalized spec as JSON.

use std::io::Write;
use std::path::Path;

use rulex_spec::{load_spec, spec_to_string};

use crate::CliError;

pub fn normalize_spec(spec_path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let spec = load_spec(spec_path)?;
    writeln!(out, "{}", spec_to_string(&spec)?)?;
    Ok(())
}
