//! Fixture file loading.

use std::fs;
use std::path::Path;

use crate::errors::{EvalError, EvalResult};
use crate::fixture::EvalFixture;

/// Name of the expected failures file that lives beside the fixtures.
pub const EXPECTED_FAILURES_FILE: &str = "expected-failures.toml";

/// Parse fixture TOML.
pub fn parse_fixture(content: &str) -> EvalResult<EvalFixture> {
    Ok(toml::from_str(content)?)
}

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> EvalResult<EvalFixture> {
    let content = fs::read_to_string(path).map_err(|e| EvalError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content).map_err(|e| EvalError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load all fixtures below a directory (glob: **/*.toml), sorted by their
/// path relative to `dir`.
pub fn load_all_fixtures(dir: &Path) -> EvalResult<Vec<(String, EvalFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, EvalFixture)>,
) -> EvalResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let read_error = |e: std::io::Error| EvalError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml")
            && path.file_name().map_or(true, |name| name != EXPECTED_FAILURES_FILE)
        {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let fixture = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), fixture));
        }
    }

    Ok(())
}
