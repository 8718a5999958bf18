//! `check` subcommand: validate the configuration file.

use std::path::Path;

use anyhow::{bail, Context, Result};

use dify_helper_config::{ConfigLoader, ConfigValidator, ValidationResult};

/// Render a validation result the way `check` prints it.
pub(crate) fn render(path: &Path, result: &ValidationResult) -> String {
    let mut out = String::new();
    for error in &result.errors {
        out.push_str(&format!("error: {}: {}\n", error.path, error.message));
    }
    for warning in &result.warnings {
        out.push_str(&format!("warning: {}: {}\n", warning.path, warning.message));
    }
    if result.is_valid() {
        out.push_str(&format!("{}: OK\n", path.display()));
    }
    out
}

pub(crate) fn check(path: &Path) -> Result<()> {
    if !path.exists() {
        println!("{} not found, checking defaults", path.display());
    }

    let config = ConfigLoader::load_or_default(path)
        .with_context(|| format!("loading {}", path.display()))?;
    let result = ConfigValidator::validate(&config)?;
    print!("{}", render(path, &result));

    if !result.is_valid() {
        bail!("{} has {} error(s)", path.display(), result.errors.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_check_valid_file() {
        let file = write_config(
            r#"
[server]
port = 8088

[remote]
base_url = "https://dify.example.com"
"#,
        );
        assert!(check(file.path()).is_ok());
    }

    #[test]
    fn test_check_rejects_bad_url() {
        let file = write_config(
            r#"
[remote]
base_url = "ftp://dify.example.com"
"#,
        );
        assert!(check(file.path()).is_err());
    }

    #[test]
    fn test_render_lists_errors_and_warnings() {
        let file = write_config(
            r#"
[server]
port = 0

[logging]
level = "loud"
"#,
        );
        let config = ConfigLoader::load(file.path()).unwrap();
        let result = ConfigValidator::validate(&config).unwrap();
        let text = render(file.path(), &result);
        assert!(text.contains("error: server.port"));
        assert!(text.contains("warning: logging.level"));
        assert!(!text.contains("OK"));
    }
}
