//! Shared configuration loader for the datafile tools.
//!
//! `defaults/datafile.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`DatafileConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use datafile_parser::WriterOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/datafile.default.toml");

/// Top-level configuration consumed by the datafile tools.
#[derive(Debug, Clone, Deserialize)]
pub struct DatafileConfig {
    pub writer: WriterConfig,
    pub check: CheckConfig,
    pub logging: LoggingConfig,
}

/// Mirrors the knobs exposed by the writer.
#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub indent: String,
    pub precision: usize,
    pub blank_line_between_roots: bool,
}

impl WriterConfig {
    /// Writer options for these settings.
    ///
    /// The indent must be one or more spaces or tabs. Anything else would
    /// change the nesting of the written file when it is read back.
    pub fn options(&self) -> Result<WriterOptions, ConfigError> {
        self.validate()?;
        Ok(WriterOptions {
            indent: self.indent.clone(),
            precision: self.precision,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Message(format!(
                "writer.indent must be one or more spaces or tabs, got {:?}",
                self.indent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    pub report_diagnostics: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Builds a [`DatafileConfig`] from the embedded defaults plus any files and
/// overrides added on top. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only `datafile.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file that is skipped when absent, such as `./datafile.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `writer.blank_line_between_roots` from a
    /// command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer and check the result.
    pub fn build(self) -> Result<DatafileConfig, ConfigError> {
        let config: DatafileConfig = self.builder.build()?.try_deserialize()?;
        config.writer.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in settings with nothing layered on top.
pub fn load_defaults() -> Result<DatafileConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.writer.indent, "\t");
        assert_eq!(config.writer.precision, 8);
        assert!(!config.writer.blank_line_between_roots);
        assert!(config.check.report_diagnostics);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn defaults_match_writer_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.writer.options().unwrap(), WriterOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("writer.precision", 4_i64)
            .expect("override to apply")
            .set_override("logging.level", "debug")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.writer.precision, 4);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile_with_toml();
        writeln!(file, "[writer]\nindent = \"    \"\nblank_line_between_roots = true").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.writer.indent, "    ");
        assert!(config.writer.blank_line_between_roots);
        assert_eq!(config.writer.precision, 8);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/no/such/datafile.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/no/such/datafile.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.writer.precision, 8);
    }

    #[test]
    fn rejects_indent_that_would_flatten_nesting() {
        for indent in ["", "x", " -", "\n"] {
            let result = Loader::new().set_override("writer.indent", indent).unwrap().build();
            let err = result.expect_err("indent should be rejected");
            assert!(err.to_string().contains("writer.indent"), "{indent:?}: {err}");
        }
    }

    #[test]
    fn accepts_spaces_and_tabs_as_indent() {
        for indent in ["  ", "\t", " \t"] {
            let config = Loader::new()
                .set_override("writer.indent", indent)
                .unwrap()
                .build()
                .expect("config to build");
            assert_eq!(config.writer.options().unwrap().indent, indent);
        }
    }

    #[test]
    fn options_recheck_indent_after_manual_edits() {
        let mut writer = load_defaults().unwrap().writer;
        writer.indent = String::new();
        assert!(writer.options().is_err());
    }

    fn tempfile_with_toml() -> tempfile::NamedTempFile {
        tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file")
    }
}
