// src/metadata.rs

//! Package metadata (sdist.toml) parsing and the module descriptor
//!
//! The metadata file describes the distribution; the module descriptor says
//! where its importable code lives and whether it is a package directory or
//! a single `.py` file.

use crate::requirements::NO_EXTRA;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default metadata file name
pub const METADATA_FILE: &str = "sdist.toml";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read metadata file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse metadata: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid metadata: {0}")]
    Invalid(String),

    #[error("No file/folder found for module {name} in {}", dir.display())]
    ModuleNotFound { name: String, dir: PathBuf },
}

/// Root structure of sdist.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataFile {
    pub metadata: Metadata,

    /// Console scripts shorthand (`name = "module:function"`)
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,

    /// Entry point groups: group name -> (name -> object reference)
    #[serde(default)]
    pub entrypoints: BTreeMap<String, BTreeMap<String, String>>,
}

/// Distribution metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Metadata {
    /// Import name of the module or package
    pub module: String,
    /// Distribution name; defaults to the module name
    #[serde(default)]
    pub dist_name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub home_page: String,
    #[serde(default)]
    pub requires_python: Option<String>,
    /// Requirements that belong to no extra
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub requires_extra: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    /// Distribution name used in archive and file names
    pub fn name(&self) -> &str {
        self.dist_name.as_deref().unwrap_or(&self.module)
    }

    /// Requirements keyed by extra, with [`NO_EXTRA`] for base requirements
    pub fn reqs_by_extra(&self) -> impl Iterator<Item = (&str, impl Iterator<Item = &str>)> {
        std::iter::once((NO_EXTRA, &self.requires))
            .chain(self.requires_extra.iter().map(|(k, v)| (k.as_str(), v)))
            .map(|(extra, reqs)| (extra, reqs.iter().map(String::as_str)))
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.module.is_empty() {
            return Err(MetadataError::MissingField("metadata.module".to_string()));
        }
        if self.name().is_empty() {
            return Err(MetadataError::MissingField("metadata.dist-name".to_string()));
        }
        if self.version.is_empty() {
            return Err(MetadataError::MissingField("metadata.version".to_string()));
        }
        if self.requires_extra.contains_key(NO_EXTRA) {
            return Err(MetadataError::Invalid(format!(
                "'{}' is not a valid extra name",
                NO_EXTRA
            )));
        }
        Ok(())
    }
}

impl MetadataFile {
    /// Load metadata from a file path
    pub fn from_file(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse metadata from a TOML string
    pub fn parse(content: &str) -> Result<Self, MetadataError> {
        let file: MetadataFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        self.metadata.validate()?;
        if !self.scripts.is_empty() && self.entrypoints.contains_key("console_scripts") {
            return Err(MetadataError::Invalid(
                "use either [scripts] or [entrypoints.console_scripts], not both".to_string(),
            ));
        }
        Ok(())
    }

    /// All entry point groups, with `[scripts]` folded into `console_scripts`
    pub fn entry_points(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut groups = self.entrypoints.clone();
        if !self.scripts.is_empty() {
            groups.insert("console_scripts".to_string(), self.scripts.clone());
        }
        groups
    }
}

/// Where a distribution's importable code lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Import name
    pub name: String,
    /// Package directory or `.py` file
    pub path: PathBuf,
    /// True for a directory with `__init__.py`, false for a single file
    pub is_package: bool,
}

impl Module {
    /// Locate module `name` inside `directory`
    pub fn resolve(name: &str, directory: &Path) -> Result<Self, MetadataError> {
        let pkg_dir = directory.join(name);
        let py_file = directory.join(format!("{}.py", name));
        let is_package = pkg_dir.join("__init__.py").is_file();
        let is_file = py_file.is_file();

        match (is_package, is_file) {
            (true, true) => Err(MetadataError::Invalid(format!(
                "Both {} and {} exist",
                pkg_dir.display(),
                py_file.display()
            ))),
            (true, false) => Ok(Self {
                name: name.to_string(),
                path: pkg_dir,
                is_package: true,
            }),
            (false, true) => Ok(Self {
                name: name.to_string(),
                path: py_file,
                is_package: false,
            }),
            (false, false) => Err(MetadataError::ModuleNotFound {
                name: name.to_string(),
                dir: directory.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FULL: &str = r#"
[metadata]
module = "foo"
dist-name = "foo-dist"
version = "1.0"
summary = "Foo."
author = "A"
author-email = "a@example.com"
home-page = "https://example.com/foo"
requires-python = ">=3.6"
requires = ["requests (>=2.0)"]

[metadata.requires-extra]
test = ["pytest", "mock; python_version < '3'"]

[scripts]
foo = "foo:main"

[entrypoints."pygments.lexers"]
foo = "foo.lexer:FooLexer"
"#;

    #[test]
    fn test_parse_full() {
        let file = MetadataFile::parse(FULL).unwrap();
        let md = &file.metadata;
        assert_eq!(md.name(), "foo-dist");
        assert_eq!(md.module, "foo");
        assert_eq!(md.version, "1.0");
        assert_eq!(md.author_email, "a@example.com");
        assert_eq!(md.requires_python.as_deref(), Some(">=3.6"));
        assert_eq!(md.requires_extra["test"].len(), 2);

        let eps = file.entry_points();
        assert_eq!(eps["console_scripts"]["foo"], "foo:main");
        assert_eq!(eps["pygments.lexers"]["foo"], "foo.lexer:FooLexer");
    }

    #[test]
    fn test_parse_minimal_defaults() {
        let file = MetadataFile::parse("[metadata]\nmodule = \"bar\"\nversion = \"0.1\"\n").unwrap();
        assert_eq!(file.metadata.name(), "bar");
        assert_eq!(file.metadata.summary, "");
        assert_eq!(file.metadata.home_page, "");
        assert!(file.metadata.requires_python.is_none());
        assert!(file.entry_points().is_empty());
    }

    #[test]
    fn test_reqs_by_extra_puts_base_first() {
        let file = MetadataFile::parse(FULL).unwrap();
        let extras: Vec<(&str, Vec<&str>)> = file
            .metadata
            .reqs_by_extra()
            .map(|(extra, reqs)| (extra, reqs.collect()))
            .collect();
        assert_eq!(extras[0], (NO_EXTRA, vec!["requests (>=2.0)"]));
        assert_eq!(extras[1].0, "test");
    }

    #[test]
    fn test_missing_version_rejected() {
        let err = MetadataFile::parse("[metadata]\nmodule = \"bar\"\nversion = \"\"\n").unwrap_err();
        assert!(matches!(err, MetadataError::MissingField(f) if f == "metadata.version"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = MetadataFile::parse("[metadata]\nmodule = \"b\"\nversion = \"1\"\nhomepage = \"x\"\n")
            .unwrap_err();
        assert!(matches!(err, MetadataError::ParseError(_)));
    }

    #[test]
    fn test_scripts_and_console_scripts_conflict() {
        let content = "[metadata]\nmodule = \"b\"\nversion = \"1\"\n\n[scripts]\nb = \"b:main\"\n\n[entrypoints.console_scripts]\nc = \"b:other\"\n";
        assert!(matches!(
            MetadataFile::parse(content),
            Err(MetadataError::Invalid(_))
        ));
    }

    #[test]
    fn test_module_resolution() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("single.py"), b"").unwrap();
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        fs::write(temp.path().join("pkg/__init__.py"), b"").unwrap();

        let single = Module::resolve("single", temp.path()).unwrap();
        assert!(!single.is_package);
        assert_eq!(single.path, temp.path().join("single.py"));

        let pkg = Module::resolve("pkg", temp.path()).unwrap();
        assert!(pkg.is_package);
        assert_eq!(pkg.path, temp.path().join("pkg"));

        assert!(matches!(
            Module::resolve("missing", temp.path()),
            Err(MetadataError::ModuleNotFound { .. })
        ));
    }

    #[test]
    fn test_module_ambiguous() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("both.py"), b"").unwrap();
        fs::create_dir_all(temp.path().join("both")).unwrap();
        fs::write(temp.path().join("both/__init__.py"), b"").unwrap();

        assert!(matches!(
            Module::resolve("both", temp.path()),
            Err(MetadataError::Invalid(_))
        ));
    }
}
