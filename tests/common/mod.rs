// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use flate2::read::GzDecoder;
use sdistkit::{Result, Vcs};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tar::{Archive, EntryType};
use tempfile::TempDir;

/// Fixed timestamp used for reproducible builds in tests (2020-02-02)
pub const EPOCH: u64 = 1580601600;

/// VCS double answering from fixed lists
#[derive(Debug, Clone, Default)]
pub struct StaticVcs {
    pub tracked: Vec<String>,
    pub untracked: Vec<String>,
}

impl StaticVcs {
    pub fn tracking(files: &[&str]) -> Self {
        Self {
            tracked: files.iter().map(|f| f.to_string()).collect(),
            untracked: Vec::new(),
        }
    }

    pub fn with_untracked(mut self, files: &[&str]) -> Self {
        self.untracked = files.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn boxed(self) -> Box<dyn Vcs> {
        Box::new(self)
    }
}

impl Vcs for StaticVcs {
    fn name(&self) -> &'static str {
        "static"
    }

    fn list_tracked_files(&self, _root: &Path) -> Result<Vec<String>> {
        Ok(self.tracked.clone())
    }

    fn list_untracked_deleted_files(&self, _root: &Path) -> Result<Vec<String>> {
        Ok(self.untracked.clone())
    }
}

/// Write `content` to `root/rel`, creating parent directories
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub const FOO_METADATA: &str = r#"[metadata]
module = "foo"
version = "1.0"
summary = "Foo."
author = "A"
author-email = "a@example.com"
home-page = ""
"#;

/// Single-file module project: `sdist.toml` + `foo.py`
///
/// Returns the TempDir (keep it alive) and the files a VCS would track.
pub fn single_module_project() -> (TempDir, Vec<&'static str>) {
    let temp = tempfile::tempdir().unwrap();
    write_file(temp.path(), "sdist.toml", FOO_METADATA);
    write_file(temp.path(), "foo.py", "\"\"\"Foo.\"\"\"\n\ndef main():\n    pass\n");
    (temp, vec!["foo.py", "sdist.toml"])
}

/// Package project with a sub-package, templates and requirements
pub fn package_project() -> (TempDir, Vec<&'static str>) {
    let temp = tempfile::tempdir().unwrap();
    write_file(
        temp.path(),
        "sdist.toml",
        r#"[metadata]
module = "webapp"
version = "2.1.0"
summary = "A small web application."
author = "B"
author-email = "b@example.com"
home-page = "https://example.com/webapp"
requires-python = ">=3.8"
requires = ["requests (>=2.0)", "jinja2 (3.1)"]

[metadata.requires-extra]
test = ["pytest", "bar (>=2.0); extra == 'test'"]

[scripts]
webapp = "webapp.cli:main"
"#,
    );
    write_file(temp.path(), "webapp/__init__.py", "__version__ = '2.1.0'\n");
    write_file(temp.path(), "webapp/cli.py", "def main():\n    pass\n");
    write_file(temp.path(), "webapp/views/__init__.py", "");
    write_file(temp.path(), "webapp/views/templates/index.html", "<html></html>\n");
    write_file(temp.path(), "webapp/static/style.css", "body {}\n");
    write_file(temp.path(), "README.rst", "webapp\n======\n");
    (
        temp,
        vec![
            "README.rst",
            "sdist.toml",
            "webapp/__init__.py",
            "webapp/cli.py",
            "webapp/static/style.css",
            "webapp/views/__init__.py",
            "webapp/views/templates/index.html",
        ],
    )
}

/// An entry read back from a built archive
#[derive(Debug, Clone)]
pub struct ArchivedEntry {
    pub path: String,
    pub entry_type: EntryType,
    pub mode: u32,
    pub uid: u64,
    pub gid: u64,
    pub username: String,
    pub groupname: String,
    pub mtime: u64,
    pub link_name: Option<String>,
    pub content: Vec<u8>,
}

impl ArchivedEntry {
    pub fn text(&self) -> String {
        String::from_utf8(self.content.clone()).unwrap()
    }
}

/// Read every entry of a .tar.gz archive, in archive order
pub fn read_archive(path: &Path) -> Vec<ArchivedEntry> {
    let mut archive = Archive::new(GzDecoder::new(File::open(path).unwrap()));
    let mut entries = Vec::new();

    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let path = entry.path().unwrap().to_string_lossy().into_owned();
        let link_name = entry
            .link_name()
            .unwrap()
            .map(|l| l.to_string_lossy().into_owned());
        let header = entry.header();
        let mut archived = ArchivedEntry {
            path,
            entry_type: header.entry_type(),
            mode: header.mode().unwrap(),
            uid: header.uid().unwrap(),
            gid: header.gid().unwrap(),
            username: header.username().unwrap().unwrap_or_default().to_string(),
            groupname: header.groupname().unwrap().unwrap_or_default().to_string(),
            mtime: header.mtime().unwrap(),
            link_name,
            content: Vec::new(),
        };
        entry.read_to_end(&mut archived.content).unwrap();
        entries.push(archived);
    }

    entries
}

/// Find an entry by its archive path
pub fn entry<'a>(entries: &'a [ArchivedEntry], path: &str) -> &'a ArchivedEntry {
    entries
        .iter()
        .find(|e| e.path == path)
        .unwrap_or_else(|| panic!("no entry {} in archive", path))
}

/// Modification time stored in a gzip member header
pub fn gzip_mtime(path: &Path) -> u32 {
    let bytes = fs::read(path).unwrap();
    u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]])
}
