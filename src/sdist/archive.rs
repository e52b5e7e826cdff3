// src/sdist/archive.rs

//! Reproducible tar.gz writing
//!
//! Every entry gets the same ownership, a normalized mode and (optionally) a
//! fixed mtime, so the same inputs always produce the same bytes. The archive
//! is staged in a temporary file beside the target and only renamed into
//! place once both the tar and gzip streams finished cleanly.

use crate::error::Result;
use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tar::{Builder, EntryType, Header};
use tempfile::NamedTempFile;
use tracing::debug;

/// Longest name/link name a plain ustar header field holds
const USTAR_NAME_LEN: usize = 100;

/// Normalize permission bits to 0o644, or 0o755 when owner-executable
pub fn normalize_file_permissions(mode: u32) -> u32 {
    let mode = mode & 0o777;
    let mut new_mode = (mode | 0o644) & !0o133;
    if mode & 0o100 != 0 {
        new_mode |= 0o111;
    }
    new_mode
}

/// Apply the reproducibility stamp to a header
///
/// uid/gid become 0, user and group names empty, the mode is normalized and
/// the mtime replaced when `mtime` is set.
pub fn clean_header(header: &mut Header, mtime: Option<u64>) -> io::Result<()> {
    header.set_uid(0);
    header.set_gid(0);
    header.set_username("")?;
    header.set_groupname("")?;
    let mode = header.mode()?;
    header.set_mode(normalize_file_permissions(mode));
    if let Some(mtime) = mtime {
        header.set_mtime(mtime);
    }
    Ok(())
}

/// Gzip-compressed PAX tar archive being written to a staging file
pub struct ArchiveWriter {
    builder: Builder<GzEncoder<NamedTempFile>>,
    target: PathBuf,
    mtime: Option<u64>,
}

impl ArchiveWriter {
    /// Start an archive that will end up at `target`
    ///
    /// `mtime` stamps every entry and the gzip header; without it, entries
    /// read from disk keep their own mtime and the gzip header carries 0.
    pub fn create(target: &Path, mtime: Option<u64>) -> Result<Self> {
        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let staged = tempfile::Builder::new()
            .prefix(".sdistkit-")
            .suffix(".partial")
            .tempfile_in(dir)?;
        debug!("Staging archive in {}", staged.path().display());

        // Name recorded in the gzip header: the tar file it wraps
        let inner_name = target
            .file_name()
            .map(|n| {
                let n = n.to_string_lossy();
                n.strip_suffix(".gz").unwrap_or(&n).to_string()
            })
            .unwrap_or_default();

        let mut gz = GzBuilder::new().filename(inner_name).operating_system(255);
        if let Some(mtime) = mtime {
            gz = gz.mtime(u32::try_from(mtime).unwrap_or(u32::MAX));
        }
        let encoder = gz.write(staged, Compression::best());

        Ok(Self {
            builder: Builder::new(encoder),
            target: target.to_path_buf(),
            mtime,
        })
    }

    /// Add a file from disk under `arcname`
    ///
    /// Regular files are streamed; symlinks are stored as links; anything
    /// else is stored as a bare header.
    pub fn append_path(&mut self, source: &Path, arcname: &str) -> Result<()> {
        let meta = fs::symlink_metadata(source)?;
        let mut header = Header::new_ustar();
        header.set_metadata(&meta);
        clean_header(&mut header, self.mtime)?;

        let file_type = meta.file_type();
        if file_type.is_file() {
            let file = File::open(source)?;
            self.append_entry(&mut header, arcname, None, file)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(source)?;
            let target = target.to_string_lossy().replace('\\', "/");
            header.set_size(0);
            self.append_entry(&mut header, arcname, Some(&target), io::empty())?;
        } else {
            header.set_size(0);
            self.append_entry(&mut header, arcname, None, io::empty())?;
        }
        Ok(())
    }

    /// Add an in-memory file under `arcname`
    pub fn append_bytes(&mut self, arcname: &str, content: &[u8]) -> Result<()> {
        let mut header = Header::new_ustar();
        header.set_entry_type(EntryType::Regular);
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        clean_header(&mut header, self.mtime)?;
        self.append_entry(&mut header, arcname, None, content)?;
        Ok(())
    }

    /// Finish the tar stream, then the gzip stream, then move the archive
    /// onto its target path
    pub fn finish(self) -> Result<PathBuf> {
        let encoder = self.builder.into_inner()?;
        let staged = encoder.finish()?;
        staged.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))?;
        }

        staged.persist(&self.target).map_err(|e| e.error)?;
        Ok(self.target)
    }

    /// Write one entry, moving names that do not fit the ustar header into a
    /// PAX extended header
    fn append_entry<R: Read>(
        &mut self,
        header: &mut Header,
        path: &str,
        link_name: Option<&str>,
        data: R,
    ) -> io::Result<()> {
        let mut pax: Vec<(&str, &[u8])> = Vec::new();

        if path.len() > USTAR_NAME_LEN || header.set_path(path).is_err() {
            pax.push(("path", path.as_bytes()));
            header.set_path(truncate_name(path))?;
        }
        if let Some(link_name) = link_name
            && header.set_link_name(link_name).is_err()
        {
            pax.push(("linkpath", link_name.as_bytes()));
            header.set_link_name(truncate_name(link_name))?;
        }

        if !pax.is_empty() {
            self.builder.append_pax_extensions(pax)?;
        }

        header.set_cksum();
        self.builder.append(header, data)
    }
}

/// First bytes of `name` that fit a ustar name field, cut on a char boundary
fn truncate_name(name: &str) -> &str {
    if name.len() <= USTAR_NAME_LEN {
        return name;
    }
    let mut end = USTAR_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
