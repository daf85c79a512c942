#![allow(clippy::result_large_err)]

//! Bundles a rendered pipeline document and add-on files into a `.tar.gz`.
//!
//! Entries are written in order (document first) with a fixed mtime so the
//! same inputs always produce the same archive bytes.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use blueprint_types::AddonFile;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path};
use tar::{Builder, EntryType, Header};
use tracing::info;

const FILE_MODE: u32 = 0o644;
const SCRIPT_MODE: u32 = 0o755;

/// Write the archive to `writer` and hand the writer back once finished.
pub fn package<W: Write>(
    document_path: &str,
    document: &str,
    files: &[AddonFile],
    writer: W,
) -> Result<W, AppError> {
    validate_entry_path(document_path)?;
    for file in files {
        validate_entry_path(&file.path)?;
    }

    let mut builder = Builder::new(GzEncoder::new(writer, Compression::default()));
    append_entry(&mut builder, document_path, document.as_bytes())?;
    for file in files {
        append_entry(&mut builder, &file.path, file.content.as_bytes())?;
    }

    let encoder = builder.into_inner().map_err(archive_error)?;
    encoder.finish().map_err(archive_error)
}

/// Write the archive to `archive_path`, creating parent directories.
pub fn package_to_file(
    archive_path: &Path,
    document_path: &str,
    document: &str,
    files: &[AddonFile],
) -> Result<(), AppError> {
    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(archive_path)?;
    let mut writer = package(document_path, document, files, BufWriter::new(file))?;
    writer.flush()?;
    info!(
        archive = %archive_path.display(),
        entries = files.len() + 1,
        "wrote pipeline archive"
    );
    Ok(())
}

/// Archive entry paths must be relative and stay inside the archive root.
pub fn validate_entry_path(path: &str) -> Result<(), AppError> {
    let candidate = Path::new(path);
    let escapes = path.trim().is_empty()
        || candidate
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if escapes {
        let mut error = AppError::new(
            ErrorCategory::PackagingError,
            format!("archive entry path '{}' must be relative without '..'", path),
        )
        .with_code("PKG-002");
        error.add_context("path", path);
        return Err(error);
    }
    Ok(())
}

fn append_entry<W: Write>(
    builder: &mut Builder<W>,
    path: &str,
    content: &[u8],
) -> Result<(), AppError> {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_size(content.len() as u64);
    header.set_mode(mode_for(path));
    header.set_mtime(0);
    builder
        .append_data(&mut header, path, content)
        .map_err(archive_error)
}

/// Unix mode for an archived or scaffolded file; shell scripts are executable.
pub(crate) fn mode_for(path: &str) -> u32 {
    if path.ends_with(".sh") {
        SCRIPT_MODE
    } else {
        FILE_MODE
    }
}

fn archive_error(err: std::io::Error) -> AppError {
    AppError::with_source(
        ErrorCategory::PackagingError,
        "failed to write pipeline archive",
        Box::new(err),
    )
    .with_code("PKG-001")
}
