//! Zip container expansion.
//!
//! An archive is flattened to its member `(name, content)` pairs; only
//! members with a supported extension are kept, and directories are
//! skipped. Non-matching members are ignored silently; they are not
//! errors. An archive whose qualifying-member list comes back empty is the
//! orchestrator's problem to report.

use std::io::{Cursor, Read};

use crate::error::Result;
use crate::types::file::RawFile;

/// Extensions an archive member may carry to be processed.
const SUPPORTED_EXTENSIONS: [&str; 3] = [".csv", ".txt", ".json"];

/// Whether a member name carries a supported extension.
pub fn is_supported_member(name: &str) -> bool {
    let name = name.to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
}

/// Expand a zip archive into its qualifying members, in the container's
/// listing order.
pub fn expand_archive(bytes: &[u8]) -> Result<Vec<RawFile>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut members = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !is_supported_member(&name) {
            tracing::debug!("skipping archive member with unsupported extension: {}", name);
            continue;
        }

        let mut content = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut content).map_err(zip::result::ZipError::Io)?;
        members.push(RawFile::new(name, content));
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = SimpleFileOptions::default();
            for (name, content) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_expands_supported_members_in_order() {
        let bytes = build_zip(&[
            ("b-results.csv", "x,y\n1,2\n"),
            ("a-errors.summary.txt", "1 \"oops\"\n"),
        ]);

        let members = expand_archive(&bytes).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "b-results.csv");
        assert_eq!(members[1].name, "a-errors.summary.txt");
        assert_eq!(members[0].text(), "x,y\n1,2\n");
    }

    #[test]
    fn test_unsupported_members_are_silently_ignored() {
        let bytes = build_zip(&[
            ("summary-results.csv", "a,b\n1,2\n"),
            ("readme.pdf", "not telemetry"),
        ]);

        let members = expand_archive(&bytes).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "summary-results.csv");
    }

    #[test]
    fn test_empty_archive_yields_no_members() {
        let bytes = build_zip(&[]);
        let members = expand_archive(&bytes).unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        assert!(expand_archive(b"definitely not a zip").is_err());
    }

    #[test]
    fn test_supported_member_check_is_case_insensitive() {
        assert!(is_supported_member("DATA.CSV"));
        assert!(is_supported_member("export.Json"));
        assert!(!is_supported_member("archive.zip"));
        assert!(!is_supported_member("image.png"));
    }
}
