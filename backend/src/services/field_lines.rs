//! Lookup of precomputed magnetic field-line files.
//!
//! Two archives live under the resource root:
//!
//! ```text
//! <root>/gong/<YYYY>/<MM>/<YYYY_MM_DD__HH_MM_SS>.json   GONG-derived lines
//! <root>/lines/<YYYY_MM_DD__HH_MM_SS>.json              generic field lines
//! ```
//!
//! Both are published by the static resource server under `resources/`.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use super::error::{ServiceError, ServiceResult};
use super::locator::ResourceLocationBuilder;
use super::resolver::{resolve, scan_candidates};
use crate::config::ResourceSettings;
use crate::models::{hour_bucket_prefix, Candidate, ParsedDate, ResourceLocation};

const GONG_DIR: &str = "gong";
const LINES_DIR: &str = "lines";
const PUBLIC_PREFIX: &str = "resources";

/// Read-only view over the field-line archives.
#[derive(Debug, Clone)]
pub struct FieldLineArchive {
    root: PathBuf,
    gong_month_offset: u32,
    locator: ResourceLocationBuilder,
}

impl FieldLineArchive {
    pub fn new(root: impl Into<PathBuf>, gong_month_offset: u32, locator: ResourceLocationBuilder) -> Self {
        Self {
            root: root.into(),
            gong_month_offset,
            locator,
        }
    }

    pub fn from_settings(settings: &ResourceSettings) -> Self {
        Self::new(
            settings.root.clone(),
            settings.gong_month_offset,
            ResourceLocationBuilder::from_settings(settings),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the GONG field-line file nearest to `date`.
    ///
    /// The archive directory and hour bucket come from `date` shifted back by
    /// the configured month offset; the minute comparison uses `date` itself.
    pub fn locate_gong(&self, host: &str, date: &ParsedDate) -> ServiceResult<ResourceLocation> {
        let indexed = date.months_earlier(self.gong_month_offset)?;
        let relative = format!(
            "{}/{:04}/{:02}",
            GONG_DIR,
            indexed.year(),
            indexed.month()
        );
        self.locate(host, &relative, &indexed, date)
    }

    /// Locate the generic field-line file nearest to `date`.
    pub fn locate_lines(&self, host: &str, date: &ParsedDate) -> ServiceResult<ResourceLocation> {
        self.locate(host, LINES_DIR, date, date)
    }

    fn locate(
        &self,
        host: &str,
        relative: &str,
        bucket: &ParsedDate,
        target: &ParsedDate,
    ) -> ServiceResult<ResourceLocation> {
        let candidates = self.candidates(relative, bucket, target)?;
        let chosen = resolve(target, &candidates)?;
        let location = self
            .locator
            .build(host, &format!("{}/{}", PUBLIC_PREFIX, relative), chosen);

        info!(
            "Resolved {} to {} ({} candidate(s))",
            target,
            chosen.filename(),
            candidates.len()
        );
        Ok(location)
    }

    fn candidates(
        &self,
        relative: &str,
        bucket: &ParsedDate,
        target: &ParsedDate,
    ) -> ServiceResult<Vec<Candidate>> {
        let dir = self.root.join(relative);
        match scan_candidates(&dir, &hour_bucket_prefix(bucket)) {
            Ok(candidates) => Ok(candidates),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ServiceError::NotFound(format!(
                "No data found for {}",
                target
            ))),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to list archive directory {}", dir.display()))
                .map_err(ServiceError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;
    use std::fs;

    fn archive(root: &Path, offset: u32) -> FieldLineArchive {
        FieldLineArchive::new(root, offset, ResourceLocationBuilder::new("http", 8000))
    }

    fn touch(root: &Path, relative: &str, name: &str) {
        let dir = root.join(relative);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), b"{}").unwrap();
    }

    #[test]
    fn test_locate_gong_uses_shifted_directory() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "gong/2023/06", "2023_06_28__20_04_00.json");
        touch(tmp.path(), "gong/2023/06", "2023_06_28__20_34_00.json");
        // Same hour in the unshifted month must be ignored.
        touch(tmp.path(), "gong/2023/07", "2023_07_28__20_30_00.json");

        let date = parse_date("2023-07-28T20:30:00").unwrap();
        let location = archive(tmp.path(), 1).locate_gong("localhost:5000", &date).unwrap();
        assert_eq!(
            location.path,
            "http://localhost:8000/resources/gong/2023/06/2023_06_28__20_34_00.json"
        );
        assert_eq!(location.date, "2023-06-28T20:34:00");
    }

    #[test]
    fn test_locate_gong_without_offset() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "gong/2023/07", "2023_07_28__20_30_00.json");

        let date = parse_date("2023-07-28T20:10:00").unwrap();
        let location = archive(tmp.path(), 0).locate_gong("h", &date).unwrap();
        assert!(location.path.ends_with("/resources/gong/2023/07/2023_07_28__20_30_00.json"));
    }

    #[test]
    fn test_locate_gong_january_rolls_back_year() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "gong/2022/12", "2022_12_05__00_00_00.json");

        let date = parse_date("2023-01-05T00:00:00").unwrap();
        let location = archive(tmp.path(), 1).locate_gong("h", &date).unwrap();
        assert!(location.path.contains("/resources/gong/2022/12/"));
    }

    #[test]
    fn test_locate_gong_missing_month_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let date = parse_date("2023-07-28T20:30:00").unwrap();
        let err = archive(tmp.path(), 1).locate_gong("h", &date).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_locate_gong_empty_hour_bucket_has_no_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "gong/2023/06", "2023_06_28__19_59_00.json");
        touch(tmp.path(), "gong/2023/06", "2023_06_28__21_00_00.json");

        let date = parse_date("2023-07-28T20:30:00").unwrap();
        let err = archive(tmp.path(), 1).locate_gong("h", &date).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_locate_lines() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "lines", "2023_07_28__20_00_00.json");
        touch(tmp.path(), "lines", "2023_07_28__20_50_00.json");

        let date = parse_date("2023-07-28T20:40:00").unwrap();
        let location = archive(tmp.path(), 1).locate_lines("example.org", &date).unwrap();
        assert_eq!(
            location.path,
            "http://example.org:8000/resources/lines/2023_07_28__20_50_00.json"
        );
    }
}
