//! Nearest-timestamp selection over archived resource files.
//!
//! Archives are laid out so that one directory listing filtered by an hour
//! prefix (see [`crate::models::hour_bucket_prefix`]) yields every file for
//! that hour. Within the bucket only the minute field is compared.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use super::error::{ServiceError, ServiceResult};
use crate::models::{Candidate, ParsedDate};

/// Absolute minute-of-hour distance between a candidate and the target.
pub fn minute_distance(target: &ParsedDate, candidate: &Candidate) -> u32 {
    target.minute().abs_diff(candidate.minute())
}

/// Select the candidate whose minute is closest to `target`'s minute.
///
/// Ties go to the candidate listed first. An empty slice fails with
/// [`ServiceError::NotFound`].
pub fn resolve<'a>(target: &ParsedDate, candidates: &'a [Candidate]) -> ServiceResult<&'a Candidate> {
    // min_by_key keeps the first of equally minimal elements
    candidates
        .iter()
        .min_by_key(|candidate| minute_distance(target, candidate))
        .ok_or_else(|| ServiceError::NotFound(format!("No data found for {}", target)))
}

/// List the candidates in `dir` whose filename starts with `prefix`.
///
/// Entries are returned in filename order, which for the archive encoding is
/// chronological. Names that do not carry a timestamp are skipped. The
/// listing is a point-in-time snapshot; files written concurrently may or may
/// not appear.
pub fn scan_candidates(dir: &Path, prefix: &str) -> io::Result<Vec<Candidate>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with(prefix) {
            names.push(name);
        }
    }
    names.sort();

    let candidates: Vec<Candidate> = names
        .into_iter()
        .filter_map(|name| {
            let candidate = Candidate::from_filename(name.as_str());
            if candidate.is_none() {
                debug!("Skipping unrecognized archive entry {}/{}", dir.display(), name);
            }
            candidate
        })
        .collect();

    debug!(
        "Scanned {} for prefix {}: {} candidate(s)",
        dir.display(),
        prefix,
        candidates.len()
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn candidate(name: &str) -> Candidate {
        Candidate::from_filename(name).unwrap()
    }

    #[test]
    fn test_resolve_empty_is_not_found() {
        let target = parse_date("2023-06-28T20:25:00").unwrap();
        let err = resolve(&target, &[]).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(err.to_string().contains("2023-06-28T20:25:00"));
    }

    #[test]
    fn test_resolve_single_candidate() {
        let target = parse_date("2023-06-28T20:59:00").unwrap();
        let candidates = vec![candidate("2023_06_28__20_00_14.json")];
        let chosen = resolve(&target, &candidates).unwrap();
        assert_eq!(chosen.filename(), "2023_06_28__20_00_14.json");
    }

    #[test]
    fn test_resolve_tie_goes_to_first_listed() {
        let target = parse_date("2023-06-28T20:25:00").unwrap();
        let candidates = vec![
            candidate("2023_06_28__20_10_00.json"),
            candidate("2023_06_28__20_40_00.json"),
        ];
        assert_eq!(resolve(&target, &candidates).unwrap().minute(), 10);

        let reversed = vec![candidates[1].clone(), candidates[0].clone()];
        assert_eq!(resolve(&target, &reversed).unwrap().minute(), 40);
    }

    #[test]
    fn test_resolve_picks_closest_among_many() {
        let target = parse_date("2023-06-28T20:33:00").unwrap();
        let candidates = vec![
            candidate("2023_06_28__20_04_00.json"),
            candidate("2023_06_28__20_14_00.json"),
            candidate("2023_06_28__20_24_00.json"),
            candidate("2023_06_28__20_34_00.json"),
            candidate("2023_06_28__20_44_00.json"),
        ];
        assert_eq!(resolve(&target, &candidates).unwrap().minute(), 34);
    }

    #[test]
    fn test_resolve_ignores_seconds_and_hour() {
        // Only the minute field takes part in the comparison.
        let target = parse_date("2023-06-28T20:15:59").unwrap();
        let candidates = vec![
            candidate("2023_06_28__21_16_00.json"),
            candidate("2023_06_28__20_13_59.json"),
        ];
        assert_eq!(resolve(&target, &candidates).unwrap().minute(), 16);
    }

    #[test]
    fn test_minute_distance_is_symmetric() {
        let target = parse_date("2023-06-28T20:05:00").unwrap();
        assert_eq!(minute_distance(&target, &candidate("2023_06_28__20_55_00")), 50);
        let target = parse_date("2023-06-28T20:55:00").unwrap();
        assert_eq!(minute_distance(&target, &candidate("2023_06_28__20_05_00")), 50);
    }

    #[test]
    fn test_scan_missing_directory() {
        let err = scan_candidates(Path::new("/definitely/not/here"), "2023").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
