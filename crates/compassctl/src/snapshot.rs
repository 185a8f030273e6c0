//! Snapshot export: write the plotted points to a JSON file.

use crate::points::PointStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use compass_common::Point;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    saved_at: DateTime<Utc>,
    points: Vec<&'a Point>,
}

/// Serialize the store, newest point first, as pretty-printed JSON.
pub fn write_snapshot(path: &Path, store: &PointStore) -> Result<()> {
    let snapshot = Snapshot {
        saved_at: Utc::now(),
        points: store.recent().collect(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Default snapshot name in the working directory.
pub fn default_snapshot_path() -> PathBuf {
    PathBuf::from(format!(
        "compass-points-{}.json",
        Utc::now().format("%Y%m%d-%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_common::{Mode, Point, Verdict};

    #[test]
    fn test_snapshot_lists_newest_first() {
        let mut store = PointStore::new();
        for action in ["first", "second"] {
            store.push(Point::from_verdict(
                action,
                "testing",
                Mode::Duty,
                Verdict {
                    x: 0.0,
                    y: 0.0,
                    x_range: None,
                    y_range: None,
                },
            ));
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.json");
        write_snapshot(&path, &store).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let points = value["points"].as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["action"], "second");
        assert_eq!(points[1]["action"], "first");
    }

    #[test]
    fn test_snapshot_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_snapshot(&path, &PointStore::new()).unwrap();
        assert!(path.exists());
    }
}
