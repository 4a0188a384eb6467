//! JSON configuration and report output for the command-line tools.
//!
//! - `vp_demo`: scene, segments and detection parameters for `vp_demo`.
//! - [`save_report`]: writes a serializable report next to its missing
//!   parent directories.

pub mod vp_demo;

pub use vp_demo::{load_config, PlayerConfig, VpDemoConfig, VpDemoOutputConfig};

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `report` as indented JSON to `path`, creating parent directories.
pub fn save_report<T: Serialize>(path: &Path, report: &T) -> Result<(), String> {
    let report_err = |what: &str, e: &dyn std::fmt::Display| {
        format!("Cannot {what} report {}: {e}", path.display())
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| report_err("create directory for", &e))?;
    }
    let file = File::create(path).map_err(|e| report_err("create", &e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, report).map_err(|e| report_err("serialize", &e))?;
    out.write_all(b"\n")
        .and_then(|_| out.flush())
        .map_err(|e| report_err("write", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_report_creates_nested_directories() {
        let root = std::env::temp_dir().join(format!("offside-vp-report-{}", std::process::id()));
        let path = root.join("runs").join("report.json");
        save_report(&path, &json!({ "vpMode": "computed", "referenceCount": 2 })).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["referenceCount"], 2);
        assert!(text.ends_with('\n'));
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn save_report_names_the_path_on_failure() {
        let file = std::env::temp_dir().join(format!("offside-vp-blocker-{}", std::process::id()));
        fs::write(&file, b"not a directory").unwrap();
        let path = file.join("report.json");
        let err = save_report(&path, &json!({})).unwrap_err();
        assert!(err.contains("report.json"), "{err}");
        fs::remove_file(&file).unwrap();
    }
}
