//! JSON export of aggregated profiles.
//!
//! The exported file is the full `report::schema::Profile` surface, pretty
//! printed; `read_profile` is the round trip used by the validate command.

use crate::report::schema::Profile;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write an aggregated profile to a JSON file
///
/// **Public** - called by the analyze command's `--json` export
///
/// Parent directories are created as needed.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path is empty, a directory, or cannot be created
pub fn write_profile(profile: &Profile, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} profile for node {:?} to {}",
        profile.base_name,
        profile.node,
        output_path.display()
    );

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, profile).map_err(OutputError::SerializationFailed)?;

    info!(
        "Wrote {} function(s), {} bytes",
        profile.functions.len(),
        file_size(output_path)
    );

    Ok(())
}

/// Reject paths the writer cannot use before touching the filesystem
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read an exported profile back from disk
///
/// **Public** - backs the validate command and round-trip tests
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error opening the file
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<Profile, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let profile: Profile = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Loaded profile: schema {}, node {:?}, {} function(s)",
        profile.version,
        profile.node,
        profile.functions.len()
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::schema::{FunctionProfile, Profile};
    use tempfile::NamedTempFile;

    fn create_test_profile() -> Profile {
        Profile {
            version: "1.0.0".to_string(),
            base_name: "profiler_".to_string(),
            node: "all".to_string(),
            total_measured_time: 50.0,
            functions: vec![FunctionProfile {
                id: 0,
                name: "main".to_string(),
                rank: 1,
                calls: 5.0,
                total_time: 50.0,
                total_time_self: 40.0,
                total_time_no_recurse: 50.0,
                total_time_in_children: 10.0,
                total_time_recurse: 0.0,
                avg: 10.0,
                std_dev: 3.16,
                percent_time: 80.0,
                parents: vec![],
                children: vec![],
            }],
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_profile() {
        let profile = create_test_profile();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_profile(&profile, path).unwrap();
        let loaded = read_profile(path).unwrap();

        assert_eq!(loaded.version, profile.version);
        assert_eq!(loaded.node, profile.node);
        assert_eq!(loaded.functions.len(), 1);
        assert_eq!(loaded.functions[0].name, "main");
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/profile.json");

        let profile = create_test_profile();
        write_profile(&profile, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
