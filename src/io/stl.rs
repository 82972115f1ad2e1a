//! STL pre-conversion through an external `gmsh` executable.
//!
//! Surface triangulations in STL are saved next to the input as Gmsh 2.2
//! files, which [`GmshReader`](crate::io::gmsh::GmshReader) then handles like
//! any other `.msh` input.

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns `true` when `path` has an `.stl` extension (any case).
pub fn is_stl(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"))
}

/// Runs `gmsh <input> -save -format msh22 -o <stem>.msh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StlRemesher {
    /// Executable name or path.
    pub gmsh: PathBuf,
}

impl Default for StlRemesher {
    fn default() -> Self {
        Self {
            gmsh: PathBuf::from("gmsh"),
        }
    }
}

impl StlRemesher {
    pub fn new(gmsh: impl Into<PathBuf>) -> Self {
        Self { gmsh: gmsh.into() }
    }

    /// Where [`remesh`](Self::remesh) writes the converted file for `input`.
    pub fn output_path(input: &Path) -> PathBuf {
        input.with_extension("msh")
    }

    /// The full argument list passed to the gmsh executable.
    pub fn arguments(input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        vec![
            input.as_os_str().to_owned(),
            "-save".into(),
            "-format".into(),
            "msh22".into(),
            "-o".into(),
            output.as_os_str().to_owned(),
        ]
    }

    /// Convert `input` and return the path of the produced `.msh` file.
    pub fn remesh(&self, input: &Path) -> Result<PathBuf, MeshError> {
        let output = Self::output_path(input);
        log::info!(
            "converting {} to {} with {}",
            input.display(),
            output.display(),
            self.gmsh.display()
        );

        let result = Command::new(&self.gmsh)
            .args(Self::arguments(input, &output))
            .output()
            .map_err(|e| {
                MeshError::ExternalTool(format!("failed to launch {}: {e}", self.gmsh.display()))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(MeshError::ExternalTool(format!(
                "{} exited with {}: {}",
                self.gmsh.display(),
                result.status,
                stderr.trim()
            )));
        }
        log::debug!("gmsh stdout: {}", String::from_utf8_lossy(&result.stdout).trim());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_stl_extension() {
        assert!(is_stl(Path::new("part.stl")));
        assert!(is_stl(Path::new("dir/PART.STL")));
        assert!(!is_stl(Path::new("part.msh")));
        assert!(!is_stl(Path::new("stl")));
    }

    #[test]
    fn output_sits_next_to_input() {
        assert_eq!(
            StlRemesher::output_path(Path::new("meshes/part.stl")),
            PathBuf::from("meshes/part.msh")
        );
    }

    #[test]
    fn arguments_request_msh22() {
        let args = StlRemesher::arguments(Path::new("a.stl"), Path::new("a.msh"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["a.stl", "-save", "-format", "msh22", "-o", "a.msh"]);
    }

    #[test]
    fn missing_executable_is_external_tool_error() {
        let remesher = StlRemesher::new("/nonexistent/gmsh-binary-for-tests");
        let err = remesher.remesh(Path::new("part.stl")).unwrap_err();
        assert!(matches!(err, MeshError::ExternalTool(_)));
    }
}
