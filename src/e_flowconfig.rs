use crate::e_error::{FlowError, Result};
use crate::prelude::*;
use std::ffi::OsStr;
use std::io::Write;
use tempfile::NamedTempFile;

pub const FLOWCONFIG: &str = ".flowconfig";
/// Ignore nothing, include nothing extra.
pub const MINIMAL_FLOWCONFIG: &str = "[ignore]\n[include]";

/// The flow configuration a check runs under.
///
/// `Temporary` owns a uniquely named scaffold next to the checked file; it is
/// deleted when the value drops, so sibling checks in one directory never
/// share or remove each other's file.
#[derive(Debug)]
pub enum FlowConfigScope {
    Existing(PathBuf),
    Temporary(NamedTempFile),
}

impl FlowConfigScope {
    /// Uses `<dir>/.flowconfig` when present, otherwise writes a minimal
    /// scaffold named `.flowconfig-XXXXXX` in `dir`.
    pub fn prepare(dir: &Path) -> Result<Self> {
        let existing = dir.join(FLOWCONFIG);
        if existing.is_file() {
            debug!("using existing {}", existing.display());
            return Ok(FlowConfigScope::Existing(existing));
        }

        let mut scaffold = tempfile::Builder::new()
            .prefix(".flowconfig-")
            .tempfile_in(dir)
            .map_err(|e| FlowError::io(dir, e))?;
        scaffold
            .write_all(MINIMAL_FLOWCONFIG.as_bytes())
            .and_then(|_| scaffold.flush())
            .map_err(|e| FlowError::io(scaffold.path(), e))?;
        debug!("wrote temporary {}", scaffold.path().display());
        Ok(FlowConfigScope::Temporary(scaffold))
    }

    pub fn path(&self) -> &Path {
        match self {
            FlowConfigScope::Existing(path) => path,
            FlowConfigScope::Temporary(file) => file.path(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, FlowConfigScope::Temporary(_))
    }

    /// The file name to hand to `--flowconfig-name`; `None` when flow will
    /// find `.flowconfig` on its own.
    pub fn flowconfig_name(&self) -> Option<&OsStr> {
        match self {
            FlowConfigScope::Existing(_) => None,
            FlowConfigScope::Temporary(file) => file.path().file_name(),
        }
    }

    /// Removes a temporary scaffold now, reporting failures instead of
    /// swallowing them as a drop would.
    pub fn close(self) -> Result<()> {
        if let FlowConfigScope::Temporary(file) = self {
            let path = file.path().to_path_buf();
            file.close().map_err(|e| FlowError::io(&path, e))?;
            debug!("removed temporary {}", path.display());
        }
        Ok(())
    }
}
