//! Scoped staging of probe payloads on local storage.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::{ExecError, ExecResult};

/// A probe payload materialized as a uniquely named file on disk.
///
/// The name carries a random suffix so two stagings can never collide, and
/// the file is unlinked when the guard drops: the loader failing, the write
/// failing, or the cycle completing all release it the same way. Nothing is
/// left behind for a later cycle to find or reuse.
pub struct StagedProbe {
    file: NamedTempFile,
}

impl StagedProbe {
    /// Stage `payload` as a fresh artifact under `dir`.
    ///
    /// The buffer is fully written before the handle is returned, so the
    /// runtime always loads a complete module.
    pub fn write_in(dir: &Path, payload: &[u8]) -> ExecResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("probe-")
            .tempfile_in(dir)
            .map_err(ExecError::Create)?;
        file.write_all(payload).map_err(ExecError::Write)?;

        trace!(
            target: "picket.exec.stage",
            path = %file.path().display(),
            bytes = payload.len(),
            "payload staged"
        );
        Ok(Self { file })
    }

    /// Path the runtime should load.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
