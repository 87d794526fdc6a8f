//! Dynamic loading and invocation of staged probe modules.
//!
//! ## Overview
//!
//! A probe is a native shared object the controller built for this host. The
//! module must export two C entry points:
//! - `attack() -> c_int` performs the technique under test; its return
//!   value is the exit code the controller receives.
//! - `cleanup() -> c_int` reverts whatever `attack` changed; invoked after
//!   `attack` regardless of its outcome, tolerated when absent.
//!
//! The probe runs in-process with the agent's full privileges: its side
//! effects on the host are exactly what the controller is testing detection
//! coverage against, so there is no sandbox. All unsafety is concentrated
//! here, behind the [`Runtime`] trait, and the rest of the agent never
//! touches a raw symbol.

use std::ffi::c_int;
use std::path::Path;

use libloading::{Library, Symbol};
use tracing::{debug, warn};

use crate::error::{ExecError, ExecResult};

/// Required entry point: performs the technique under test.
pub const ENTRY_ATTACK: &str = "attack";
/// Best-effort entry point: reverts the technique's side effects.
pub const ENTRY_CLEANUP: &str = "cleanup";

type EntryFn = unsafe extern "C" fn() -> c_int;

/// Executes a staged probe artifact and yields its exit code.
///
/// The trait is the seam between the cycle and the loader: production code
/// runs [`NativeRuntime`], tests drive the cycle with a scripted stand-in.
pub trait Runtime {
    fn execute(&self, artifact: &Path) -> ExecResult<i32>;
}

/// Production runtime: loads the artifact as a native module, drives its
/// entry points, and unloads it afterwards.
#[derive(Debug, Default)]
pub struct NativeRuntime;

impl Runtime for NativeRuntime {
    fn execute(&self, artifact: &Path) -> ExecResult<i32> {
        // Untrusted code crosses the process boundary here.
        let module =
            unsafe { Library::new(artifact) }.map_err(|e| ExecError::Load(e.to_string()))?;

        let exit_code = {
            let attack: Symbol<EntryFn> =
                unsafe { module.get(ENTRY_ATTACK.as_bytes()) }.map_err(|e| {
                    ExecError::Symbol {
                        name: ENTRY_ATTACK,
                        reason: e.to_string(),
                    }
                })?;
            unsafe { attack() }
        };
        debug!(target: "picket.exec.probe", exit_code, "attack entry point returned");

        // Whatever attack reported, the module still gets its chance to undo
        // the damage. A probe without cleanup is sloppy, not fatal.
        match unsafe { module.get::<EntryFn>(ENTRY_CLEANUP.as_bytes()) } {
            Ok(cleanup) => {
                let cleaned = unsafe { cleanup() };
                if cleaned != 0 {
                    warn!(target: "picket.exec.probe", code = cleaned, "cleanup entry point reported failure");
                }
            }
            Err(e) => {
                warn!(target: "picket.exec.probe", "cleanup entry point unresolved: {e}");
            }
        }

        drop(module);
        Ok(exit_code)
    }
}
