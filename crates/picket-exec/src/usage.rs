//! Process-wide CPU accounting.
//!
//! Two samples bracket one probe execution; their difference is the cost the
//! report carries. The counter covers the whole process, so the agent's own
//! overhead lands in the bill (an accepted approximation).

use crate::error::{ExecError, ExecResult};

/// Total user + system CPU seconds consumed by this process so far.
///
/// Monotonically non-decreasing on Unix (`getrusage(RUSAGE_SELF)`). On other
/// platforms the sample fails and the caller records zero cost.
pub fn cpu_time() -> ExecResult<f64> {
    #[cfg(unix)]
    {
        unix_impl::cpu_time()
    }

    #[cfg(not(unix))]
    {
        Err(ExecError::Accounting(
            "getrusage is not available on this platform".to_string(),
        ))
    }
}

/// CPU cost between two samples, clamped at zero.
pub fn cost(before: f64, after: f64) -> f64 {
    (after - before).max(0.0)
}

#[cfg(unix)]
mod unix_impl {
    use std::io;
    use std::mem::MaybeUninit;

    use crate::error::{ExecError, ExecResult};

    pub fn cpu_time() -> ExecResult<f64> {
        let mut usage = MaybeUninit::<libc::rusage>::uninit();
        let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if rc != 0 {
            return Err(ExecError::Accounting(
                io::Error::last_os_error().to_string(),
            ));
        }
        let usage = unsafe { usage.assume_init() };
        Ok(seconds(&usage.ru_utime) + seconds(&usage.ru_stime))
    }

    fn seconds(tv: &libc::timeval) -> f64 {
        tv.tv_sec as f64 + tv.tv_usec as f64 * 1e-6
    }
}
