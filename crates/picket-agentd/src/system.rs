//! Host identity reported to the controller.

/// Normalized lowercase OS identifier (`linux`, `macos`, `windows`, ...).
///
/// `std::env::consts::OS` is already lowercase, which is the form the
/// controller keys payload selection on.
#[inline]
pub fn platform() -> &'static str {
    std::env::consts::OS
}
