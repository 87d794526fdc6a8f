mod error;
pub use error::{ExecError, ExecResult};

pub mod stage;
pub use stage::StagedProbe;

pub mod probe;
pub use probe::{NativeRuntime, Runtime};

pub mod usage;
pub use usage::{cost, cpu_time};

pub mod prelude {
    pub use crate::error::{ExecError, ExecResult};
    pub use crate::probe::{NativeRuntime, Runtime};
    pub use crate::stage::StagedProbe;
    pub use crate::usage::{cost, cpu_time};
}
