//! Source and termination networks.

mod start_terminator;
mod terminator;
mod vsource;

pub use start_terminator::StartTermination;
pub use terminator::EndTermination;
pub use vsource::{SourceKind, VoltageSource};
