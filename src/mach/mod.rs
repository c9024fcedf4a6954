/*!
## Rust Machine Module

This Rust module links parsed programs and steps them one statement at a
time against an execution context and a set of devices.

*/

pub type Address = usize;

/// Upper bound given to arrays used before a DIM.
pub const DEFAULT_ARRAY_BOUND: i64 = 10;

mod analyze;
mod config;
mod context;
mod eval;
mod exec;
mod files;
mod function;
mod link;
mod media;
mod memfs;
mod operation;
mod program;
mod runtime;
mod stack;
mod val;
mod var;

pub mod device;

pub use device::Devices;

pub use analyze::{analyze, Analysis};
pub use config::Config;
pub use context::{Context, KeyState};
pub use function::Function;
pub use link::{LinkTable, Slot};
pub use memfs::MemFs;
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Event, Runtime};
pub use stack::Stack;
pub use val::{Complex, Val};
pub use var::{Array, Var};
