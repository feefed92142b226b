//! Claude Code hook integration.
//!
//! Claude Code reports every tool call to configured hooks. File-access
//! tools (`Read`, `Write`, `Edit`, ...) trigger just-in-time memory
//! discovery for the touched path; new memory is returned to the session as
//! `additionalContext`.
//!
//! # Components
//!
//! - [`ContextHookHandler`]: routes hook events to a [`MemoryManager`](crate::memory::MemoryManager)
//! - [`HookInput`]: hook payload and accessed-path extraction
//! - [`ContextHookResponse`]: response carrying discovered memory

mod handler;
mod input;
mod response;

pub use handler::*;
pub use input::*;
pub use response::*;
