//! Core data model definitions shared across taskdeck crates.
//!
//! The server, the carousel client and the CLI all speak in terms of these
//! types. Wire (de)serialization is behind the `serde` feature so the engine
//! side can use the types without pulling serde in.
#![allow(missing_docs)]

pub mod error;
pub mod filter_types;
pub mod ids;
pub mod page;
pub mod task;

pub use error::{ModelError, Result as ModelResult};
pub use filter_types::{Priority, StatusFilter};
pub use ids::TaskId;
pub use page::TaskPage;
pub use task::{DeleteTaskResponse, Task, TaskDraft};
