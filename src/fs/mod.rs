//! Filesystem access for the text pipeline.
//!
//! ```text
//!            ┌──────────────┐
//!            │   Pipeline   │
//!            └──────┬───────┘
//!                   │
//!            ┌──────▼──────┐
//!            │  FileSystem │ (trait)
//!            └──────┬──────┘
//!          ┌────────┴────────┐
//!   ┌──────▼──────┐   ┌──────▼──────┐
//!   │   RealFs    │   │   MockFs    │
//!   │  (std::fs)  │   │  (Testing)  │
//!   └─────────────┘   └─────────────┘
//! ```

pub mod mock;
mod traits;

pub use mock::MockFs;
pub use traits::{FileSystem, RealFs};
