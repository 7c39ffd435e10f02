//! Grade-item lookup for interactive content instances.
//!
//! The host platform owns a grade item per graded activity instance. When an
//! author edits existing content, the form's maximum grade is seeded from
//! that item. This crate only ever reads grade items.

pub mod error;
pub mod item;
pub mod memory;
pub mod sync;
pub mod traits;

pub use error::{GradeError, GradeResult};
pub use item::{GradeItem, ItemKey};
pub use memory::InMemoryGradeStore;
pub use sync::{GradeSynchronizer, DEFAULT_MODULE_TYPE};
pub use traits::GradeStore;
