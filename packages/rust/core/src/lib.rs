//! Pipeline orchestration for orgdash.
//!
//! Ties the forge client and the Markdown renderers together into the two
//! end-to-end workflows: regenerating the full dashboard and refreshing the
//! "Core Repositories" section of an existing document.

pub mod output;
pub mod pipeline;
pub mod update;
