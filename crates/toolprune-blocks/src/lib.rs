//! Block scanning and filtering for toolprune.
//!
//! Walks a source file line by line, recognizes `server.tool(...)` registration
//! blocks, and either keeps each block verbatim or comments it out, depending
//! on whether its name is on an [`AllowList`]:
//!
//! ```text
//! server.tool(                          // server.tool(
//!   "crm_list_emails",          ==>     //   "crm_list_emails",
//!   ...                                 //   ...
//! )                                     // )
//! ```
//!
//! A filtered block is preceded by a `  // [FILTERED] <name>` marker line.
//! Lines outside any block pass through untouched.
//!
//! Recognition is purely textual and driven by a [`BlockBoundary`]. The
//! default [`CallBoundary`] opens a block on a `server.tool(` call and closes
//! it on a line holding only `)` that is followed by a blank line.

pub mod allow_list;
pub mod boundary;
pub mod comment;
pub mod error;
pub mod filter;

pub use allow_list::{AllowList, DEFAULT_TOOLS};
pub use boundary::{BlockBoundary, CallBoundary};
pub use error::{Error, Result};
pub use filter::{
    Block, BlockAction, BlockDecision, BlockFilter, FilterOutcome, FilterSummary,
    UnterminatedBlock, UnterminatedPolicy,
};
