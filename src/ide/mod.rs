//! IDE features: the breakpoint-name derivation this crate exists for.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: take a tree and a range in, return data out
//! 2. **No editor types**: hosts convert to their own notions at the boundary
//! 3. **Absence is not failure**: "no applicable member" is `Ok(None)`
//!
//! ## Usage
//!
//! ```ignore
//! use breakname::ide::{breakpoint_name, SyntacticNameSource};
//! use breakname::parser::parse;
//! use text_size::{TextRange, TextSize};
//! use tokio_util::sync::CancellationToken;
//!
//! let parsed = parse("class A { void B() { } }");
//! let selection = TextRange::at(TextSize::new(15), TextSize::new(1));
//! let name = breakpoint_name(
//!     &parsed.syntax(),
//!     selection,
//!     &SyntacticNameSource,
//!     &CancellationToken::new(),
//! ).await?;
//! assert_eq!(name.as_deref(), Some("A.B"));
//! ```

mod breakpoint;
mod metadata;

pub use breakpoint::{BreakpointTarget, breakpoint_name, resolve_target};
pub use metadata::{
    MetadataNameError, MetadataNameSource, OperatorArity, SyntacticNameSource,
    operator_method_name,
};
