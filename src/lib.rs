//! # breakname-base
//!
//! Core library for deriving debugger function breakpoint names from C#
//! source selections: parse a file, point at a member, get back the dotted
//! name (`Namespace.Type.Method`) the debugger's "break at function" dialog
//! accepts.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → breakpoint-name resolution and formatting
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rowan CST, typed AST
//! ```
//!
//! Editor integration (commands, clipboard, status messages) lives in host
//! crates; this library is the part they all share.

// ============================================================================
// MODULES (dependency order: parser → ide)
// ============================================================================

/// Parser: Logos lexer, recursive-descent parser, rowan CST, typed AST layer
pub mod parser;

/// IDE features: breakpoint-name resolution and formatting
pub mod ide;

// Re-export the feature entry points
pub use ide::{
    BreakpointTarget, MetadataNameError, MetadataNameSource, SyntacticNameSource, breakpoint_name,
    resolve_target,
};

// Re-export foundation types
pub use parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken, TextRange, TextSize, parse};
