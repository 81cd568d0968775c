//! Metadata (external) member names.
//!
//! Some members compile to a name that differs from their source spelling:
//! indexers become `Item` (or whatever `[IndexerName]` says) and operator
//! declarations become `op_*` methods. The resolver never guesses these; it
//! asks a [`MetadataNameSource`], injected as a capability so hosts with a
//! real semantic model can supply compiler-accurate answers and tests can
//! use a synchronous stand-in.

use smol_str::SmolStr;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::parser::{AstNode, IndexerDecl, OperatorDecl, SyntaxKind, SyntaxNode};

/// Fault channel for metadata-name lookups. Resolution propagates these
/// verbatim; there is no retry and no translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataNameError {
    #[error("metadata name lookup was cancelled")]
    Cancelled,
    #[error("no metadata name for {0:?} declarations")]
    Unsupported(SyntaxKind),
    #[error("malformed declaration: {0}")]
    Malformed(String),
    #[error("{0}")]
    Host(String),
}

/// Maps a member declaration to its compiler-assigned metadata name.
///
/// Invoked at most once per resolution, awaited sequentially, and expected
/// to observe the cancellation token (lookups may suspend on I/O or
/// background computation in a real host).
pub trait MetadataNameSource {
    fn metadata_name(
        &self,
        member: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<SmolStr, MetadataNameError>>;
}

/// The arity of an overloaded operator, read off its parameter list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorArity {
    Unary,
    Binary,
}

/// The canonical metadata method name for an overloadable operator.
///
/// A static, total mapping with no runtime state. `+` and `-` resolve
/// differently by arity; every other token is valid at exactly one arity.
pub fn operator_method_name(token: SyntaxKind, arity: OperatorArity) -> Option<&'static str> {
    use OperatorArity::{Binary, Unary};
    match (token, arity) {
        (SyntaxKind::PLUS, Unary) => Some("op_UnaryPlus"),
        (SyntaxKind::PLUS, Binary) => Some("op_Addition"),
        (SyntaxKind::MINUS, Unary) => Some("op_UnaryNegation"),
        (SyntaxKind::MINUS, Binary) => Some("op_Subtraction"),
        (SyntaxKind::BANG, Unary) => Some("op_LogicalNot"),
        (SyntaxKind::TILDE, Unary) => Some("op_OnesComplement"),
        (SyntaxKind::PLUS_PLUS, Unary) => Some("op_Increment"),
        (SyntaxKind::MINUS_MINUS, Unary) => Some("op_Decrement"),
        (SyntaxKind::TRUE_KW, Unary) => Some("op_True"),
        (SyntaxKind::FALSE_KW, Unary) => Some("op_False"),
        (SyntaxKind::STAR, Binary) => Some("op_Multiply"),
        (SyntaxKind::SLASH, Binary) => Some("op_Division"),
        (SyntaxKind::PERCENT, Binary) => Some("op_Modulus"),
        (SyntaxKind::AMP, Binary) => Some("op_BitwiseAnd"),
        (SyntaxKind::PIPE, Binary) => Some("op_BitwiseOr"),
        (SyntaxKind::CARET, Binary) => Some("op_ExclusiveOr"),
        (SyntaxKind::LT_LT, Binary) => Some("op_LeftShift"),
        (SyntaxKind::GT_GT, Binary) => Some("op_RightShift"),
        (SyntaxKind::GT_GT_GT, Binary) => Some("op_UnsignedRightShift"),
        (SyntaxKind::EQ_EQ, Binary) => Some("op_Equality"),
        (SyntaxKind::BANG_EQ, Binary) => Some("op_Inequality"),
        (SyntaxKind::LT, Binary) => Some("op_LessThan"),
        (SyntaxKind::GT, Binary) => Some("op_GreaterThan"),
        (SyntaxKind::LT_EQ, Binary) => Some("op_LessThanOrEqual"),
        (SyntaxKind::GT_EQ, Binary) => Some("op_GreaterThanOrEqual"),
        _ => None,
    }
}

/// Every (token, arity) pair the table accepts. Kept next to the mapping so
/// the exhaustiveness test fails when an operator is added to one but not
/// the other.
#[cfg(test)]
const OVERLOADABLE_OPERATORS: &[(SyntaxKind, OperatorArity)] = &[
    (SyntaxKind::PLUS, OperatorArity::Unary),
    (SyntaxKind::PLUS, OperatorArity::Binary),
    (SyntaxKind::MINUS, OperatorArity::Unary),
    (SyntaxKind::MINUS, OperatorArity::Binary),
    (SyntaxKind::BANG, OperatorArity::Unary),
    (SyntaxKind::TILDE, OperatorArity::Unary),
    (SyntaxKind::PLUS_PLUS, OperatorArity::Unary),
    (SyntaxKind::MINUS_MINUS, OperatorArity::Unary),
    (SyntaxKind::TRUE_KW, OperatorArity::Unary),
    (SyntaxKind::FALSE_KW, OperatorArity::Unary),
    (SyntaxKind::STAR, OperatorArity::Binary),
    (SyntaxKind::SLASH, OperatorArity::Binary),
    (SyntaxKind::PERCENT, OperatorArity::Binary),
    (SyntaxKind::AMP, OperatorArity::Binary),
    (SyntaxKind::PIPE, OperatorArity::Binary),
    (SyntaxKind::CARET, OperatorArity::Binary),
    (SyntaxKind::LT_LT, OperatorArity::Binary),
    (SyntaxKind::GT_GT, OperatorArity::Binary),
    (SyntaxKind::GT_GT_GT, OperatorArity::Binary),
    (SyntaxKind::EQ_EQ, OperatorArity::Binary),
    (SyntaxKind::BANG_EQ, OperatorArity::Binary),
    (SyntaxKind::LT, OperatorArity::Binary),
    (SyntaxKind::GT, OperatorArity::Binary),
    (SyntaxKind::LT_EQ, OperatorArity::Binary),
    (SyntaxKind::GT_EQ, OperatorArity::Binary),
];

/// A [`MetadataNameSource`] that needs no semantic model: names are derived
/// from the declaration syntax alone.
///
/// Indexers honor `[IndexerName("...")]` and default to `Item`; operators
/// use the canonical table with the arity read from the parameter list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticNameSource;

impl MetadataNameSource for SyntacticNameSource {
    async fn metadata_name(
        &self,
        member: &SyntaxNode,
        cancel: &CancellationToken,
    ) -> Result<SmolStr, MetadataNameError> {
        if cancel.is_cancelled() {
            return Err(MetadataNameError::Cancelled);
        }
        match member.kind() {
            SyntaxKind::INDEXER_DECL => {
                let indexer = IndexerDecl::cast(member.clone())
                    .ok_or(MetadataNameError::Unsupported(member.kind()))?;
                Ok(indexer_metadata_name(&indexer))
            }
            SyntaxKind::OPERATOR_DECL => {
                let op = OperatorDecl::cast(member.clone())
                    .ok_or(MetadataNameError::Unsupported(member.kind()))?;
                operator_metadata_name(&op)
            }
            other => Err(MetadataNameError::Unsupported(other)),
        }
    }
}

/// `[IndexerName("X")]` renames the generated indexer member; otherwise the
/// compiler calls it `Item`.
fn indexer_metadata_name(indexer: &IndexerDecl) -> SmolStr {
    for list in indexer.attribute_lists() {
        let tokens: Vec<_> = list.tokens().filter(|t| !t.kind().is_trivia()).collect();
        for window in tokens.windows(3) {
            let [name, open, arg] = window else { continue };
            if name.kind() == SyntaxKind::IDENT
                && name.text() == "IndexerName"
                && open.kind() == SyntaxKind::L_PAREN
                && arg.kind() == SyntaxKind::STRING_LIT
            {
                if let Some(value) = string_literal_value(arg.text()) {
                    return SmolStr::new(value);
                }
            }
        }
    }
    SmolStr::new_static("Item")
}

fn operator_metadata_name(op: &OperatorDecl) -> Result<SmolStr, MetadataNameError> {
    let token = op
        .operator_token()
        .ok_or_else(|| MetadataNameError::Malformed("operator declaration without an operator token".into()))?;
    let arity = match op.param_list().map(|p| p.arity()) {
        Some(1) => OperatorArity::Unary,
        Some(2) => OperatorArity::Binary,
        other => {
            return Err(MetadataNameError::Malformed(format!(
                "operator {} declared with {:?} parameters",
                token.text(),
                other
            )));
        }
    };
    operator_method_name(token.kind(), arity)
        .map(SmolStr::new_static)
        .ok_or_else(|| {
            MetadataNameError::Malformed(format!(
                "{} is not overloadable with {:?} arity",
                token.text(),
                arity
            ))
        })
}

/// The content of a string literal token, quotes and prefixes stripped.
/// Attribute names are plain identifiers, so escape handling beyond the
/// quote forms is not needed.
fn string_literal_value(text: &str) -> Option<&str> {
    let text = text.trim_start_matches(['@', '$']);
    text.strip_prefix('"')?.strip_suffix('"')
}
