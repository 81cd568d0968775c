//! Function breakpoint names from text selections.
//!
//! Given a parsed source file and a selection range, find the function-like
//! member the selection identifies and format the dotted name a debugger's
//! "break at function" dialog accepts (`Namespace.Type.Method`).
//!
//! "No applicable member" is the common case, not an error: clicking a type
//! name, a field, a local function or plain statement text yields `None`.

use std::fmt;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::parser::{
    AccessorDecl, AstNode, EventDecl, IndexerDecl, MemberDecl, PropertyDecl, SyntaxKind,
    SyntaxNode, TypeDecl, TypeParamList,
};

use super::metadata::{MetadataNameError, MetadataNameSource};

/// Derive the breakpoint name for the member at `selection`, or `None` when
/// the selection does not identify one.
///
/// `names` is consulted only for members whose metadata name differs from
/// their source spelling (indexers, operators); its faults propagate
/// unmodified.
pub async fn breakpoint_name(
    root: &SyntaxNode,
    selection: TextRange,
    names: &impl MetadataNameSource,
    cancel: &CancellationToken,
) -> Result<Option<String>, MetadataNameError> {
    let target = resolve_target(root, selection, names, cancel).await?;
    Ok(target.map(|t| t.render()))
}

/// Resolve the member the selection identifies without rendering it.
///
/// A zero-width selection is a caret that may sit immediately before or
/// after a name: it is retried as the one-character span ahead of the caret
/// and then, if that fails, the one behind it.
pub async fn resolve_target(
    root: &SyntaxNode,
    selection: TextRange,
    names: &impl MetadataNameSource,
    cancel: &CancellationToken,
) -> Result<Option<BreakpointTarget>, MetadataNameError> {
    if !selection.is_empty() {
        return resolve_at(root, selection, names, cancel).await;
    }

    let forward = TextRange::at(selection.start(), TextSize::new(1));
    if let Some(target) = resolve_at(root, forward, names, cancel).await? {
        return Ok(Some(target));
    }
    if selection.start() >= TextSize::new(1) {
        let backward = TextRange::at(selection.start() - TextSize::new(1), TextSize::new(1));
        return resolve_at(root, backward, names, cancel).await;
    }
    Ok(None)
}

async fn resolve_at(
    root: &SyntaxNode,
    selection: TextRange,
    names: &impl MetadataNameSource,
    cancel: &CancellationToken,
) -> Result<Option<BreakpointTarget>, MetadataNameError> {
    if !root.text_range().contains_range(selection) {
        return Ok(None);
    }

    let node = match root.covering_element(selection) {
        rowan::NodeOrToken::Node(node) => node,
        rowan::NodeOrToken::Token(token) => match token.parent() {
            Some(parent) => parent,
            None => return Ok(None),
        },
    };

    if let Some(accessor) = AccessorDecl::cast(node.clone()) {
        return resolve_accessor(accessor, selection, names, cancel).await;
    }

    let Some(member) = MemberDecl::cast(node.clone()) else {
        trace!(kind = ?node.kind(), "selection is not on a member declaration");
        return Ok(None);
    };

    match member {
        MemberDecl::Method(method) => {
            if method.explicit_interface_specifier().is_some() {
                // The breakpoint dialog cannot address explicit
                // implementations by a dotted source name
                return Ok(None);
            }
            let Some(ident) = method.name_token() else {
                return Ok(None);
            };
            let ident_range = ident.text_range();
            let over_type_params = method.type_param_list().is_some_and(|list| {
                selection.start() >= ident_range.start()
                    && selection.start() <= ident_range.end()
                    && selection.end() <= list.syntax().text_range().end()
            });
            if !ident_range.contains_range(selection) && !over_type_params {
                return Ok(None);
            }
            Ok(Some(BreakpointTarget {
                member: method.syntax().clone(),
                leaf: SmolStr::new(ident.text()),
                accessor: None,
                type_params: method.type_param_list(),
            }))
        }

        MemberDecl::Constructor(ctor) => {
            let Some(ident) = ctor.name_token() else {
                return Ok(None);
            };
            if !ident.text_range().contains_range(selection) {
                return Ok(None);
            }
            let in_struct = ctor
                .syntax()
                .parent()
                .is_some_and(|p| p.kind() == SyntaxKind::STRUCT_DECL);
            if ctor.is_static() {
                if in_struct {
                    // The debugger has no addressable name for a struct's
                    // type initializer
                    return Ok(None);
                }
                Ok(Some(BreakpointTarget {
                    member: ctor.syntax().clone(),
                    leaf: SmolStr::new_static("cctor"),
                    accessor: None,
                    type_params: None,
                }))
            } else {
                // Instance constructors break by the type's own name
                Ok(Some(BreakpointTarget {
                    member: ctor.syntax().clone(),
                    leaf: SmolStr::new(ident.text()),
                    accessor: None,
                    type_params: None,
                }))
            }
        }

        MemberDecl::Destructor(dtor) => {
            let Some(ident) = dtor.name_token() else {
                return Ok(None);
            };
            if !ident.text_range().contains_range(selection) {
                return Ok(None);
            }
            Ok(Some(BreakpointTarget {
                member: dtor.syntax().clone(),
                leaf: SmolStr::new_static("Finalize"),
                accessor: None,
                type_params: None,
            }))
        }

        MemberDecl::Property(property) => {
            if property.explicit_interface_specifier().is_some() {
                return Ok(None);
            }
            let Some(ident) = property.name_token() else {
                return Ok(None);
            };
            if !ident.text_range().contains_range(selection) {
                return Ok(None);
            }
            Ok(Some(BreakpointTarget {
                member: property.syntax().clone(),
                leaf: SmolStr::new(ident.text()),
                accessor: None,
                type_params: None,
            }))
        }

        MemberDecl::Indexer(indexer) => {
            if indexer.explicit_interface_specifier().is_some() {
                return Ok(None);
            }
            let Some(this_token) = indexer.this_token() else {
                return Ok(None);
            };
            if !this_token.text_range().contains_range(selection) {
                return Ok(None);
            }
            let leaf = names.metadata_name(indexer.syntax(), cancel).await?;
            Ok(Some(BreakpointTarget {
                member: indexer.syntax().clone(),
                leaf,
                accessor: None,
                type_params: None,
            }))
        }

        MemberDecl::Operator(op) => {
            let (Some(keyword), Some(token)) = (op.operator_keyword(), op.operator_token()) else {
                return Ok(None);
            };
            // The keyword, the operator token, or anything in between count
            // as selecting the operator; starting before the keyword or
            // ending past the token does not.
            let region =
                TextRange::new(keyword.text_range().start(), token.text_range().end());
            if !region.contains_range(selection) {
                return Ok(None);
            }
            let leaf = names.metadata_name(op.syntax(), cancel).await?;
            Ok(Some(BreakpointTarget {
                member: op.syntax().clone(),
                leaf,
                accessor: None,
                type_params: None,
            }))
        }

        MemberDecl::ConversionOperator(conversion) => {
            let Some(keyword) = conversion.operator_keyword() else {
                return Ok(None);
            };
            if !keyword.text_range().contains_range(selection) {
                return Ok(None);
            }
            let leaf = if conversion.is_implicit() {
                SmolStr::new_static("op_Implicit")
            } else {
                SmolStr::new_static("op_Explicit")
            };
            Ok(Some(BreakpointTarget {
                member: conversion.syntax().clone(),
                leaf,
                accessor: None,
                type_params: None,
            }))
        }

        // A field-like event has no accessor methods of its own to break in,
        // and events themselves are only addressable through add/remove.
        MemberDecl::Event(_)
        | MemberDecl::EventField(_)
        | MemberDecl::Field(_)
        | MemberDecl::Delegate(_) => Ok(None),
    }
}

/// Selections on `get`/`set`/`init`/`add`/`remove` resolve through the
/// accessor's owning declaration.
async fn resolve_accessor(
    accessor: AccessorDecl,
    selection: TextRange,
    names: &impl MetadataNameSource,
    cancel: &CancellationToken,
) -> Result<Option<BreakpointTarget>, MetadataNameError> {
    let Some(keyword) = accessor.keyword_token() else {
        return Ok(None);
    };
    if !keyword.text_range().contains_range(selection) {
        return Ok(None);
    }
    let Some(owner) = accessor.owner() else {
        return Ok(None);
    };

    match owner.kind() {
        SyntaxKind::PROPERTY_DECL => {
            let Some(property) = PropertyDecl::cast(owner) else {
                return Ok(None);
            };
            if property.explicit_interface_specifier().is_some() {
                return Ok(None);
            }
            let Some(ident) = property.name_token() else {
                return Ok(None);
            };
            Ok(Some(BreakpointTarget {
                member: property.syntax().clone(),
                leaf: SmolStr::new(ident.text()),
                accessor: Some(accessor),
                type_params: None,
            }))
        }
        SyntaxKind::INDEXER_DECL => {
            let Some(indexer) = IndexerDecl::cast(owner) else {
                return Ok(None);
            };
            if indexer.explicit_interface_specifier().is_some() {
                return Ok(None);
            }
            let leaf = names.metadata_name(indexer.syntax(), cancel).await?;
            Ok(Some(BreakpointTarget {
                member: indexer.syntax().clone(),
                leaf,
                accessor: Some(accessor),
                type_params: None,
            }))
        }
        SyntaxKind::EVENT_DECL => {
            let Some(event) = EventDecl::cast(owner) else {
                return Ok(None);
            };
            if event.explicit_interface_specifier().is_some() {
                return Ok(None);
            }
            let Some(ident) = event.name_token() else {
                return Ok(None);
            };
            Ok(Some(BreakpointTarget {
                member: event.syntax().clone(),
                leaf: SmolStr::new(ident.text()),
                accessor: Some(accessor),
                type_params: None,
            }))
        }
        other => {
            trace!(kind = ?other, "accessor owner cannot carry a breakpoint name");
            Ok(None)
        }
    }
}

/// A resolved member, ready to be rendered as a breakpoint name.
///
/// Holds the owning declaration node, the leaf name segment (source
/// identifier or metadata name), the targeted accessor when the selection
/// was on one, and the type-parameter list of a generic method.
#[derive(Debug, Clone)]
pub struct BreakpointTarget {
    member: SyntaxNode,
    leaf: SmolStr,
    accessor: Option<AccessorDecl>,
    type_params: Option<TypeParamList>,
}

impl BreakpointTarget {
    /// The member declaration the selection resolved to
    pub fn member(&self) -> &SyntaxNode {
        &self.member
    }

    /// Render the fully-qualified breakpoint name. Pure: rendering the same
    /// target twice yields identical strings.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BreakpointTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Collect qualification segments innermost-first, then emit reversed
        let mut reverse_segments: Vec<SmolStr> = Vec::new();

        let mut current = self.member.parent();
        while let Some(node) = current {
            if let Some(type_decl) = TypeDecl::cast(node.clone()) {
                reverse_segments.push(type_segment(&type_decl));
            } else if node.kind() == SyntaxKind::NAMESPACE_DECL {
                // A dotted namespace contributes one segment per component
                if let Some(name) = crate::parser::NamespaceDecl::cast(node.clone())
                    .and_then(|ns| ns.name())
                {
                    for segment in name.segments().into_iter().rev() {
                        reverse_segments.push(segment);
                    }
                }
            }
            current = node.parent();
        }

        for segment in reverse_segments.iter().rev() {
            write!(f, "{segment}.")?;
        }

        let accessor_keyword = self
            .accessor
            .as_ref()
            .and_then(|a| a.keyword_token())
            .map(|t| SmolStr::new(t.text()));

        match (accessor_keyword, self.member.kind()) {
            (Some(keyword), SyntaxKind::PROPERTY_DECL | SyntaxKind::INDEXER_DECL) => {
                write!(f, "{}.{}", self.leaf, keyword)
            }
            (Some(keyword), _) => {
                // Event accessors: the breakpoint window only recognizes the
                // add_E / remove_E metadata spelling, not E.add
                write!(f, "{}_{}", keyword, self.leaf)
            }
            (None, _) => {
                write!(f, "{}", self.leaf)?;
                if let Some(list) = &self.type_params {
                    write_type_params(f, list)?;
                }
                Ok(())
            }
        }
    }
}

fn type_segment(type_decl: &TypeDecl) -> SmolStr {
    let name = type_decl
        .name_token()
        .map(|t| SmolStr::new(t.text()))
        .unwrap_or_default();
    match type_decl.type_param_list() {
        Some(list) => {
            let mut segment = String::from(name.as_str());
            segment.push('<');
            for (i, param) in list.names().iter().enumerate() {
                if i > 0 {
                    segment.push_str(", ");
                }
                segment.push_str(param);
            }
            segment.push('>');
            SmolStr::new(segment)
        }
        None => name,
    }
}

fn write_type_params(f: &mut fmt::Formatter<'_>, list: &TypeParamList) -> fmt::Result {
    write!(f, "<")?;
    for (i, param) in list.names().iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{param}")?;
    }
    write!(f, ">")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ide::metadata::SyntacticNameSource;
    use crate::parser::parse;

    async fn name_at(source: &str, needle: &str) -> Option<String> {
        let parsed = parse(source);
        assert!(parsed.ok(), "errors: {:?}", parsed.errors);
        let offset = source.find(needle).expect("needle not in source");
        let selection = TextRange::at(
            TextSize::new(offset as u32),
            TextSize::of(needle),
        );
        breakpoint_name(
            &parsed.syntax(),
            selection,
            &SyntacticNameSource,
            &CancellationToken::new(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let source = "class A { void B() { } }";
        let parsed = parse(source);
        let offset = source.find('B').unwrap() as u32;
        let target = resolve_target(
            &parsed.syntax(),
            TextRange::at(TextSize::new(offset), TextSize::new(1)),
            &SyntacticNameSource,
            &CancellationToken::new(),
        )
        .await
        .unwrap()
        .expect("should resolve");
        assert_eq!(target.render(), target.render());
        assert_eq!(target.render(), "A.B");
    }

    #[tokio::test]
    async fn test_generic_qualification() {
        assert_eq!(
            name_at("class A<T> { class B { void C<U, V>() { } } }", "C").await,
            Some("A<T>.B.C<U, V>".to_string())
        );
    }

    #[tokio::test]
    async fn test_field_is_not_a_target() {
        assert_eq!(name_at("class A { int B; }", "B").await, None);
    }
}
