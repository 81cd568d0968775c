//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for the C# declaration
//! nodes. Each struct wraps a SyntaxNode and provides methods to access
//! children. Only what member resolution and name formatting need is
//! exposed; bodies and parameter lists stay opaque.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros and token scans
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// First direct child token of the given kind
fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// First direct IDENT token that appears after the TYPE_REF child. Member
/// headers keep their modifiers as direct tokens (including the contextual
/// `partial`/`async`, which lex as identifiers), so the name token is the
/// first identifier past the type.
fn name_ident_after_type(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut seen_type = false;
    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Node(n) => {
                if n.kind() == SyntaxKind::TYPE_REF {
                    seen_type = true;
                }
            }
            rowan::NodeOrToken::Token(t) => {
                if seen_type && t.kind() == SyntaxKind::IDENT {
                    return Some(t);
                }
            }
        }
    }
    None
}

fn has_child_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    child_token(node, kind).is_some()
}

// ============================================================================
// Root and namespaces
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceDecl> + '_ {
        self.0.children().filter_map(NamespaceDecl::cast)
    }
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    pub fn name(&self) -> Option<QualifiedName> {
        self.0.children().find_map(QualifiedName::cast)
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// All name segments in source order (`A.B.C` yields `A`, `B`, `C`)
    pub fn segments(&self) -> Vec<SmolStr> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| SmolStr::new(t.text()))
            .collect()
    }
}

// ============================================================================
// Type declarations
// ============================================================================

ast_node!(ClassDecl, CLASS_DECL);
ast_node!(StructDecl, STRUCT_DECL);
ast_node!(InterfaceDecl, INTERFACE_DECL);
ast_node!(EnumDecl, ENUM_DECL);

/// Any of the type declarations that can enclose function-like members
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDecl {
    Class(ClassDecl),
    Struct(StructDecl),
    Interface(InterfaceDecl),
}

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type_decl()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::STRUCT_DECL => Some(Self::Struct(StructDecl(node))),
            SyntaxKind::INTERFACE_DECL => Some(Self::Interface(InterfaceDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(n) => n.syntax(),
            Self::Struct(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
        }
    }
}

impl TypeDecl {
    /// The type's own identifier
    pub fn name_token(&self) -> Option<SyntaxToken> {
        child_token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn type_param_list(&self) -> Option<TypeParamList> {
        self.syntax().children().find_map(TypeParamList::cast)
    }
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    /// Declared type parameter names, in order. Identifiers inside attribute
    /// brackets (`<[X] T>`) are not names.
    pub fn names(&self) -> Vec<SmolStr> {
        let mut names = Vec::new();
        let mut bracket_depth = 0u32;
        for token in self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
        {
            match token.kind() {
                SyntaxKind::L_BRACKET => bracket_depth += 1,
                SyntaxKind::R_BRACKET => bracket_depth = bracket_depth.saturating_sub(1),
                SyntaxKind::IDENT if bracket_depth == 0 => names.push(SmolStr::new(token.text())),
                _ => {}
            }
        }
        names
    }
}

// ============================================================================
// Members
// ============================================================================

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        name_ident_after_type(&self.0)
    }

    pub fn type_param_list(&self) -> Option<TypeParamList> {
        self.0.children().find_map(TypeParamList::cast)
    }

    pub fn explicit_interface_specifier(&self) -> Option<ExplicitInterfaceSpecifier> {
        self.0.children().find_map(ExplicitInterfaceSpecifier::cast)
    }
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::IDENT)
    }

    pub fn is_static(&self) -> bool {
        has_child_token(&self.0, SyntaxKind::STATIC_KW)
    }
}

ast_node!(DestructorDecl, DESTRUCTOR_DECL);

impl DestructorDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::IDENT)
    }
}

ast_node!(PropertyDecl, PROPERTY_DECL);

impl PropertyDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        name_ident_after_type(&self.0)
    }

    pub fn explicit_interface_specifier(&self) -> Option<ExplicitInterfaceSpecifier> {
        self.0.children().find_map(ExplicitInterfaceSpecifier::cast)
    }
}

ast_node!(IndexerDecl, INDEXER_DECL);

impl IndexerDecl {
    /// The `this` keyword is the indexer's name-bearing token
    pub fn this_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::THIS_KW)
    }

    pub fn explicit_interface_specifier(&self) -> Option<ExplicitInterfaceSpecifier> {
        self.0.children().find_map(ExplicitInterfaceSpecifier::cast)
    }

    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }
}

ast_node!(EventDecl, EVENT_DECL);

impl EventDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        name_ident_after_type(&self.0)
    }

    pub fn explicit_interface_specifier(&self) -> Option<ExplicitInterfaceSpecifier> {
        self.0.children().find_map(ExplicitInterfaceSpecifier::cast)
    }
}

ast_node!(EventFieldDecl, EVENT_FIELD_DECL);

ast_node!(FieldDecl, FIELD_DECL);

ast_node!(OperatorDecl, OPERATOR_DECL);

impl OperatorDecl {
    pub fn operator_keyword(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::OPERATOR_KW)
    }

    /// The overloaded operator token (`+`, `==`, `true`, ...): the first
    /// non-trivia token after the `operator` keyword
    pub fn operator_token(&self) -> Option<SyntaxToken> {
        let mut seen_keyword = false;
        for token in self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
        {
            if seen_keyword && !token.kind().is_trivia() {
                return Some(token);
            }
            if token.kind() == SyntaxKind::OPERATOR_KW {
                seen_keyword = true;
            }
        }
        None
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }
}

ast_node!(ConversionOperatorDecl, CONVERSION_OPERATOR_DECL);

impl ConversionOperatorDecl {
    pub fn operator_keyword(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::OPERATOR_KW)
    }

    pub fn is_implicit(&self) -> bool {
        has_child_token(&self.0, SyntaxKind::IMPLICIT_KW)
    }
}

ast_node!(DelegateDecl, DELEGATE_DECL);

// ============================================================================
// Member pieces
// ============================================================================

ast_node!(ExplicitInterfaceSpecifier, EXPLICIT_INTERFACE_SPECIFIER);

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    /// Direct tokens of the list, for callers that scan attribute contents
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    /// Number of declared parameters. Works for both paren-delimited lists
    /// (methods, operators) and bracket-delimited lists (indexers); commas
    /// inside nested delimiters or type-argument lists do not separate
    /// parameters.
    pub fn arity(&self) -> usize {
        let mut delims = 0i32; // combined paren + bracket depth
        let mut angles = 0i32;
        let mut commas = 0usize;
        let mut inner = 0usize; // non-trivia tokens inside the outer delimiters

        for token in self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
        {
            if token.kind().is_trivia() {
                continue;
            }
            match token.kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => {
                    if delims >= 1 {
                        inner += 1;
                    }
                    delims += 1;
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    delims -= 1;
                    if delims >= 1 {
                        inner += 1;
                    }
                }
                SyntaxKind::LT => {
                    angles += 1;
                    inner += 1;
                }
                SyntaxKind::GT => {
                    angles -= 1;
                    inner += 1;
                }
                SyntaxKind::GT_GT => {
                    angles -= 2;
                    inner += 1;
                }
                SyntaxKind::GT_GT_GT => {
                    angles -= 3;
                    inner += 1;
                }
                SyntaxKind::COMMA => {
                    inner += 1;
                    if delims == 1 && angles <= 0 {
                        commas += 1;
                    }
                }
                _ => inner += 1,
            }
        }

        if inner == 0 { 0 } else { commas + 1 }
    }
}

ast_node!(AccessorList, ACCESSOR_LIST);

impl AccessorList {
    pub fn accessors(&self) -> impl Iterator<Item = AccessorDecl> + '_ {
        self.0.children().filter_map(AccessorDecl::cast)
    }
}

ast_node!(AccessorDecl, ACCESSOR_DECL);

impl AccessorDecl {
    /// The accessor keyword token (`get`, `set`, `init`, `add`, `remove`)
    pub fn keyword_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_accessor_keyword())
    }

    /// The declaration that owns the accessor list this accessor sits in
    pub fn owner(&self) -> Option<SyntaxNode> {
        let list = self.0.parent()?;
        if list.kind() != SyntaxKind::ACCESSOR_LIST {
            return None;
        }
        list.parent()
    }
}

// ============================================================================
// Member union
// ============================================================================

/// Any member declaration that can appear in a type body. The resolver
/// matches this exhaustively, so adding a member kind forces every match
/// site to decide how to handle it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberDecl {
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Destructor(DestructorDecl),
    Property(PropertyDecl),
    Indexer(IndexerDecl),
    Event(EventDecl),
    EventField(EventFieldDecl),
    Field(FieldDecl),
    Operator(OperatorDecl),
    ConversionOperator(ConversionOperatorDecl),
    Delegate(DelegateDecl),
}

impl AstNode for MemberDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::METHOD_DECL
                | SyntaxKind::CONSTRUCTOR_DECL
                | SyntaxKind::DESTRUCTOR_DECL
                | SyntaxKind::PROPERTY_DECL
                | SyntaxKind::INDEXER_DECL
                | SyntaxKind::EVENT_DECL
                | SyntaxKind::EVENT_FIELD_DECL
                | SyntaxKind::FIELD_DECL
                | SyntaxKind::OPERATOR_DECL
                | SyntaxKind::CONVERSION_OPERATOR_DECL
                | SyntaxKind::DELEGATE_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::METHOD_DECL => Some(Self::Method(MethodDecl(node))),
            SyntaxKind::CONSTRUCTOR_DECL => Some(Self::Constructor(ConstructorDecl(node))),
            SyntaxKind::DESTRUCTOR_DECL => Some(Self::Destructor(DestructorDecl(node))),
            SyntaxKind::PROPERTY_DECL => Some(Self::Property(PropertyDecl(node))),
            SyntaxKind::INDEXER_DECL => Some(Self::Indexer(IndexerDecl(node))),
            SyntaxKind::EVENT_DECL => Some(Self::Event(EventDecl(node))),
            SyntaxKind::EVENT_FIELD_DECL => Some(Self::EventField(EventFieldDecl(node))),
            SyntaxKind::FIELD_DECL => Some(Self::Field(FieldDecl(node))),
            SyntaxKind::OPERATOR_DECL => Some(Self::Operator(OperatorDecl(node))),
            SyntaxKind::CONVERSION_OPERATOR_DECL => {
                Some(Self::ConversionOperator(ConversionOperatorDecl(node)))
            }
            SyntaxKind::DELEGATE_DECL => Some(Self::Delegate(DelegateDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Method(n) => n.syntax(),
            Self::Constructor(n) => n.syntax(),
            Self::Destructor(n) => n.syntax(),
            Self::Property(n) => n.syntax(),
            Self::Indexer(n) => n.syntax(),
            Self::Event(n) => n.syntax(),
            Self::EventField(n) => n.syntax(),
            Self::Field(n) => n.syntax(),
            Self::Operator(n) => n.syntax(),
            Self::ConversionOperator(n) => n.syntax(),
            Self::Delegate(n) => n.syntax(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
