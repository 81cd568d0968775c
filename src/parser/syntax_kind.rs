//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all node and token kinds in the syntax tree. It covers
//! the declaration-level C# grammar: namespaces, type declarations and their
//! members. Statement bodies are kept as uninterpreted token runs inside
//! `BLOCK` nodes.

/// All syntax kinds (tokens and nodes) in the C# declaration subset
///
/// Tokens are leaf elements (identifiers, keywords, punctuation).
/// Nodes are composite (namespaces, type declarations, members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DIRECTIVE, // preprocessor line: #region, #if, ...

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,      // identifier, including @-verbatim identifiers
    INT_LIT,    // 42, 0x2A, 1_000
    REAL_LIT,   // 3.14, 1e10, 1.5f
    STRING_LIT, // "...", @"...", $"..."
    CHAR_LIT,   // 'a', '\n'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COMMA,       // ,
    DOT,         // .
    COLON,       // :
    COLON_COLON, // ::
    QUESTION,    // ?
    EQ,          // =
    FAT_ARROW,   // =>
    ARROW,       // ->
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    AMP,         // &
    AMP_AMP,     // &&
    PIPE,        // |
    PIPE_PIPE,   // ||
    CARET,       // ^
    TILDE,       // ~
    BANG,        // !
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    LT_LT,       // <<
    GT_GT,       // >>
    GT_GT_GT,    // >>>
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --

    // =========================================================================
    // KEYWORDS (reserved words the grammar inspects)
    // =========================================================================
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    DELEGATE_KW,
    EVENT_KW,
    OPERATOR_KW,
    IMPLICIT_KW,
    EXPLICIT_KW,
    THIS_KW,

    // Modifiers
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    STATIC_KW,
    ABSTRACT_KW,
    SEALED_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    READONLY_KW,
    EXTERN_KW,
    UNSAFE_KW,
    NEW_KW,
    CONST_KW,
    VOLATILE_KW,
    FIXED_KW,
    REF_KW,
    OUT_KW,
    IN_KW,
    PARAMS_KW,

    // Predefined types
    VOID_KW,
    BOOL_KW,
    BYTE_KW,
    SBYTE_KW,
    SHORT_KW,
    USHORT_KW,
    INT_KW,
    UINT_KW,
    LONG_KW,
    ULONG_KW,
    FLOAT_KW,
    DOUBLE_KW,
    DECIMAL_KW,
    CHAR_KW,
    STRING_KW,
    OBJECT_KW,

    // `operator true` / `operator false` operands
    TRUE_KW,
    FALSE_KW,

    // Contextual keywords. The lexer emits IDENT for these; the parser
    // re-tags them inside accessor lists only.
    GET_KW,
    SET_KW,
    INIT_KW,
    ADD_KW,
    REMOVE_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    QUALIFIED_NAME,

    // Type declarations
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    DELEGATE_DECL,

    // Members
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    DESTRUCTOR_DECL,
    PROPERTY_DECL,
    INDEXER_DECL,
    EVENT_DECL,       // event with accessor list
    EVENT_FIELD_DECL, // field-like event, no accessor list
    FIELD_DECL,
    OPERATOR_DECL,
    CONVERSION_OPERATOR_DECL,

    // Member pieces
    ATTRIBUTE_LIST,
    TYPE_REF,
    EXPLICIT_INTERFACE_SPECIFIER,
    TYPE_PARAM_LIST,
    PARAM_LIST,
    ACCESSOR_LIST,
    ACCESSOR_DECL,
    BLOCK,
    EXPRESSION_BODY,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment, preprocessor line)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DIRECTIVE
        )
    }

    /// Check if this is a member modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::INTERNAL_KW
                | Self::STATIC_KW
                | Self::ABSTRACT_KW
                | Self::SEALED_KW
                | Self::VIRTUAL_KW
                | Self::OVERRIDE_KW
                | Self::READONLY_KW
                | Self::EXTERN_KW
                | Self::UNSAFE_KW
                | Self::NEW_KW
                | Self::CONST_KW
                | Self::VOLATILE_KW
                | Self::FIXED_KW
                | Self::IMPLICIT_KW
                | Self::EXPLICIT_KW
        )
    }

    /// Check if this is a predefined (keyword) type
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            Self::VOID_KW
                | Self::BOOL_KW
                | Self::BYTE_KW
                | Self::SBYTE_KW
                | Self::SHORT_KW
                | Self::USHORT_KW
                | Self::INT_KW
                | Self::UINT_KW
                | Self::LONG_KW
                | Self::ULONG_KW
                | Self::FLOAT_KW
                | Self::DOUBLE_KW
                | Self::DECIMAL_KW
                | Self::CHAR_KW
                | Self::STRING_KW
                | Self::OBJECT_KW
        )
    }

    /// Check if this is an accessor keyword (after parser re-tagging)
    pub fn is_accessor_keyword(self) -> bool {
        matches!(
            self,
            Self::GET_KW | Self::SET_KW | Self::INIT_KW | Self::ADD_KW | Self::REMOVE_KW
        )
    }

    /// Check if this is a type declaration node
    pub fn is_type_decl(self) -> bool {
        matches!(
            self,
            Self::CLASS_DECL | Self::STRUCT_DECL | Self::INTERFACE_DECL
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl rowan::Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;
