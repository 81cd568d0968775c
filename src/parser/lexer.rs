//! Logos-based lexer for the C# declaration subset
//!
//! Fast tokenization using the logos crate. Only the tokens the declaration
//! grammar inspects get dedicated kinds; everything else that can appear in
//! statement bodies still lexes cleanly (as identifiers, literals or
//! punctuation) so brace matching over bodies stays reliable.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\u{feff}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // Preprocessor lines are trivia for declaration parsing
    #[regex(r"#[^\n]*")]
    Directive,

    // =========================================================================
    // LITERALS
    // =========================================================================
    // @-verbatim identifiers lex as plain identifiers
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*[uUlL]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*([eE][+-]?[0-9]+)[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    Real,

    // Ordinary, verbatim and interpolated forms. Interpolation holes stay
    // inside the token so brace matching over bodies is not disturbed.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    #[regex(r#"\$@"([^"]|"")*""#)]
    #[regex(r#"@\$"([^"]|"")*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // =========================================================================
    // PUNCTUATION (multi-character forms win by length)
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    BangEq,
    #[token("!")]
    Bang,
    #[token("++")]
    PlusPlus,
    #[token("+")]
    Plus,
    #[token("--")]
    MinusMinus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&&")]
    AmpAmp,
    #[token("&")]
    Amp,
    #[token("||")]
    PipePipe,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    LtLt,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">>>")]
    GtGtGt,
    #[token(">>")]
    GtGt,
    #[token(">")]
    Gt,
    #[token("@")]
    At,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("using")]
    Using,
    #[token("namespace")]
    Namespace,
    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("delegate")]
    Delegate,
    #[token("event")]
    Event,
    #[token("operator")]
    Operator,
    #[token("implicit")]
    Implicit,
    #[token("explicit")]
    Explicit,
    #[token("this")]
    This,

    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("internal")]
    Internal,
    #[token("static")]
    Static,
    #[token("abstract")]
    Abstract,
    #[token("sealed")]
    Sealed,
    #[token("virtual")]
    Virtual,
    #[token("override")]
    Override,
    #[token("readonly")]
    Readonly,
    #[token("extern")]
    Extern,
    #[token("unsafe")]
    Unsafe,
    #[token("new")]
    New,
    #[token("const")]
    Const,
    #[token("volatile")]
    Volatile,
    #[token("fixed")]
    Fixed,
    #[token("ref")]
    Ref,
    #[token("out")]
    Out,
    #[token("in")]
    In,
    #[token("params")]
    Params,

    #[token("void")]
    Void,
    #[token("bool")]
    Bool,
    #[token("byte")]
    Byte,
    #[token("sbyte")]
    Sbyte,
    #[token("short")]
    Short,
    #[token("ushort")]
    Ushort,
    #[token("int")]
    Int,
    #[token("uint")]
    Uint,
    #[token("long")]
    Long,
    #[token("ulong")]
    Ulong,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("decimal")]
    Decimal,
    #[token("char")]
    CharKw,
    #[token("string")]
    StringKw,
    #[token("object")]
    Object,

    #[token("true")]
    True,
    #[token("false")]
    False,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Directive => SyntaxKind::DIRECTIVE,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INT_LIT,
            LogosToken::Real => SyntaxKind::REAL_LIT,
            LogosToken::String => SyntaxKind::STRING_LIT,
            LogosToken::Char => SyntaxKind::CHAR_LIT,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::ColonColon => SyntaxKind::COLON_COLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::FatArrow => SyntaxKind::FAT_ARROW,
            LogosToken::Arrow => SyntaxKind::ARROW,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::LtLt => SyntaxKind::LT_LT,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::GtGtGt => SyntaxKind::GT_GT_GT,
            LogosToken::GtGt => SyntaxKind::GT_GT,
            LogosToken::Gt => SyntaxKind::GT,
            // Standalone @ only appears in malformed input
            LogosToken::At => SyntaxKind::ERROR,
            LogosToken::Using => SyntaxKind::USING_KW,
            LogosToken::Namespace => SyntaxKind::NAMESPACE_KW,
            LogosToken::Class => SyntaxKind::CLASS_KW,
            LogosToken::Struct => SyntaxKind::STRUCT_KW,
            LogosToken::Interface => SyntaxKind::INTERFACE_KW,
            LogosToken::Enum => SyntaxKind::ENUM_KW,
            LogosToken::Delegate => SyntaxKind::DELEGATE_KW,
            LogosToken::Event => SyntaxKind::EVENT_KW,
            LogosToken::Operator => SyntaxKind::OPERATOR_KW,
            LogosToken::Implicit => SyntaxKind::IMPLICIT_KW,
            LogosToken::Explicit => SyntaxKind::EXPLICIT_KW,
            LogosToken::This => SyntaxKind::THIS_KW,
            LogosToken::Public => SyntaxKind::PUBLIC_KW,
            LogosToken::Private => SyntaxKind::PRIVATE_KW,
            LogosToken::Protected => SyntaxKind::PROTECTED_KW,
            LogosToken::Internal => SyntaxKind::INTERNAL_KW,
            LogosToken::Static => SyntaxKind::STATIC_KW,
            LogosToken::Abstract => SyntaxKind::ABSTRACT_KW,
            LogosToken::Sealed => SyntaxKind::SEALED_KW,
            LogosToken::Virtual => SyntaxKind::VIRTUAL_KW,
            LogosToken::Override => SyntaxKind::OVERRIDE_KW,
            LogosToken::Readonly => SyntaxKind::READONLY_KW,
            LogosToken::Extern => SyntaxKind::EXTERN_KW,
            LogosToken::Unsafe => SyntaxKind::UNSAFE_KW,
            LogosToken::New => SyntaxKind::NEW_KW,
            LogosToken::Const => SyntaxKind::CONST_KW,
            LogosToken::Volatile => SyntaxKind::VOLATILE_KW,
            LogosToken::Fixed => SyntaxKind::FIXED_KW,
            LogosToken::Ref => SyntaxKind::REF_KW,
            LogosToken::Out => SyntaxKind::OUT_KW,
            LogosToken::In => SyntaxKind::IN_KW,
            LogosToken::Params => SyntaxKind::PARAMS_KW,
            LogosToken::Void => SyntaxKind::VOID_KW,
            LogosToken::Bool => SyntaxKind::BOOL_KW,
            LogosToken::Byte => SyntaxKind::BYTE_KW,
            LogosToken::Sbyte => SyntaxKind::SBYTE_KW,
            LogosToken::Short => SyntaxKind::SHORT_KW,
            LogosToken::Ushort => SyntaxKind::USHORT_KW,
            LogosToken::Int => SyntaxKind::INT_KW,
            LogosToken::Uint => SyntaxKind::UINT_KW,
            LogosToken::Long => SyntaxKind::LONG_KW,
            LogosToken::Ulong => SyntaxKind::ULONG_KW,
            LogosToken::Float => SyntaxKind::FLOAT_KW,
            LogosToken::Double => SyntaxKind::DOUBLE_KW,
            LogosToken::Decimal => SyntaxKind::DECIMAL_KW,
            LogosToken::CharKw => SyntaxKind::CHAR_KW,
            LogosToken::StringKw => SyntaxKind::STRING_KW,
            LogosToken::Object => SyntaxKind::OBJECT_KW,
            LogosToken::True => SyntaxKind::TRUE_KW,
            LogosToken::False => SyntaxKind::FALSE_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_method_header() {
        assert_eq!(
            kinds("void B()"),
            vec![
                SyntaxKind::VOID_KW,
                SyntaxKind::IDENT,
                SyntaxKind::L_PAREN,
                SyntaxKind::R_PAREN,
            ]
        );
    }

    #[test]
    fn test_lex_shift_operators() {
        assert_eq!(kinds(">>> >> >"), vec![
            SyntaxKind::GT_GT_GT,
            SyntaxKind::GT_GT,
            SyntaxKind::GT,
        ]);
    }

    #[test]
    fn test_lex_contextual_keywords_as_idents() {
        // get/set/add/remove are contextual; the lexer must not reserve them
        assert_eq!(kinds("get set add remove init"), vec![SyntaxKind::IDENT; 5]);
    }

    #[test]
    fn test_lex_interpolated_string_swallows_braces() {
        let toks = kinds(r#"$"x = {x}" }"#);
        assert_eq!(toks, vec![SyntaxKind::STRING_LIT, SyntaxKind::R_BRACE]);
    }

    #[test]
    fn test_lex_verbatim_identifier() {
        assert_eq!(kinds("@class"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_directive_is_trivia() {
        let toks = tokenize("#region X\nint");
        assert!(toks[0].kind.is_trivia());
        assert_eq!(toks[0].kind, SyntaxKind::DIRECTIVE);
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let toks = tokenize("int x;");
        assert_eq!(toks[0].offset, TextSize::new(0));
        assert_eq!(toks[1].offset, TextSize::new(3));
        assert_eq!(toks[2].offset, TextSize::new(4));
        assert_eq!(toks[3].offset, TextSize::new(5));
    }
}
