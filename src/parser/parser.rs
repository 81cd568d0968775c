//! Recursive descent parser for the C# declaration subset
//!
//! Builds a rowan GreenNode tree from tokens. Supports error recovery and
//! produces a lossless CST: every input byte lands in the tree.
//!
//! The grammar is declaration-level only. Namespaces, type declarations and
//! member signatures are parsed structurally; statement bodies, initializers
//! and attribute contents are preserved as balanced token runs. Local
//! functions therefore never appear as member nodes; they are plain tokens
//! inside a `BLOCK`.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse C# source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the nth non-trivia token ahead (0 = current, after trivia)
    fn nth(&self, n: usize) -> SyntaxKind {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    /// Raw index of the first non-trivia token at or after `idx`
    fn peek_idx(&self, mut idx: usize) -> usize {
        while idx < self.tokens.len() && self.tokens[idx].kind.is_trivia() {
            idx += 1;
        }
        idx
    }

    fn kind_at(&self, idx: usize) -> SyntaxKind {
        self.tokens
            .get(idx)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the current token but record it under a different kind.
    /// Used to re-tag contextual keywords (accessor names) inside accessor
    /// lists.
    fn bump_as(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.current() {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume raw tokens (trivia included) until `raw_idx`
    fn bump_until(&mut self, raw_idx: usize) {
        while self.pos < raw_idx && !self.at_eof() {
            self.bump();
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Wrap everything since `cp` into an ERROR node and skip to a member
    /// boundary.
    fn error_member(&mut self, cp: Checkpoint, message: impl Into<String>) {
        self.error(message);
        self.builder.start_node_at(cp, SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::R_BRACE => break,
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    consumed = true;
                    break;
                }
                SyntaxKind::L_BRACE => {
                    self.bump_balanced_braces();
                    consumed = true;
                    break;
                }
                _ => {
                    self.bump();
                    consumed = true;
                }
            }
        }
        // Always make progress to avoid looping on a stray '}'
        if !consumed && !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, cp: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(cp, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Balanced-run helpers (token soup with depth tracking)
    // =========================================================================

    /// Consume a balanced `{ ... }` run, current token must be `{`
    fn bump_balanced_braces(&mut self) {
        debug_assert!(self.at(SyntaxKind::L_BRACE));
        let mut depth = 0u32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Consume tokens up to (and including) the next `;` that sits outside
    /// every brace/bracket/paren nesting level.
    fn bump_soup_to_semicolon(&mut self) {
        let mut braces = 0u32;
        let mut brackets = 0u32;
        let mut parens = 0u32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => braces += 1,
                SyntaxKind::R_BRACE => {
                    if braces == 0 {
                        // Unterminated declaration; stop at the enclosing '}'
                        self.error("expected ';'");
                        return;
                    }
                    braces -= 1;
                }
                SyntaxKind::L_BRACKET => brackets += 1,
                SyntaxKind::R_BRACKET => brackets = brackets.saturating_sub(1),
                SyntaxKind::L_PAREN => parens += 1,
                SyntaxKind::R_PAREN => parens = parens.saturating_sub(1),
                SyntaxKind::SEMICOLON if braces == 0 && brackets == 0 && parens == 0 => {
                    self.bump();
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Scan (without consuming) a balanced angle-bracket group starting at the
    /// raw index of a `<`. Returns the raw index one past the closing token.
    /// `>>` and `>>>` close two and three levels at once. Gives up on tokens
    /// that cannot occur inside a type-argument or type-parameter list.
    fn scan_angles(&self, open_idx: usize) -> Option<usize> {
        let mut depth: i32 = 0;
        let mut idx = open_idx;
        while idx < self.tokens.len() {
            match self.tokens[idx].kind {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::LT_LT => depth += 2,
                SyntaxKind::GT => depth -= 1,
                SyntaxKind::GT_GT => depth -= 2,
                SyntaxKind::GT_GT_GT => depth -= 3,
                SyntaxKind::SEMICOLON
                | SyntaxKind::L_BRACE
                | SyntaxKind::R_BRACE
                | SyntaxKind::L_PAREN
                | SyntaxKind::R_PAREN
                | SyntaxKind::EQ
                | SyntaxKind::FAT_ARROW => return None,
                _ => {}
            }
            if depth <= 0 {
                return Some(idx + 1);
            }
            idx += 1;
        }
        None
    }

    // =========================================================================
    // Grammar: source file and namespaces
    // =========================================================================

    /// SourceFile = (UsingDirective | NamespaceDecl | TypeMember)*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            self.parse_namespace_member();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// NamespaceMember = UsingDirective | NamespaceDecl | TypeMember
    fn parse_namespace_member(&mut self) {
        match self.current_kind() {
            SyntaxKind::USING_KW => self.parse_using_directive(),
            SyntaxKind::IDENT
                if self.current_text() == "global" && self.nth(1) == SyntaxKind::USING_KW =>
            {
                self.parse_using_directive()
            }
            SyntaxKind::NAMESPACE_KW => self.parse_namespace(),
            SyntaxKind::R_BRACE => {
                self.error("unexpected '}'");
                self.bump();
            }
            _ => self.parse_member(),
        }
    }

    /// UsingDirective = 'global'? 'using' <tokens> ';'
    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        if self.at(SyntaxKind::IDENT) {
            self.bump(); // 'global'
            self.skip_trivia();
        }
        self.expect(SyntaxKind::USING_KW);
        self.bump_soup_to_semicolon();
        self.finish_node();
    }

    /// NamespaceDecl = 'namespace' QualifiedName ('{' NamespaceMember* '}' | ';' NamespaceMember*)
    ///
    /// The `;` form is a file-scoped namespace: every following member belongs
    /// to it, so they are parsed as its children.
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);

        self.expect(SyntaxKind::NAMESPACE_KW);
        self.skip_trivia();
        self.parse_qualified_name();
        self.skip_trivia();

        if self.eat(SyntaxKind::L_BRACE) {
            loop {
                let pos_before = self.pos;
                self.skip_trivia();
                if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                    break;
                }
                self.parse_namespace_member();
                if self.pos == pos_before && !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                    self.error(format!("stuck on token: {:?}", self.current_kind()));
                    self.bump();
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        } else if self.eat(SyntaxKind::SEMICOLON) {
            while !self.at_eof() {
                let pos_before = self.pos;
                self.skip_trivia();
                if self.at_eof() {
                    break;
                }
                self.parse_namespace_member();
                if self.pos == pos_before && !self.at_eof() {
                    self.error(format!("stuck on token: {:?}", self.current_kind()));
                    self.bump();
                }
            }
        } else {
            self.error("expected '{' or ';'");
        }

        self.finish_node();
    }

    /// QualifiedName = IDENT ('.' IDENT)*
    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect(SyntaxKind::IDENT);
        loop {
            self.skip_trivia();
            if self.at(SyntaxKind::DOT) {
                self.bump();
                self.skip_trivia();
                self.expect(SyntaxKind::IDENT);
            } else {
                break;
            }
        }
        self.finish_node();
    }

    // =========================================================================
    // Grammar: members
    // =========================================================================

    /// Member = AttributeList* Modifier* (TypeDecl | DelegateDecl | EventDecl
    ///        | DestructorDecl | ConversionOperatorDecl | ConstructorDecl
    ///        | TypedMember)
    fn parse_member(&mut self) {
        let cp = self.builder.checkpoint();

        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
            self.skip_trivia();
        }

        while self.at_modifier() {
            self.bump();
            self.skip_trivia();
        }

        match self.current_kind() {
            SyntaxKind::CLASS_KW
            | SyntaxKind::STRUCT_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::ENUM_KW => self.parse_type_decl(cp),
            SyntaxKind::DELEGATE_KW => self.parse_delegate(cp),
            SyntaxKind::EVENT_KW => self.parse_event(cp),
            SyntaxKind::TILDE => self.parse_destructor(cp),
            // 'implicit'/'explicit' were consumed as modifiers above
            SyntaxKind::OPERATOR_KW => self.parse_conversion_operator(cp),
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::L_PAREN => self.parse_constructor(cp),
            k if k == SyntaxKind::IDENT
                || k.is_predefined_type()
                || k == SyntaxKind::REF_KW
                || k == SyntaxKind::L_PAREN =>
            {
                self.parse_typed_member(cp)
            }
            _ => self.error_member(cp, format!("unexpected token: {:?}", self.current_kind())),
        }
    }

    /// Modifier position also accepts the contextual 'partial'/'async' when a
    /// declaration keeps going afterwards.
    fn at_modifier(&mut self) -> bool {
        if self.current_kind().is_modifier() {
            return true;
        }
        if self.at(SyntaxKind::IDENT) && matches!(self.current_text(), "partial" | "async") {
            let next = self.nth(1);
            return next == SyntaxKind::IDENT
                || next.is_predefined_type()
                || next.is_modifier()
                || matches!(
                    next,
                    SyntaxKind::CLASS_KW
                        | SyntaxKind::STRUCT_KW
                        | SyntaxKind::INTERFACE_KW
                        | SyntaxKind::ENUM_KW
                        | SyntaxKind::VOID_KW
                        | SyntaxKind::EVENT_KW
                        | SyntaxKind::DELEGATE_KW
                );
        }
        false
    }

    /// TypeDecl = ('class'|'struct'|'interface'|'enum') IDENT TypeParamList?
    ///            BaseList? WhereClause* '{' Member* '}' ';'?
    ///
    /// Members are direct children of the declaration node; there is no
    /// intermediate body node, so parent-chain walks see the declarations
    /// themselves.
    fn parse_type_decl(&mut self, cp: Checkpoint) {
        let node_kind = match self.current_kind() {
            SyntaxKind::CLASS_KW => SyntaxKind::CLASS_DECL,
            SyntaxKind::STRUCT_KW => SyntaxKind::STRUCT_DECL,
            SyntaxKind::INTERFACE_KW => SyntaxKind::INTERFACE_DECL,
            _ => SyntaxKind::ENUM_DECL,
        };
        let is_enum = node_kind == SyntaxKind::ENUM_DECL;
        self.start_node_at(cp, node_kind);

        self.bump(); // keyword
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();

        if self.at(SyntaxKind::LT) {
            self.parse_type_param_list();
            self.skip_trivia();
        }

        if self.at(SyntaxKind::COLON) {
            self.bump();
            while !self.at_eof()
                && !self.at(SyntaxKind::L_BRACE)
                && !(self.at(SyntaxKind::IDENT) && self.current_text() == "where")
            {
                self.bump();
            }
        }
        self.parse_where_clauses();

        if self.at(SyntaxKind::L_BRACE) {
            if is_enum {
                // Enum members are not function-like; keep them as a token run
                self.bump_balanced_braces();
            } else {
                self.bump(); // '{'
                loop {
                    let pos_before = self.pos;
                    self.skip_trivia();
                    if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                        break;
                    }
                    self.parse_member();
                    if self.pos == pos_before && !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                        self.error(format!("stuck on token: {:?}", self.current_kind()));
                        self.bump();
                    }
                }
                self.expect(SyntaxKind::R_BRACE);
            }
        } else {
            self.error("expected '{'");
        }

        self.skip_trivia();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// DelegateDecl = 'delegate' <tokens> ';'
    fn parse_delegate(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::DELEGATE_DECL);
        self.expect(SyntaxKind::DELEGATE_KW);
        self.bump_soup_to_semicolon();
        self.finish_node();
    }

    /// EventDecl = 'event' TypeRef ExplicitInterfaceSpecifier? IDENT
    ///             (AccessorList | <tokens> ';')
    fn parse_event(&mut self, cp: Checkpoint) {
        self.expect(SyntaxKind::EVENT_KW);
        self.skip_trivia();
        self.parse_type_ref();
        self.skip_trivia();

        // Optional explicit interface qualifier before the event name
        if let Some(scan) = self.scan_member_name() {
            if let Some(qual_end) = scan.qualifier_end {
                self.start_node(SyntaxKind::EXPLICIT_INTERFACE_SPECIFIER);
                self.bump_until(qual_end);
                self.finish_node();
                self.skip_trivia();
            }
        }

        let name_ok = self.at(SyntaxKind::IDENT);
        if name_ok {
            self.bump();
        }
        self.skip_trivia();

        if name_ok && self.at(SyntaxKind::L_BRACE) {
            self.start_node_at(cp, SyntaxKind::EVENT_DECL);
            self.parse_accessor_list();
        } else {
            // Field-like event: declarators and initializers up to ';'
            self.start_node_at(cp, SyntaxKind::EVENT_FIELD_DECL);
            self.bump_soup_to_semicolon();
        }
        self.finish_node();
    }

    /// DestructorDecl = '~' IDENT ParamList FunctionBody
    fn parse_destructor(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::DESTRUCTOR_DECL);
        self.expect(SyntaxKind::TILDE);
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.parse_param_list();
        self.skip_trivia();
        self.parse_function_body();
        self.finish_node();
    }

    /// ConversionOperatorDecl = 'operator' TypeRef ParamList FunctionBody
    /// (the 'implicit'/'explicit' keyword sits among the modifiers)
    fn parse_conversion_operator(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::CONVERSION_OPERATOR_DECL);
        self.expect(SyntaxKind::OPERATOR_KW);
        self.skip_trivia();
        self.parse_type_ref();
        self.skip_trivia();
        self.parse_param_list();
        self.skip_trivia();
        self.parse_function_body();
        self.finish_node();
    }

    /// ConstructorDecl = IDENT ParamList (':' Initializer)? FunctionBody
    fn parse_constructor(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::CONSTRUCTOR_DECL);
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.parse_param_list();
        self.skip_trivia();

        if self.at(SyntaxKind::COLON) {
            // ': this(...)' / ': base(...)', a balanced run up to the body
            let mut parens = 0u32;
            let mut brackets = 0u32;
            let mut braces = 0u32;
            while !self.at_eof() {
                match self.current_kind() {
                    SyntaxKind::L_PAREN => parens += 1,
                    SyntaxKind::R_PAREN => parens = parens.saturating_sub(1),
                    SyntaxKind::L_BRACKET => brackets += 1,
                    SyntaxKind::R_BRACKET => brackets = brackets.saturating_sub(1),
                    SyntaxKind::L_BRACE if parens == 0 && brackets == 0 && braces == 0 => break,
                    SyntaxKind::L_BRACE => braces += 1,
                    SyntaxKind::R_BRACE => braces = braces.saturating_sub(1),
                    SyntaxKind::SEMICOLON if parens == 0 && brackets == 0 && braces == 0 => break,
                    SyntaxKind::FAT_ARROW if parens == 0 && brackets == 0 && braces == 0 => break,
                    _ => {}
                }
                self.bump();
            }
        }
        self.parse_function_body();
        self.finish_node();
    }

    /// TypedMember: a member that starts with a return/field type: method,
    /// property, indexer, operator or field. The kind is decided by what
    /// follows the name and the node is wrapped retroactively via checkpoint.
    fn parse_typed_member(&mut self, cp: Checkpoint) {
        self.parse_type_ref();
        self.skip_trivia();

        if self.at(SyntaxKind::OPERATOR_KW) {
            self.parse_operator_tail(cp);
            return;
        }

        let Some(scan) = self.scan_member_name() else {
            self.error_member(cp, "expected member name");
            return;
        };

        if let Some(qual_end) = scan.qualifier_end {
            self.start_node(SyntaxKind::EXPLICIT_INTERFACE_SPECIFIER);
            self.bump_until(qual_end);
            self.finish_node();
            self.skip_trivia();
        }

        if scan.final_is_this {
            self.start_node_at(cp, SyntaxKind::INDEXER_DECL);
            self.expect(SyntaxKind::THIS_KW);
            self.skip_trivia();
            self.parse_bracketed_param_list();
            self.skip_trivia();
            self.parse_property_body();
            self.finish_node();
            return;
        }

        match self.kind_at(scan.after_idx) {
            SyntaxKind::L_PAREN => {
                self.start_node_at(cp, SyntaxKind::METHOD_DECL);
                self.expect(SyntaxKind::IDENT);
                self.skip_trivia();
                if self.at(SyntaxKind::LT) {
                    self.parse_type_param_list();
                    self.skip_trivia();
                }
                self.parse_param_list();
                self.skip_trivia();
                self.parse_where_clauses();
                self.parse_function_body();
                self.finish_node();
            }
            SyntaxKind::L_BRACE | SyntaxKind::FAT_ARROW => {
                self.start_node_at(cp, SyntaxKind::PROPERTY_DECL);
                self.expect(SyntaxKind::IDENT);
                self.skip_trivia();
                self.parse_property_body();
                self.finish_node();
            }
            _ => {
                self.start_node_at(cp, SyntaxKind::FIELD_DECL);
                self.expect(SyntaxKind::IDENT);
                self.bump_soup_to_semicolon();
                self.finish_node();
            }
        }
    }

    /// OperatorDecl tail: 'operator' <op-token> ParamList FunctionBody.
    /// Trivia between the keyword and the operator token stays inside the
    /// node so a selection over the gap still maps to this declaration.
    fn parse_operator_tail(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::OPERATOR_DECL);
        self.expect(SyntaxKind::OPERATOR_KW);
        self.skip_trivia();
        if self.at_overloadable_operator() {
            self.bump();
        } else {
            self.error(format!(
                "expected an overloadable operator, found {:?}",
                self.current_kind()
            ));
        }
        self.skip_trivia();
        self.parse_param_list();
        self.skip_trivia();
        self.parse_function_body();
        self.finish_node();
    }

    fn at_overloadable_operator(&self) -> bool {
        matches!(
            self.current_kind(),
            SyntaxKind::PLUS
                | SyntaxKind::MINUS
                | SyntaxKind::BANG
                | SyntaxKind::TILDE
                | SyntaxKind::PLUS_PLUS
                | SyntaxKind::MINUS_MINUS
                | SyntaxKind::TRUE_KW
                | SyntaxKind::FALSE_KW
                | SyntaxKind::STAR
                | SyntaxKind::SLASH
                | SyntaxKind::PERCENT
                | SyntaxKind::AMP
                | SyntaxKind::PIPE
                | SyntaxKind::CARET
                | SyntaxKind::LT_LT
                | SyntaxKind::GT_GT
                | SyntaxKind::GT_GT_GT
                | SyntaxKind::EQ_EQ
                | SyntaxKind::BANG_EQ
                | SyntaxKind::LT
                | SyntaxKind::GT
                | SyntaxKind::LT_EQ
                | SyntaxKind::GT_EQ
        )
    }

    // =========================================================================
    // Grammar: member pieces
    // =========================================================================

    /// AttributeList = '[' <balanced tokens> ']'
    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_LIST);
        debug_assert!(self.at(SyntaxKind::L_BRACKET));
        let mut depth = 0u32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_BRACKET => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    /// TypeRef: a type as it appears in a member header. Structure is not
    /// preserved; only the token run and its extent matter.
    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);

        if self.at(SyntaxKind::REF_KW) {
            self.bump();
            self.skip_trivia();
            if self.at(SyntaxKind::READONLY_KW) {
                self.bump();
                self.skip_trivia();
            }
        }

        // Type atom: predefined type, identifier, or tuple type
        match self.current_kind() {
            k if k.is_predefined_type() => self.bump(),
            SyntaxKind::IDENT => self.bump(),
            SyntaxKind::L_PAREN => {
                let mut depth = 0u32;
                while !self.at_eof() {
                    match self.current_kind() {
                        SyntaxKind::L_PAREN => depth += 1,
                        SyntaxKind::R_PAREN => {
                            depth = depth.saturating_sub(1);
                            if depth == 0 {
                                self.bump();
                                break;
                            }
                        }
                        _ => {}
                    }
                    self.bump();
                }
            }
            _ => {
                self.error(format!("expected a type, found {:?}", self.current_kind()));
                self.finish_node();
                return;
            }
        }

        // Continuations: '.' segments, generic arguments, array ranks,
        // nullable and pointer markers. Trivia is only consumed when a
        // continuation actually follows, so the node ends at its last token.
        loop {
            let peek = self.peek_idx(self.pos);
            match self.kind_at(peek) {
                SyntaxKind::DOT | SyntaxKind::COLON_COLON
                    if self.kind_at(self.peek_idx(peek + 1)) == SyntaxKind::IDENT =>
                {
                    self.bump_until(peek);
                    self.bump(); // '.' or '::'
                    self.skip_trivia();
                    self.bump(); // IDENT
                }
                SyntaxKind::LT => {
                    let Some(close) = self.scan_angles(peek) else {
                        break;
                    };
                    self.bump_until(close);
                }
                SyntaxKind::L_BRACKET => {
                    // Array rank: only commas allowed inside
                    let mut idx = self.peek_idx(peek + 1);
                    while self.kind_at(idx) == SyntaxKind::COMMA {
                        idx = self.peek_idx(idx + 1);
                    }
                    if self.kind_at(idx) != SyntaxKind::R_BRACKET {
                        break;
                    }
                    self.bump_until(idx + 1);
                }
                SyntaxKind::QUESTION | SyntaxKind::STAR => {
                    self.bump_until(peek);
                    self.bump();
                }
                _ => break,
            }
        }

        self.finish_node();
    }

    /// TypeParamList = '<' <names, commas, variance, attributes> '>'
    fn parse_type_param_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);
        self.expect(SyntaxKind::LT);
        while !self.at_eof()
            && !self.at(SyntaxKind::GT)
            && !self.at(SyntaxKind::L_PAREN)
            && !self.at(SyntaxKind::L_BRACE)
            && !self.at(SyntaxKind::SEMICOLON)
        {
            self.bump();
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    /// ParamList = '(' <balanced tokens> ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        if !self.at(SyntaxKind::L_PAREN) {
            self.error("expected '('");
            self.finish_node();
            return;
        }
        let mut depth = 0u32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    /// Indexer parameters: '[' <balanced tokens> ']'
    fn parse_bracketed_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        if !self.at(SyntaxKind::L_BRACKET) {
            self.error("expected '['");
            self.finish_node();
            return;
        }
        let mut depth = 0u32;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_BRACKET => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    /// WhereClause*: generic constraints, kept as a token run in the parent
    fn parse_where_clauses(&mut self) {
        while self.at(SyntaxKind::IDENT) && self.current_text() == "where" {
            let mut parens = 0u32;
            while !self.at_eof() {
                match self.current_kind() {
                    SyntaxKind::L_PAREN => parens += 1,
                    SyntaxKind::R_PAREN => parens = parens.saturating_sub(1),
                    SyntaxKind::L_BRACE | SyntaxKind::SEMICOLON | SyntaxKind::FAT_ARROW
                        if parens == 0 =>
                    {
                        break
                    }
                    SyntaxKind::R_BRACE => break,
                    _ => {}
                }
                self.bump();
            }
            self.skip_trivia();
        }
    }

    /// FunctionBody = Block | '=>' <tokens> ';' | ';'
    fn parse_function_body(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::FAT_ARROW => self.parse_expression_body(),
            SyntaxKind::SEMICOLON => self.bump(),
            _ => self.error(format!(
                "expected a body or ';', found {:?}",
                self.current_kind()
            )),
        }
    }

    /// Block = '{' <balanced tokens> '}'
    ///
    /// Statements, including local functions, are not parsed.
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.bump_balanced_braces();
        self.finish_node();
    }

    /// ExpressionBody = '=>' <tokens> ';'
    fn parse_expression_body(&mut self) {
        self.start_node(SyntaxKind::EXPRESSION_BODY);
        self.expect(SyntaxKind::FAT_ARROW);
        self.bump_soup_to_semicolon();
        self.finish_node();
    }

    /// PropertyBody = AccessorList ('=' <tokens> ';')? | '=>' <tokens> ';'
    fn parse_property_body(&mut self) {
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_accessor_list();
            self.skip_trivia();
            if self.at(SyntaxKind::EQ) {
                // Property initializer
                self.bump_soup_to_semicolon();
            }
        } else if self.at(SyntaxKind::FAT_ARROW) {
            self.parse_expression_body();
        } else {
            self.error(format!(
                "expected '{{' or '=>', found {:?}",
                self.current_kind()
            ));
        }
    }

    /// AccessorList = '{' AccessorDecl* '}'
    fn parse_accessor_list(&mut self) {
        self.start_node(SyntaxKind::ACCESSOR_LIST);
        self.expect(SyntaxKind::L_BRACE);

        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            self.parse_accessor();
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// AccessorDecl = AttributeList* Modifier* ('get'|'set'|'init'|'add'|'remove')
    ///                (';' | Block | '=>' <tokens> ';')
    ///
    /// Accessor names are contextual keywords: they arrive from the lexer as
    /// IDENT and are re-tagged here.
    fn parse_accessor(&mut self) {
        let cp = self.builder.checkpoint();

        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
            self.skip_trivia();
        }
        while self.current_kind().is_modifier() {
            self.bump();
            self.skip_trivia();
        }

        let keyword = match (self.current_kind(), self.current_text()) {
            (SyntaxKind::IDENT, "get") => Some(SyntaxKind::GET_KW),
            (SyntaxKind::IDENT, "set") => Some(SyntaxKind::SET_KW),
            (SyntaxKind::IDENT, "init") => Some(SyntaxKind::INIT_KW),
            (SyntaxKind::IDENT, "add") => Some(SyntaxKind::ADD_KW),
            (SyntaxKind::IDENT, "remove") => Some(SyntaxKind::REMOVE_KW),
            _ => None,
        };

        let Some(keyword) = keyword else {
            self.error_member(cp, format!("expected an accessor, found {:?}", self.current_kind()));
            return;
        };

        self.start_node_at(cp, SyntaxKind::ACCESSOR_DECL);
        self.bump_as(keyword);
        self.skip_trivia();
        self.parse_function_body();
        self.finish_node();
    }

    // =========================================================================
    // Member-name scanning (raw lookahead, no emission)
    // =========================================================================

    /// Scan a (possibly explicit-interface-qualified) member name starting at
    /// the current position. Returns `None` when the tokens do not form a
    /// member name.
    fn scan_member_name(&self) -> Option<NameScan> {
        let mut qualifier_end = None;
        let mut idx = self.peek_idx(self.pos);

        loop {
            match self.kind_at(idx) {
                SyntaxKind::THIS_KW => {
                    return Some(NameScan {
                        qualifier_end,
                        final_is_this: true,
                        after_idx: self.peek_idx(idx + 1),
                    });
                }
                SyntaxKind::IDENT => {
                    let mut after = self.peek_idx(idx + 1);
                    if self.kind_at(after) == SyntaxKind::LT {
                        if let Some(close) = self.scan_angles(after) {
                            after = self.peek_idx(close);
                        }
                    }
                    if self.kind_at(after) == SyntaxKind::DOT {
                        // Qualifier segment; keep going past the dot
                        qualifier_end = Some(after + 1);
                        idx = self.peek_idx(after + 1);
                        continue;
                    }
                    // Final segment; `after` already sits past any
                    // type-parameter list
                    return Some(NameScan {
                        qualifier_end,
                        final_is_this: false,
                        after_idx: after,
                    });
                }
                _ => return None,
            }
        }
    }
}

/// The scanned shape of a (possibly qualified) member name
struct NameScan {
    /// Raw index one past the final qualifier '.', when an explicit
    /// interface specifier precedes the name
    qualifier_end: Option<usize>,
    /// The member is an indexer (`this`)
    final_is_this: bool,
    /// Raw index of the first non-trivia token after the complete name
    /// (past the type-parameter list, when present)
    after_idx: usize,
}
