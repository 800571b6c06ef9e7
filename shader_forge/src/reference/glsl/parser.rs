/// Recursive-descent parser for GLSL ES 1.00
///
/// Syntax errors abort parsing (returned as `Err`). Semantic errors such as a
/// misplaced qualifier are collected and parsing continues, so one log can
/// report several of them.
///
/// Nesting of expressions, statements and struct definitions is capped at
/// `MAX_NESTING_DEPTH`; deeper input is rejected with a diagnostic instead of
/// exhausting the stack.

use rustc_hash::FxHashSet;

use crate::context::ShaderStage;
use crate::reference::glsl::lexer::{Token, TokenKind};
use crate::reference::glsl::types::{
    is_builtin_function, is_builtin_variable, is_precision_qualifier, is_reserved, GlslType,
    StorageQualifier, VariableType,
};
use crate::reference::glsl::{Diagnostic, InterfaceVariable, ShaderInterface};

type ParseResult<T> = Result<T, Diagnostic>;

/// Deepest nesting of expressions, statements and structs accepted
pub(crate) const MAX_NESTING_DEPTH: usize = 128;

const EXPRESSION_TOO_COMPLEX: &str = "Expression too complex";
const NESTING_TOO_DEEP: &str = "Nesting too deep";

/// Returned by the cursor past the end of the token slice
static EOF_TOKEN: Token = Token { kind: TokenKind::Eof, line: 1 };

/// Binary operators by precedence, loosest first
const BINARY_LEVELS: [&[&str]; 11] = [
    &["||"],
    &["^^"],
    &["&&"],
    &["|"],
    &["^"],
    &["&"],
    &["==", "!="],
    &["<", ">", "<=", ">="],
    &["<<", ">>"],
    &["+", "-"],
    &["*", "/", "%"],
];

const ASSIGNMENT_OPS: [&str; 11] = ["=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "|=", "^="];

const UNARY_OPS: [&str; 6] = ["++", "--", "+", "-", "!", "~"];

/// Names and default float precision declared in one block
#[derive(Default)]
struct Scope {
    names: FxHashSet<String>,
    float_precision: bool,
}

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    stage: ShaderStage,
    depth: usize,
    struct_names: FxHashSet<String>,
    functions: FxHashSet<String>,
    /// Innermost last; `scopes[0]` is the global scope
    scopes: Vec<Scope>,
    interface: ShaderInterface,
    errors: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// `tokens` normally ends with an `Eof` token, as produced by `tokenize`;
    /// a slice without one is read as if it had one
    pub(crate) fn new(tokens: &'a [Token], stage: ShaderStage) -> Self {
        let global = Scope {
            names: FxHashSet::default(),
            // The vertex stage has a default float precision (highp)
            float_precision: stage == ShaderStage::Vertex,
        };
        Self {
            tokens,
            pos: 0,
            stage,
            depth: 0,
            struct_names: FxHashSet::default(),
            functions: FxHashSet::default(),
            scopes: vec![global],
            interface: ShaderInterface::new(stage),
            errors: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> Result<ShaderInterface, Vec<Diagnostic>> {
        while !self.at_eof() {
            if let Err(syntax) = self.parse_external_declaration() {
                self.errors.push(syntax);
                return Err(self.errors);
            }
        }

        if self.errors.is_empty() {
            Ok(self.interface)
        } else {
            Err(self.errors)
        }
    }

    // ===== TOKEN CURSOR =====

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&EOF_TOKEN)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek_is(&self, p: &str) -> bool {
        self.peek().is_punct(p)
    }

    fn peek_word(&self) -> Option<&str> {
        self.peek().ident()
    }

    fn syntax_error(token: &Token) -> Diagnostic {
        Diagnostic::new(token.line, token.text(), "syntax error")
    }

    fn expect_punct(&mut self, p: &str) -> ParseResult<()> {
        if self.peek_is(p) {
            self.advance();
            Ok(())
        } else {
            Err(Self::syntax_error(self.peek()))
        }
    }

    fn expect_word(&mut self, word: &str) -> ParseResult<()> {
        if self.peek_word() == Some(word) {
            self.advance();
            Ok(())
        } else {
            Err(Self::syntax_error(self.peek()))
        }
    }

    /// Identifier usable as a variable, field or function name
    fn expect_name(&mut self) -> ParseResult<Token> {
        match self.peek().ident() {
            Some(word) if !is_reserved(word) => Ok(self.advance()),
            _ => Err(Self::syntax_error(self.peek())),
        }
    }

    fn semantic_error(&mut self, line: u32, token: &str, message: &str) {
        self.errors.push(Diagnostic::new(line, token, message));
    }

    // ===== NESTING AND SCOPES =====

    /// Step one level deeper; fails at the current token once the cap is hit.
    /// Every successful `enter` is paired with `leave`.
    fn enter(&mut self, message: &str) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.peek();
            return Err(Diagnostic::new(token.line, token.text(), message));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a local name in the innermost scope
    fn declare_local(&mut self, name: &Token) {
        let inserted = match self.scopes.last_mut() {
            Some(scope) => scope.names.insert(name.text().to_string()),
            None => true,
        };
        if !inserted {
            self.semantic_error(name.line, name.text(), "redefinition");
        }
    }

    fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.names.contains(name)) || is_builtin_variable(name, self.stage)
    }

    fn is_callable(&self, name: &str) -> bool {
        self.struct_names.contains(name) || self.functions.contains(name) || is_builtin_function(name)
    }

    // ===== TYPES =====

    fn is_type_start(&self, token: &Token) -> bool {
        match token.ident() {
            Some("struct") => true,
            Some(word) => GlslType::from_keyword(word).is_some() || self.struct_names.contains(word),
            None => false,
        }
    }

    fn parse_type_specifier(&mut self) -> ParseResult<GlslType> {
        let token = self.peek().clone();
        match token.ident() {
            Some("struct") => self.parse_struct_specifier(),
            Some(word) => {
                if let Some(ty) = GlslType::from_keyword(word) {
                    self.advance();
                    Ok(ty)
                } else if self.struct_names.contains(word) {
                    self.advance();
                    Ok(GlslType::Struct(word.to_string()))
                } else {
                    Err(Self::syntax_error(&token))
                }
            }
            None => Err(Self::syntax_error(&token)),
        }
    }

    fn parse_struct_specifier(&mut self) -> ParseResult<GlslType> {
        self.enter(NESTING_TOO_DEEP)?;
        let result = self.parse_struct_body();
        self.leave();
        result
    }

    fn parse_struct_body(&mut self) -> ParseResult<GlslType> {
        let struct_token = self.advance();
        let name = if self.peek_is("{") {
            format!("<anonymous@{}>", struct_token.line)
        } else {
            let name_token = self.expect_name()?;
            name_token.text().to_string()
        };
        self.expect_punct("{")?;

        let mut member_count = 0;
        while !self.peek_is("}") {
            let precision = self.parse_optional_precision();
            let member_type_token = self.peek().clone();
            let member_type = self.parse_type_specifier()?;
            if member_type == GlslType::Void {
                self.semantic_error(member_type_token.line, "void", "illegal use of type 'void'");
            }
            self.check_float_precision(&member_type, precision.as_deref(), member_type_token.line);
            loop {
                self.expect_name()?;
                self.parse_array_suffix()?;
                member_count += 1;
                if self.peek_is(",") {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect_punct(";")?;
        }
        self.expect_punct("}")?;

        if member_count == 0 {
            self.semantic_error(struct_token.line, &name, "structs must have at least one member");
        }
        self.struct_names.insert(name.clone());
        Ok(GlslType::Struct(name))
    }

    fn parse_optional_precision(&mut self) -> Option<String> {
        if self.peek_word().is_some_and(is_precision_qualifier) {
            Some(self.advance().text().to_string())
        } else {
            None
        }
    }

    /// `[size]` after a declarator; the size is kept as written
    fn parse_array_suffix(&mut self) -> ParseResult<Option<String>> {
        if !self.peek_is("[") {
            return Ok(None);
        }
        self.advance();
        if self.peek_is("]") {
            let token = self.peek().clone();
            self.semantic_error(token.line, "[", "array size must be specified");
            self.advance();
            return Ok(Some(String::new()));
        }
        let start = self.pos;
        self.parse_conditional()?;
        let size: String = self.tokens[start..self.pos].iter().map(|t| t.text()).collect();
        self.expect_punct("]")?;
        Ok(Some(size))
    }

    /// A float-based declaration needs an explicit precision or a default
    /// `precision ... float;` in an enclosing scope
    fn check_float_precision(&mut self, ty: &GlslType, precision: Option<&str>, line: u32) {
        let has_default = self.scopes.iter().any(|scope| scope.float_precision);
        if ty.is_float_based() && precision.is_none() && !has_default {
            self.semantic_error(line, &ty.to_string(), "No precision specified for (float)");
        }
    }

    // ===== GLOBAL SCOPE =====

    fn parse_external_declaration(&mut self) -> ParseResult<()> {
        if self.peek_is(";") {
            self.advance();
            return Ok(());
        }
        if self.peek_word() == Some("precision") {
            return self.parse_precision_statement();
        }

        let first = self.peek().clone();
        let mut invariant = false;
        if first.ident() == Some("invariant") {
            self.advance();
            invariant = true;
            // `invariant name, ...;` re-declares existing varyings
            if let Some(word) = self.peek_word() {
                if !is_reserved(word) && !self.struct_names.contains(word) {
                    loop {
                        self.expect_name()?;
                        if self.peek_is(",") {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    return self.expect_punct(";");
                }
            }
        }

        let qualifier = self.peek_word().and_then(StorageQualifier::from_keyword);
        if qualifier.is_some() {
            self.advance();
        }
        if invariant && qualifier != Some(StorageQualifier::Varying) {
            self.semantic_error(first.line, "invariant", "can only be used with varying");
        }

        let precision = self.parse_optional_precision();
        let type_token = self.peek().clone();
        let ty = self.parse_type_specifier()?;

        if self.peek_is(";") {
            self.advance();
            return Ok(());
        }

        let name = self.expect_name()?;

        if self.peek_is("(") {
            if let Some(q) = qualifier {
                self.semantic_error(name.line, q.keyword(), "no qualifiers allowed for function return");
            }
            if ty != GlslType::Void {
                self.check_float_precision(&ty, precision.as_deref(), type_token.line);
            }
            return self.parse_function(ty, name);
        }

        if ty == GlslType::Void {
            self.semantic_error(name.line, name.text(), "illegal use of type 'void'");
        }
        self.check_float_precision(&ty, precision.as_deref(), type_token.line);

        let mut name = name;
        loop {
            let array = self.parse_array_suffix()?;
            let initialized = if self.peek_is("=") {
                self.advance();
                self.parse_assignment()?;
                true
            } else {
                false
            };

            self.declare_global(qualifier, &precision, &ty, &name, array, initialized);

            if self.peek_is(",") {
                self.advance();
                name = self.expect_name()?;
            } else {
                break;
            }
        }
        self.expect_punct(";")
    }

    fn parse_precision_statement(&mut self) -> ParseResult<()> {
        self.advance();
        if self.parse_optional_precision().is_none() {
            return Err(Self::syntax_error(self.peek()));
        }
        let type_token = self.peek().clone();
        let ty = self.parse_type_specifier()?;
        match ty {
            GlslType::Float => {
                if let Some(scope) = self.scopes.last_mut() {
                    scope.float_precision = true;
                }
            }
            GlslType::Int | GlslType::Sampler2D | GlslType::SamplerCube => {}
            _ => self.semantic_error(type_token.line, type_token.text(),
                "illegal type argument for default precision qualifier"),
        }
        self.expect_punct(";")
    }

    fn declare_global(
        &mut self,
        qualifier: Option<StorageQualifier>,
        precision: &Option<String>,
        ty: &GlslType,
        name: &Token,
        array: Option<String>,
        initialized: bool,
    ) {
        let line = name.line;
        let text = name.text();

        if !self.scopes[0].names.insert(text.to_string()) {
            self.semantic_error(line, text, "redefinition");
            return;
        }

        let Some(qualifier) = qualifier else {
            return;
        };

        match qualifier {
            StorageQualifier::Const => {
                if !initialized {
                    self.semantic_error(line, text, "variables with qualifier 'const' must be initialized");
                }
                return;
            }
            StorageQualifier::Attribute => {
                if self.stage != ShaderStage::Vertex {
                    self.semantic_error(line, "attribute", "supported in vertex shaders only");
                }
                if !ty.is_float_based() {
                    self.semantic_error(line, "attribute", "cannot be bool, int, sampler or structure");
                }
                if array.is_some() {
                    self.semantic_error(line, "attribute", "cannot declare arrays of this qualifier");
                }
            }
            StorageQualifier::Varying => {
                if !ty.is_float_based() {
                    self.semantic_error(line, "varying", "cannot be bool, int, sampler or structure");
                }
            }
            StorageQualifier::Uniform => {}
        }

        if initialized {
            self.semantic_error(line, text, "cannot initialize this type of qualifier");
        }

        let variable = InterfaceVariable {
            name: text.to_string(),
            ty: VariableType { base: ty.clone(), array },
            precision: precision.clone(),
            line,
        };
        match qualifier {
            StorageQualifier::Attribute => self.interface.attributes.push(variable),
            StorageQualifier::Varying => self.interface.varyings.push(variable),
            StorageQualifier::Uniform => self.interface.uniforms.push(variable),
            StorageQualifier::Const => {}
        }
    }

    fn parse_function(&mut self, return_type: GlslType, name: Token) -> ParseResult<()> {
        self.functions.insert(name.text().to_string());
        self.expect_punct("(")?;
        self.push_scope();
        let result = self.parse_function_rest(return_type, name);
        self.pop_scope();
        result
    }

    /// Parameters, then either `;` or the body; parameters live in their own scope
    fn parse_function_rest(&mut self, return_type: GlslType, name: Token) -> ParseResult<()> {
        let mut param_count = 0;

        if self.peek_word() == Some("void") && self.peek_at(1).is_punct(")") {
            self.advance();
        } else if !self.peek_is(")") {
            loop {
                self.parse_parameter()?;
                param_count += 1;
                if self.peek_is(",") {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect_punct(")")?;

        if self.peek_is(";") {
            self.advance();
            return Ok(());
        }
        if !self.peek_is("{") {
            return Err(Self::syntax_error(self.peek()));
        }

        if name.text() == "main" {
            if self.interface.has_main {
                self.semantic_error(name.line, "main", "function already has a body");
            }
            if return_type != GlslType::Void {
                self.semantic_error(name.line, "main", "main function cannot return a value");
            }
            if param_count > 0 {
                self.semantic_error(name.line, "main", "function cannot take any parameter(s)");
            }
            self.interface.has_main = true;
        }

        self.parse_compound_statement()
    }

    fn parse_parameter(&mut self) -> ParseResult<()> {
        if self.peek_word() == Some("const") {
            self.advance();
        }
        if matches!(self.peek_word(), Some("in") | Some("out") | Some("inout")) {
            self.advance();
        }
        let precision = self.parse_optional_precision();
        let type_token = self.peek().clone();
        let ty = self.parse_type_specifier()?;
        if ty == GlslType::Void {
            self.semantic_error(type_token.line, "void", "illegal use of type 'void'");
        }
        self.check_float_precision(&ty, precision.as_deref(), type_token.line);

        if let Some(word) = self.peek_word() {
            if !is_reserved(word) {
                let name = self.advance();
                self.parse_array_suffix()?;
                self.declare_local(&name);
            }
        }
        Ok(())
    }

    // ===== STATEMENTS =====

    fn parse_compound_statement(&mut self) -> ParseResult<()> {
        self.expect_punct("{")?;
        self.push_scope();
        while !self.peek_is("}") {
            if self.at_eof() {
                return Err(Self::syntax_error(self.peek()));
            }
            self.parse_statement()?;
        }
        self.pop_scope();
        self.expect_punct("}")
    }

    fn parse_statement(&mut self) -> ParseResult<()> {
        self.enter(NESTING_TOO_DEEP)?;
        let result = self.parse_statement_kind();
        self.leave();
        result
    }

    fn parse_statement_kind(&mut self) -> ParseResult<()> {
        if self.peek_is("{") {
            return self.parse_compound_statement();
        }
        if self.peek_is(";") {
            self.advance();
            return Ok(());
        }

        match self.peek_word() {
            // `else if` chains are walked in a loop, not by recursion
            Some("if") => loop {
                self.advance();
                self.expect_punct("(")?;
                self.parse_expression()?;
                self.expect_punct(")")?;
                self.parse_statement()?;
                if self.peek_word() != Some("else") {
                    return Ok(());
                }
                self.advance();
                if self.peek_word() != Some("if") {
                    return self.parse_statement();
                }
            },
            Some("for") => {
                self.advance();
                self.push_scope();
                let result = self.parse_for_rest();
                self.pop_scope();
                result
            }
            Some("while") => {
                self.advance();
                self.expect_punct("(")?;
                self.parse_expression()?;
                self.expect_punct(")")?;
                self.parse_statement()
            }
            Some("do") => {
                self.advance();
                self.parse_statement()?;
                self.expect_word("while")?;
                self.expect_punct("(")?;
                self.parse_expression()?;
                self.expect_punct(")")?;
                self.expect_punct(";")
            }
            Some("return") => {
                self.advance();
                if !self.peek_is(";") {
                    self.parse_expression()?;
                }
                self.expect_punct(";")
            }
            Some("break") | Some("continue") => {
                self.advance();
                self.expect_punct(";")
            }
            Some("discard") => {
                let token = self.advance();
                if self.stage != ShaderStage::Fragment {
                    self.semantic_error(token.line, "discard", "supported in fragment shaders only");
                }
                self.expect_punct(";")
            }
            Some("precision") => self.parse_precision_statement(),
            _ => {
                if self.is_declaration_start() {
                    self.parse_local_declaration()
                } else {
                    self.parse_expression()?;
                    self.expect_punct(";")
                }
            }
        }
    }

    /// `( init ; condition ; step ) body`; the init declaration is scoped to the loop
    fn parse_for_rest(&mut self) -> ParseResult<()> {
        self.expect_punct("(")?;
        if self.peek_is(";") {
            self.advance();
        } else if self.is_declaration_start() {
            self.parse_local_declaration()?;
        } else {
            self.parse_expression()?;
            self.expect_punct(";")?;
        }
        if !self.peek_is(";") {
            self.parse_expression()?;
        }
        self.expect_punct(";")?;
        if !self.peek_is(")") {
            self.parse_expression()?;
        }
        self.expect_punct(")")?;
        self.parse_statement()
    }

    fn is_declaration_start(&self) -> bool {
        let token = self.peek();
        match token.ident() {
            Some("const") | Some("struct") | Some("invariant") => true,
            Some(word) if is_precision_qualifier(word) => true,
            Some(word) if StorageQualifier::from_keyword(word).is_some() => true,
            Some(_) => self.is_type_start(token) && self.peek_at(1).ident().is_some(),
            None => false,
        }
    }

    fn parse_local_declaration(&mut self) -> ParseResult<()> {
        let first = self.peek().clone();
        let mut is_const = false;
        match first.ident().and_then(StorageQualifier::from_keyword) {
            Some(StorageQualifier::Const) => {
                self.advance();
                is_const = true;
            }
            Some(other) => {
                self.advance();
                self.semantic_error(first.line, other.keyword(), "only allowed at global scope");
            }
            None if first.ident() == Some("invariant") => {
                self.advance();
                self.semantic_error(first.line, "invariant", "only allowed at global scope");
            }
            None => {}
        }

        let precision = self.parse_optional_precision();
        let type_token = self.peek().clone();
        let ty = self.parse_type_specifier()?;

        if self.peek_is(";") {
            self.advance();
            return Ok(());
        }
        if ty == GlslType::Void {
            self.semantic_error(type_token.line, "void", "illegal use of type 'void'");
        }
        self.check_float_precision(&ty, precision.as_deref(), type_token.line);

        loop {
            let name = self.expect_name()?;
            self.parse_array_suffix()?;
            if self.peek_is("=") {
                self.advance();
                self.parse_assignment()?;
            } else if is_const {
                self.semantic_error(name.line, name.text(),
                    "variables with qualifier 'const' must be initialized");
            }
            // In scope from the end of its own declarator
            self.declare_local(&name);
            if self.peek_is(",") {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct(";")
    }

    // ===== EXPRESSIONS =====

    fn parse_expression(&mut self) -> ParseResult<()> {
        self.parse_assignment()?;
        while self.peek_is(",") {
            self.advance();
            self.parse_assignment()?;
        }
        Ok(())
    }

    /// Every nested expression (parentheses, subscripts, call arguments,
    /// ternary operands, chained assignments) passes through here
    fn parse_assignment(&mut self) -> ParseResult<()> {
        self.enter(EXPRESSION_TOO_COMPLEX)?;
        let result = self.parse_assignment_chain();
        self.leave();
        result
    }

    fn parse_assignment_chain(&mut self) -> ParseResult<()> {
        self.parse_conditional()?;
        if ASSIGNMENT_OPS.iter().any(|op| self.peek_is(op)) {
            self.advance();
            self.parse_assignment()?;
        }
        Ok(())
    }

    fn parse_conditional(&mut self) -> ParseResult<()> {
        self.parse_binary(0)?;
        if self.peek_is("?") {
            self.advance();
            self.parse_expression()?;
            self.expect_punct(":")?;
            self.parse_assignment()?;
        }
        Ok(())
    }

    /// Level of the binary operator at the cursor, if any
    fn binary_level(&self) -> Option<usize> {
        BINARY_LEVELS
            .iter()
            .position(|ops| ops.iter().any(|op| self.peek_is(op)))
    }

    /// Precedence climbing over operators binding at `min_level` or tighter
    fn parse_binary(&mut self, min_level: usize) -> ParseResult<()> {
        self.parse_unary()?;
        while let Some(level) = self.binary_level() {
            if level < min_level {
                break;
            }
            self.advance();
            self.parse_binary(level + 1)?;
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> ParseResult<()> {
        while UNARY_OPS.iter().any(|op| self.peek_is(op)) {
            self.advance();
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<()> {
        self.parse_primary()?;
        loop {
            if self.peek_is("[") {
                self.advance();
                self.parse_expression()?;
                self.expect_punct("]")?;
            } else if self.peek_is(".") {
                self.advance();
                self.expect_name()?;
            } else if self.peek_is("++") || self.peek_is("--") {
                self.advance();
            } else {
                return Ok(());
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<()> {
        let token = self.advance();
        match &token.kind {
            TokenKind::Number(_) => Ok(()),
            TokenKind::Punct("(") => {
                self.parse_expression()?;
                self.expect_punct(")")
            }
            TokenKind::Ident(word) => {
                let word = word.as_str();
                if word == "true" || word == "false" {
                    return Ok(());
                }
                if let Some(ty) = GlslType::from_keyword(word) {
                    // Constructor such as vec4(...)
                    if ty == GlslType::Void || !self.peek_is("(") {
                        return Err(Self::syntax_error(&token));
                    }
                    self.advance();
                    return self.parse_call_arguments();
                }
                if is_reserved(word) {
                    return Err(Self::syntax_error(&token));
                }
                if self.peek_is("(") {
                    if !self.is_callable(word) {
                        self.semantic_error(token.line, word, "no matching overloaded function found");
                    }
                    self.advance();
                    return self.parse_call_arguments();
                }
                if !self.is_declared(word) {
                    self.semantic_error(token.line, word, "undeclared identifier");
                }
                self.interface.referenced.insert(word.to_string());
                Ok(())
            }
            _ => Err(Self::syntax_error(&token)),
        }
    }

    /// Arguments after the opening parenthesis, up to and including `)`
    fn parse_call_arguments(&mut self) -> ParseResult<()> {
        if self.peek_is(")") {
            self.advance();
            return Ok(());
        }
        if self.peek_word() == Some("void") && self.peek_at(1).is_punct(")") {
            self.advance();
            self.advance();
            return Ok(());
        }
        loop {
            self.parse_assignment()?;
            if self.peek_is(",") {
                self.advance();
            } else {
                break;
            }
        }
        self.expect_punct(")")
    }
}
