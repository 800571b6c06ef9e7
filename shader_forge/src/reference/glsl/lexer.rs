/// GLSL ES 1.00 tokenizer
///
/// Comments are dropped and preprocessor lines are skipped whole. Every token
/// carries the 1-based line it starts on so diagnostics can point at it.

use crate::reference::glsl::Diagnostic;

/// Multi-character operators, longest first
const OPERATORS: [&str; 21] = [
    "<<=", ">>=",
    "++", "--", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "^^",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
];

const SINGLE_CHAR_PUNCT: &str = "+-*/%<>=!~&|^?:;,.()[]{}";

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(String),
    Punct(&'static str),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    /// Text shown between quotes in diagnostics
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Ident(s) | TokenKind::Number(s) => s,
            TokenKind::Punct(p) => p,
            TokenKind::Eof => "",
        }
    }

    pub fn is_punct(&self, p: &str) -> bool {
        matches!(self.kind, TokenKind::Punct(q) if q == p)
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(s) => Some(s),
            _ => None,
        }
    }
}

fn punct_static(c: char) -> Option<&'static str> {
    let idx = SINGLE_CHAR_PUNCT.find(c)?;
    Some(&SINGLE_CHAR_PUNCT[idx..idx + c.len_utf8()])
}

/// Split `source` into tokens, always terminated by an `Eof` token
pub fn tokenize(source: &str) -> Result<Vec<Token>, Diagnostic> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut i = 0;
    let mut at_line_start = true;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            i += 1;
            at_line_start = true;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Preprocessor directive: skip to end of line
        if c == '#' && at_line_start {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        at_line_start = false;

        // Comments
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '*' {
            let start_line = line;
            i += 2;
            loop {
                if i + 1 >= chars.len() {
                    return Err(Diagnostic::new(start_line, "/*", "unterminated comment"));
                }
                if chars[i] == '*' && chars[i + 1] == '/' {
                    i += 2;
                    break;
                }
                if chars[i] == '\n' {
                    line += 1;
                }
                i += 1;
            }
            continue;
        }

        // Identifiers and keywords
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            tokens.push(Token { kind: TokenKind::Ident(text), line });
            continue;
        }

        // Numeric literals
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit()) {
            let start = i;
            if c == '0' && i + 1 < chars.len() && (chars[i + 1] == 'x' || chars[i + 1] == 'X') {
                i += 2;
                while i < chars.len() && chars[i].is_ascii_hexdigit() {
                    i += 1;
                }
            } else {
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if i < chars.len() && chars[i] == '.' {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
            }
            if i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i] == '_') {
                let bad: String = chars[start..=i].iter().collect();
                return Err(Diagnostic::new(line, &bad, "invalid numeric literal"));
            }
            let text: String = chars[start..i].iter().collect();
            tokens.push(Token { kind: TokenKind::Number(text), line });
            continue;
        }

        // Operators and punctuation
        if let Some(op) = OPERATORS.iter().find(|op| {
            op.chars().enumerate().all(|(k, oc)| chars.get(i + k) == Some(&oc))
        }) {
            tokens.push(Token { kind: TokenKind::Punct(*op), line });
            i += op.len();
            continue;
        }
        if let Some(p) = punct_static(c) {
            tokens.push(Token { kind: TokenKind::Punct(p), line });
            i += 1;
            continue;
        }

        return Err(Diagnostic::new(line, &c.to_string(), "invalid character"));
    }

    tokens.push(Token { kind: TokenKind::Eof, line });
    Ok(tokens)
}
