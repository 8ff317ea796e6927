//! Link tree: the internal stand-in for an external link-notation parser/printer
//!
//! Not part of the codec proper - this module only implements the narrow
//! subset of surface syntax the encoder emits and the decoder consumes
//! (whitespace-separated tokens, `(`-`)` grouping, optional `<id>:` prefix).
//! It exists purely as plumbing since no link-notation crate is available in
//! this workspace; keep additions here minimal.

use std::fmt;

/// A parsed top-level or nested link.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTree {
    /// A bare identifier token.
    LinkRef(String),
    /// A parenthesised group, optionally named with `<id>:`.
    LinkNode {
        id: Option<String>,
        children: Vec<LinkTree>,
    },
}

/// A tokenizer/parser failure, carrying the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at byte {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Ident(String),
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == b'(' {
            tokens.push((Token::Open, i));
            i += 1;
            continue;
        }
        if c == b')' {
            tokens.push((Token::Close, i));
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'('
            && bytes[i] != b')'
        {
            i += 1;
        }
        tokens.push((Token::Ident(text[start..i].to_string()), start));
    }
    Ok(tokens)
}

/// Split a leading `<id>:` prefix off the identifier text of an opening
/// token's first child, if present. The id itself never contains `:` or
/// whitespace per the grammar, so a single split on the first colon suffices.
fn split_id_prefix(ident: &str) -> (Option<String>, Option<String>) {
    match ident.split_once(':') {
        Some((id, rest)) if !id.is_empty() => {
            if rest.is_empty() {
                (Some(id.to_string()), None)
            } else {
                (Some(id.to_string()), Some(rest.to_string()))
            }
        }
        _ => (None, Some(ident.to_string())),
    }
}

struct Parser<'a> {
    tokens: &'a [(Token, usize)],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&(Token, usize)> {
        let t = self.tokens.get(self.pos);
        self.pos += 1;
        t
    }

    fn parse_one(&mut self) -> Result<LinkTree, ParseError> {
        match self.bump() {
            Some((Token::Ident(s), _)) => Ok(LinkTree::LinkRef(s.clone())),
            Some((Token::Open, open_pos)) => {
                let open_pos = *open_pos;
                let mut id = None;
                let mut children = Vec::new();

                // The `<id>:` prefix, if present, is glued onto the first
                // token inside the parens (no space between id and colon).
                if let Some((Token::Ident(first), _)) = self.peek() {
                    let (maybe_id, maybe_rest) = split_id_prefix(first);
                    if maybe_id.is_some() {
                        self.bump();
                        id = maybe_id;
                        if let Some(rest) = maybe_rest {
                            children.push(LinkTree::LinkRef(rest));
                        }
                    }
                }

                loop {
                    match self.peek() {
                        Some((Token::Close, _)) => {
                            self.bump();
                            break;
                        }
                        Some(_) => children.push(self.parse_one()?),
                        None => {
                            return Err(ParseError {
                                position: open_pos,
                                message: "unclosed '('".to_string(),
                            });
                        }
                    }
                }

                Ok(LinkTree::LinkNode { id, children })
            }
            Some((Token::Close, pos)) => Err(ParseError {
                position: *pos,
                message: "unexpected ')'".to_string(),
            }),
            None => Err(ParseError {
                position: self.tokens.last().map(|(_, p)| *p + 1).unwrap_or(0),
                message: "unexpected end of input".to_string(),
            }),
        }
    }
}

/// Parse a whole document: zero or more sibling top-level links.
pub fn parse_document(text: &str) -> Result<Vec<LinkTree>, ParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let mut out = Vec::new();
    while parser.peek().is_some() {
        out.push(parser.parse_one()?);
    }
    Ok(out)
}

/// Render a link tree back to surface syntax, matching exactly what
/// [`parse_document`] accepts.
pub fn print(tree: &LinkTree) -> String {
    let mut out = String::new();
    write_tree(tree, &mut out);
    out
}

fn write_tree(tree: &LinkTree, out: &mut String) {
    match tree {
        LinkTree::LinkRef(s) => out.push_str(s),
        LinkTree::LinkNode { id, children } => {
            out.push('(');
            if let Some(id) = id {
                out.push_str(id);
                out.push(':');
            }
            for (i, child) in children.iter().enumerate() {
                if i > 0 || id.is_some() {
                    out.push(' ');
                }
                write_tree(child, out);
            }
            out.push(')');
        }
    }
}
