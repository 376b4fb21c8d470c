//! Recursive-descent parser for KV3 text.

use super::cursor::Cursor;
use super::{Kv3Error, Kv3Value};

/// Deepest container nesting accepted before the document is rejected
pub const MAX_NESTING_DEPTH: usize = 256;

/// KV3 text parser
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`
    pub const fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            depth: 0,
        }
    }

    /// Parse a complete document: optional header comment, then one root object.
    pub fn parse_document(mut self) -> Result<Kv3Value, Kv3Error> {
        self.skip_trivia()?;
        if !self.cursor.eat("{") {
            return Err(self.error("expected '{' to open the root object"));
        }
        let root = self.nested(Self::parse_object)?;

        self.skip_trivia()?;
        if !self.cursor.is_eof() {
            return Err(self.error("unexpected content after the root object"));
        }
        Ok(root)
    }

    fn parse_value(&mut self) -> Result<Kv3Value, Kv3Error> {
        if self.cursor.eat("{") {
            return self.nested(Self::parse_object);
        }
        if self.cursor.eat("[") {
            return self.nested(Self::parse_array);
        }
        if self.cursor.eat("#[") {
            return self.parse_blob();
        }
        if self.cursor.starts_with("\"") {
            return self.parse_string().map(Kv3Value::Scalar);
        }
        self.parse_scalar()
    }

    /// Run a container parser one level deeper
    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Kv3Value, Kv3Error>,
    ) -> Result<Kv3Value, Kv3Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    /// Members after the opening `{`
    fn parse_object(&mut self) -> Result<Kv3Value, Kv3Error> {
        let mut members = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.cursor.eat("}") {
                return Ok(Kv3Value::Object(members));
            }
            if self.cursor.is_eof() {
                return Err(self.error("unterminated object"));
            }

            let key = self.parse_key()?;
            self.skip_trivia()?;
            if !self.cursor.eat("=") {
                return Err(self.error(&format!("expected '=' after key '{}'", key)));
            }
            self.skip_trivia()?;
            let value = self.parse_value()?;
            members.push((key, value));

            self.skip_trivia()?;
            self.cursor.eat(",");
        }
    }

    /// Elements after the opening `[`
    fn parse_array(&mut self) -> Result<Kv3Value, Kv3Error> {
        let mut elements = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.cursor.eat("]") {
                return Ok(Kv3Value::Array(elements));
            }
            if self.cursor.is_eof() {
                return Err(self.error("unterminated array"));
            }

            elements.push(self.parse_value()?);

            self.skip_trivia()?;
            if !self.cursor.eat(",") && !self.cursor.starts_with("]") {
                return Err(self.error("expected ',' or ']' in array"));
            }
        }
    }

    /// Hex tokens after the opening `#[`, normalized to single spaces
    fn parse_blob(&mut self) -> Result<Kv3Value, Kv3Error> {
        let start = self.cursor.position().byte;
        self.cursor.eat_while(|c| c != ']');
        if self.cursor.is_eof() {
            return Err(self.error("unterminated binary blob"));
        }
        let end = self.cursor.position().byte;
        self.cursor.advance();

        let tokens: Vec<&str> = self.cursor.slice(start, end).split_ascii_whitespace().collect();
        Ok(Kv3Value::Blob(tokens.join(" ")))
    }

    /// Quoted or triple-quoted string, returned with its quotes
    fn parse_string(&mut self) -> Result<String, Kv3Error> {
        let start = self.cursor.position().byte;

        if self.cursor.eat("\"\"\"") {
            while !self.cursor.eat("\"\"\"") {
                if self.cursor.advance().is_none() {
                    return Err(self.error("unterminated multi-line string"));
                }
            }
        } else {
            self.cursor.advance();
            loop {
                match self.cursor.advance() {
                    Some('"') => break,
                    Some('\\') => {
                        self.cursor.advance();
                    }
                    Some(_) => {}
                    None => return Err(self.error("unterminated string")),
                }
            }
        }

        let end = self.cursor.position().byte;
        Ok(self.cursor.slice(start, end).to_string())
    }

    /// Bare token (number, bool, null), optionally a flagged string like `resource:"x"`
    fn parse_scalar(&mut self) -> Result<Kv3Value, Kv3Error> {
        let start = self.cursor.position().byte;
        self.cursor.eat_while(|c| {
            !c.is_whitespace() && !matches!(c, ',' | ']' | '}' | '=' | '"' | '{' | '[')
        });

        let token = self.cursor.slice(start, self.cursor.position().byte);
        if token.is_empty() {
            return Err(match self.cursor.peek() {
                Some(c) => self.error(&format!("unexpected character '{}'", c)),
                None => self.error("unexpected end of input"),
            });
        }

        if token.ends_with(':') && self.cursor.starts_with("\"") {
            let flagged = self.parse_string()?;
            return Ok(Kv3Value::Scalar(format!("{}{}", token, flagged)));
        }
        Ok(Kv3Value::Scalar(token.to_string()))
    }

    fn parse_key(&mut self) -> Result<String, Kv3Error> {
        if self.cursor.starts_with("\"") {
            let quoted = self.parse_string()?;
            return Ok(unquote(&quoted).to_string());
        }

        let start = self.cursor.position().byte;
        self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
        let key = self.cursor.slice(start, self.cursor.position().byte);
        if key.is_empty() {
            return Err(match self.cursor.peek() {
                Some(c) => self.error(&format!("expected key, found '{}'", c)),
                None => self.error("expected key"),
            });
        }
        Ok(key.to_string())
    }

    /// Whitespace, `<!-- -->` headers, `//` and `/* */` comments
    fn skip_trivia(&mut self) -> Result<(), Kv3Error> {
        loop {
            self.cursor.eat_while(char::is_whitespace);

            if self.cursor.eat("<!--") {
                self.skip_until("-->", "unterminated header comment")?;
            } else if self.cursor.eat("//") {
                self.cursor.eat_while(|c| c != '\n');
            } else if self.cursor.eat("/*") {
                self.skip_until("*/", "unterminated block comment")?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_until(&mut self, terminator: &str, message: &str) -> Result<(), Kv3Error> {
        while !self.cursor.eat(terminator) {
            if self.cursor.advance().is_none() {
                return Err(self.error(message));
            }
        }
        Ok(())
    }

    fn error(&self, message: &str) -> Kv3Error {
        let position = self.cursor.position();
        Kv3Error::Syntax {
            line: position.line,
            column: position.column,
            message: message.to_string(),
        }
    }
}

/// Strip the surrounding quotes of a single-line string literal
fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal)
}
