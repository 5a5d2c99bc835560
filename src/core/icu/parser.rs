//! Recursive-descent parser for ICU MessageFormat.
//!
//! Grammar, informally:
//!
//! ```text
//! message   = (text | '#' | argument)*
//! argument  = '{' ws name ws ( '}' | ',' ws format ws '}' )
//! format    = ("number" | "date" | "time") ws (',' style)?
//!           | ("plural" | "selectordinal") ws ',' ws offset? options
//!           | "select" ws ',' ws options
//! offset    = "offset:" ws digits
//! options   = (ws selector ws '{' message '}')+ ws
//! selector  = '=' digits | name
//! ```
//!
//! `#` is only special inside plural branches. Apostrophes follow ICU
//! quoting rules: `''` is a literal apostrophe, and `'` before a syntax
//! character starts a quoted run that ends at the next `'`.

use super::ast::{IcuElement, IcuOption, SimpleKind};
use super::error::IcuSyntaxError;

const ELEMENT_TYPES: &[&str] = &["date", "number", "plural", "select", "selectordinal", "time"];

/// Parse `message`, returning its element tree or the first syntax error.
pub fn parse(message: &str) -> Result<Vec<IcuElement>, IcuSyntaxError> {
    let mut parser = Parser::new(message);
    let elements = parser.message(false, false)?;
    if !parser.at_end() {
        return Err(parser.error(&["\"{\"", "end of input", "message text"]));
    }
    Ok(elements)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

/// Pattern-syntax characters may not appear in argument names or selectors.
fn is_pattern_syntax(c: char) -> bool {
    (c.is_ascii_punctuation() && c != '_')
        || matches!(c, '\u{00A1}'..='\u{00A7}' | '\u{00A9}' | '\u{00AB}' | '\u{00AC}' | '\u{00AE}')
        || matches!(c, '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}')
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !is_pattern_syntax(c)
}

impl Parser {
    fn new(message: &str) -> Self {
        Self {
            chars: message.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char, also: &[&str]) -> Result<(), IcuSyntaxError> {
        if self.eat(c) {
            return Ok(());
        }
        let quoted = format!("{:?}", c.to_string());
        let mut expected: Vec<&str> = vec![quoted.as_str()];
        expected.extend_from_slice(also);
        Err(self.error(&expected))
    }

    /// Build an error at the current position.
    fn error(&self, expected: &[&str]) -> IcuSyntaxError {
        let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        expected.sort();
        expected.dedup();

        let consumed = &self.chars[..self.pos.min(self.chars.len())];
        let offset = consumed.iter().map(|c| c.len_utf8()).sum();
        let line = 1 + consumed.iter().filter(|&&c| c == '\n').count();
        let column = 1 + consumed.iter().rev().take_while(|&&c| c != '\n').count();

        IcuSyntaxError {
            offset,
            line,
            column,
            expected,
            found: self.peek(),
        }
    }

    /// Parse a message body.
    ///
    /// `nested` bodies stop at (without consuming) the closing `}` of their
    /// option; the top-level body stops at end of input.
    fn message(&mut self, nested: bool, in_plural: bool) -> Result<Vec<IcuElement>, IcuSyntaxError> {
        let mut elements = Vec::new();
        let mut text = String::new();

        loop {
            match self.peek() {
                None => {
                    if nested {
                        return Err(self.error(&["\"{\"", "\"}\"", "message text"]));
                    }
                    break;
                }
                Some('}') => {
                    if nested {
                        break;
                    }
                    return Err(self.error(&["\"{\"", "end of input", "message text"]));
                }
                Some('{') => {
                    flush_text(&mut text, &mut elements);
                    elements.push(self.argument(in_plural)?);
                }
                Some('#') if in_plural => {
                    flush_text(&mut text, &mut elements);
                    self.pos += 1;
                    elements.push(IcuElement::Pound);
                }
                Some('\'') => self.apostrophe(&mut text, in_plural),
                Some(c) => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }

        flush_text(&mut text, &mut elements);
        Ok(elements)
    }

    fn apostrophe(&mut self, text: &mut String, in_plural: bool) {
        self.pos += 1;
        match self.peek() {
            Some('\'') => {
                text.push('\'');
                self.pos += 1;
            }
            Some(c) if matches!(c, '{' | '}') || (c == '#' && in_plural) => {
                // Quoted run: everything up to the next lone apostrophe is literal.
                while let Some(c) = self.peek() {
                    if c == '\'' {
                        if self.peek_at(1) == Some('\'') {
                            text.push('\'');
                            self.pos += 2;
                            continue;
                        }
                        self.pos += 1;
                        break;
                    }
                    text.push(c);
                    self.pos += 1;
                }
            }
            _ => text.push('\''),
        }
    }

    fn name(&mut self, expected: &[&str]) -> Result<String, IcuSyntaxError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error(expected));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn argument(&mut self, in_plural: bool) -> Result<IcuElement, IcuSyntaxError> {
        self.expect('{', &[])?;
        self.skip_ws();
        let name = self.name(&["argNameOrNumber", "whitespace"])?;
        self.skip_ws();

        if self.eat('}') {
            return Ok(IcuElement::Argument { name });
        }
        self.expect(',', &["\"}\"", "whitespace"])?;
        self.skip_ws();

        let keyword_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let keyword: String = self.chars[keyword_start..self.pos].iter().collect();

        let quoted: Vec<String> = ELEMENT_TYPES.iter().map(|t| format!("{:?}", t)).collect();
        let quoted: Vec<&str> = quoted.iter().map(String::as_str).collect();

        let element = match keyword.as_str() {
            "plural" | "selectordinal" => {
                self.skip_ws();
                self.expect(',', &["whitespace"])?;
                self.skip_ws();
                let offset = self.plural_offset()?;
                let options = self.options(true)?;
                IcuElement::Plural {
                    name,
                    ordinal: keyword == "selectordinal",
                    offset,
                    options,
                }
            }
            "select" => {
                self.skip_ws();
                self.expect(',', &["whitespace"])?;
                let options = self.options(in_plural)?;
                IcuElement::Select { name, options }
            }
            other => {
                let Some(kind) = SimpleKind::from_keyword(other) else {
                    self.pos = keyword_start;
                    let mut expected = quoted.clone();
                    expected.push("whitespace");
                    return Err(self.error(&expected));
                };
                self.skip_ws();
                let style = if self.eat(',') {
                    Some(self.style()?)
                } else {
                    None
                };
                IcuElement::Simple { name, kind, style }
            }
        };

        self.skip_ws();
        self.expect('}', &["whitespace"])?;
        Ok(element)
    }

    /// Argument style text, e.g. `currency` or `::compact-short`.
    fn style(&mut self) -> Result<String, IcuSyntaxError> {
        self.skip_ws();
        let mut style = String::new();
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => break,
                '}' => depth -= 1,
                _ => {}
            }
            style.push(c);
            self.pos += 1;
        }
        let style = style.trim_end().to_string();
        if style.is_empty() {
            return Err(self.error(&["argument style"]));
        }
        Ok(style)
    }

    fn plural_offset(&mut self) -> Result<i64, IcuSyntaxError> {
        const KEYWORD: &str = "offset:";
        let matches_keyword = KEYWORD
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c));
        if !matches_keyword {
            return Ok(0);
        }
        self.pos += KEYWORD.len();
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error(&["number", "whitespace"]));
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits
            .parse()
            .map_err(|_| self.error(&["number", "whitespace"]))
    }

    fn options(&mut self, in_plural: bool) -> Result<Vec<IcuOption>, IcuSyntaxError> {
        let mut options = Vec::new();
        loop {
            self.skip_ws();
            if !options.is_empty() && self.peek() == Some('}') {
                break;
            }

            let selector = if self.eat('=') {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
                if start == self.pos {
                    return Err(self.error(&["number"]));
                }
                let digits: String = self.chars[start..self.pos].iter().collect();
                format!("={}", digits)
            } else if options.is_empty() {
                self.name(&["\"=\"", "selector", "whitespace"])?
            } else {
                self.name(&["\"=\"", "\"}\"", "selector", "whitespace"])?
            };

            self.skip_ws();
            self.expect('{', &["whitespace"])?;
            let value = self.message(true, in_plural)?;
            self.expect('}', &[])?;
            options.push(IcuOption { selector, value });
        }
        Ok(options)
    }
}

fn flush_text(text: &mut String, elements: &mut Vec<IcuElement>) {
    if !text.is_empty() {
        elements.push(IcuElement::Literal(std::mem::take(text)));
    }
}
