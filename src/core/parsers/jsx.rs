use std::{fmt, sync::Arc};

use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::core::data::SourcePosition;
use crate::error::ExtractError;

/// A parsed source file together with what is needed to map spans back to
/// line/column positions and byte offsets in the original text.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    /// The text that was parsed.
    pub code: String,
    /// Position of the first byte of `code` in `source_map`.
    pub start_pos: BytePos,
}

impl fmt::Debug for ParsedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedSource")
            .field("items", &self.module.body.len())
            .field("code_len", &self.code.len())
            .field("start_pos", &self.start_pos)
            .finish_non_exhaustive()
    }
}

impl ParsedSource {
    /// Line (1-based) and column (0-based) of a byte position.
    pub fn position(&self, pos: BytePos) -> SourcePosition {
        let loc = self.source_map.lookup_char_pos(pos);
        SourcePosition::new(loc.line, loc.col_display)
    }

    /// Byte range of `span` within `code`.
    pub fn byte_range(&self, span: Span) -> std::ops::Range<usize> {
        let lo = (span.lo - self.start_pos).0 as usize;
        let hi = (span.hi - self.start_pos).0 as usize;
        lo..hi
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        let range = self.byte_range(span);
        self.code.get(range).unwrap_or_default()
    }
}

/// Pick the parser syntax from the file extension.
///
/// `.ts` files are parsed without JSX so that `<T>value` casts keep working;
/// everything that is not TypeScript is parsed as ECMAScript with JSX.
pub fn syntax_for(file_path: &str) -> Syntax {
    let extension = std::path::Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        }),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse JS/JSX/TS/TSX source into a module.
///
/// Each call gets its own `SourceMap` and swc globals, so files can be
/// parsed on different threads independently.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource, ExtractError> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());
        let start_pos = source_file.start_pos;

        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let to_error = |err: swc_ecma_parser::error::Error| {
            let loc = source_map.lookup_char_pos(err.span().lo);
            ExtractError::Parse {
                file: file_path.to_string(),
                message: format!("{:?}", err.kind()),
                position: Some(SourcePosition::new(loc.line, loc.col_display)),
            }
        };

        let module = parser.parse_module().map_err(to_error)?;
        if let Some(err) = parser.take_errors().into_iter().next() {
            return Err(to_error(err));
        }

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
            code,
            start_pos,
        })
    })
}
