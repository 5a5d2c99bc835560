//! Per-file transformation: parse, match, validate, rewrite, repeated for
//! the configured number of passes.
//!
//! [`process_file`] wraps [`transform`] with file I/O: it reads the source,
//! stages the catalog and the rewritten source, and commits both only when
//! the whole transformation succeeded.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::{
    core::{
        catalog::{CatalogLayout, StagedWrite, commit_all, render_catalog},
        context::TraversalContext,
        data::{FileIdentity, MessageDescriptor},
        matcher::DeclarationMatcher,
        options::{ExtractOptions, Pass},
        parsers::parse_source,
        rewrite::apply_edits,
    },
    error::ExtractError,
};

/// Output of one pass over one file.
#[derive(Debug)]
pub struct PassOutput {
    pub code: String,
    pub messages: Vec<MessageDescriptor>,
    pub matched: usize,
}

/// Output of all passes over one file.
#[derive(Debug)]
pub struct TransformOutput {
    /// Source after the last pass.
    pub code: String,
    /// Descriptors extracted by the first pass.
    pub messages: Vec<MessageDescriptor>,
    /// Whether `code` differs from the input.
    pub changed: bool,
}

/// Run a single pass over `code`.
pub fn run_pass(
    code: String,
    file: &FileIdentity,
    options: &ExtractOptions,
    pass: Pass,
) -> Result<PassOutput, ExtractError> {
    let parsed = parse_source(code, &file.display_path)?;
    let mut ctx = TraversalContext::new(&parsed, file, options, pass);
    DeclarationMatcher::new(&mut ctx).run(&parsed.module);
    let output = ctx.finish()?;

    let code = if output.edits.is_empty() {
        parsed.code.clone()
    } else {
        apply_edits(&parsed.code, output.edits)
    };
    Ok(PassOutput {
        code,
        messages: output.messages,
        matched: output.matched,
    })
}

/// Transform `code` with `options.passes` passes.
///
/// Each pass parses the output of the previous one. The catalog is what the
/// first pass extracted; later passes only see the already rewritten source.
#[instrument(skip_all, fields(file = %file.display_path))]
pub fn transform(
    code: &str,
    file: &FileIdentity,
    options: &ExtractOptions,
) -> Result<TransformOutput, ExtractError> {
    let first = run_pass(code.to_string(), file, options, Pass::First)?;
    debug!(
        matched = first.matched,
        messages = first.messages.len(),
        "first pass done"
    );

    let mut current = first.code;
    for pass in 1..options.passes.max(1) {
        let output = run_pass(current, file, options, Pass::Repeat)?;
        debug!(pass = pass + 1, matched = output.matched, "repeat pass done");
        current = output.code;
    }

    Ok(TransformOutput {
        changed: current != code,
        code: current,
        messages: first.messages,
    })
}

/// What to write for each processed file.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    /// Where catalogs go; `None` writes no catalog.
    pub catalogs: Option<CatalogLayout>,
    /// Replace sources with their rewritten text.
    pub write_sources: bool,
}

impl OutputPlan {
    /// Extract and validate without touching the filesystem.
    pub fn dry_run() -> Self {
        Self::default()
    }
}

/// Outcome of one successfully processed file.
#[derive(Debug)]
pub struct FileReport {
    pub file: FileIdentity,
    pub messages: Vec<MessageDescriptor>,
    /// Whether the transformation changed the source.
    pub changed: bool,
    /// Files committed to disk.
    pub written: Vec<PathBuf>,
}

/// Read, transform and write one source file.
///
/// Extraction failures surface as [`ExtractError`] inside the returned
/// error; nothing is written for a failed file.
pub fn process_file(
    path: &Path,
    root: &Path,
    options: &ExtractOptions,
    plan: &OutputPlan,
) -> Result<FileReport> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = FileIdentity::relative_to(path.to_string_lossy(), root);
    let output = transform(&code, &file, options)?;

    let mut staged = Vec::new();
    if let Some(layout) = &plan.catalogs {
        let catalog = render_catalog(&output.messages)?;
        staged.push(StagedWrite::stage(&layout.catalog_path(path), &catalog)?);
    }
    if plan.write_sources && output.changed {
        staged.push(StagedWrite::stage(path, &output.code)?);
    }
    let written = commit_all(staged)?;
    for target in &written {
        info!(file = %file.display_path, path = %target.display(), "wrote");
    }

    Ok(FileReport {
        file,
        messages: output.messages,
        changed: output.changed,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate::OverrideDescriptor;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn file() -> FileIdentity {
        FileIdentity::new("src/app.js")
    }

    fn catalog(messages: &[MessageDescriptor]) -> Value {
        serde_json::to_value(messages).unwrap()
    }

    #[test]
    fn test_file_without_declarations_is_unchanged() {
        let code = "export const add = (a, b) => a + b;\n";
        let out = transform(code, &file(), &ExtractOptions::default()).unwrap();
        assert!(!out.changed);
        assert_eq!(out.code, code);
        assert!(out.messages.is_empty());
    }

    #[test]
    fn test_hash_ids_are_stable_and_idempotent() {
        let code = r#"import { defineMessages } from 'react-intl';
export default defineMessages({
  hello: { defaultMessage: 'Hello {name}', description: 'Greeting' },
});
"#;
        let options = ExtractOptions::default();
        let first = transform(code, &file(), &options).unwrap();
        let again = transform(code, &file(), &options).unwrap();
        assert_eq!(first.code, again.code);
        assert_eq!(first.messages, again.messages);

        let id = options.id_pattern.interpolate("Hello {name}#Greeting");
        assert_eq!(first.messages[0].id, id);
        assert!(first.code.contains(&format!("id: \"{}\"", id)));
        assert!(!first.code.contains("description"));

        // The rewritten source is already final.
        let second = transform(&first.code, &file(), &options).unwrap();
        assert!(!second.changed);
        assert_eq!(second.messages[0].id, id);
    }

    #[test]
    fn test_two_passes_with_enforced_descriptions() {
        let code = r#"import { FormattedMessage } from 'react-intl';
const a = <FormattedMessage defaultMessage="Hi" description="Greets" />;
"#;
        let options = ExtractOptions {
            enforce_descriptions: true,
            passes: 2,
            ..Default::default()
        };
        let out = transform(code, &file(), &options).unwrap();
        assert_eq!(out.messages.len(), 1);
        assert_eq!(out.messages[0].description, Some(json!("Greets")));
        assert!(!out.code.contains("description"));
    }

    #[test]
    fn test_enforced_description_failure() {
        let code = r#"import { defineMessage } from 'react-intl';
defineMessage({ defaultMessage: 'Hi' });
"#;
        let options = ExtractOptions {
            enforce_descriptions: true,
            ..Default::default()
        };
        let err = transform(code, &file(), &options).unwrap_err();
        assert!(err.to_string().contains("Message must have a `description`"));
        assert_eq!(err.file(), "src/app.js");
    }

    #[test]
    fn test_conflicting_duplicate_ids() {
        let code = r#"import { defineMessages } from 'react-intl';
defineMessages({
  a: { id: 'same', defaultMessage: 'One' },
  b: { id: 'same', defaultMessage: 'Two' },
});
"#;
        let err = transform(code, &file(), &ExtractOptions::default()).unwrap_err();
        assert_eq!(err.rule(), "conflicting-duplicate-id");
    }

    #[test]
    fn test_icu_syntax_error() {
        let code = r#"import { FormattedMessage } from 'react-intl';
const a = <FormattedMessage id="x" defaultMessage="Hello, {.}" />;
"#;
        let err = transform(code, &file(), &ExtractOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Expected argNameOrNumber or whitespace but \".\" found."));
    }

    #[test]
    fn test_override_message() {
        let code = r#"import { FormattedMessage } from 'react-intl';
const a = <FormattedMessage id="foo" defaultMessage="Hello" description="Greeting" />;
"#;
        fn hook(id: &str, message: Option<&str>, description: Option<&Value>) -> OverrideDescriptor {
            let message = message.unwrap_or_default();
            let kind = if description.is_some_and(Value::is_string) {
                "string"
            } else {
                "undefined"
            };
            OverrideDescriptor::new(format!("HELLO.{}.{}.{}", id, message.len(), kind))
                .field("SUPER_DEFAULT_MESSAGE", message)
                .default_message(format!("bye {}", message))
        }
        let options = ExtractOptions::default().with_override(hook);
        let out = transform(code, &file(), &options).unwrap();

        assert_eq!(
            catalog(&out.messages),
            json!([{
                "id": "HELLO.foo.5.string",
                "defaultMessage": "bye Hello",
                "SUPER_DEFAULT_MESSAGE": "Hello"
            }])
        );
        assert!(out.code.contains(
            r#"<FormattedMessage id="HELLO.foo.5.string" defaultMessage="bye Hello" SUPER_DEFAULT_MESSAGE="Hello" />"#
        ));
    }

    #[test]
    fn test_remove_default_message_then_repeat_pass() {
        let code = r#"import { defineMessages } from 'react-intl';
defineMessages({ a: { id: 'a', defaultMessage: 'A', description: 'd' } });
"#;
        let options = ExtractOptions {
            remove_default_message: true,
            passes: 2,
            ..Default::default()
        };
        let out = transform(code, &file(), &options).unwrap();
        assert!(out.code.contains("defineMessages({ a: { id: 'a' } })"), "{}", out.code);
        assert_eq!(out.messages[0].default_message.as_deref(), Some("A"));
    }

    #[test]
    fn test_module_source_name() {
        let code = r#"import { defineMessage } from 'react-i18n';
defineMessage({ id: 'x', defaultMessage: 'X' });
"#;
        let default = transform(code, &file(), &ExtractOptions::default()).unwrap();
        assert!(default.messages.is_empty());

        let options = ExtractOptions {
            module_source_name: "react-i18n".to_string(),
            ..Default::default()
        };
        let custom = transform(code, &file(), &options).unwrap();
        assert_eq!(custom.messages.len(), 1);
    }

    #[test]
    fn test_extract_source_location() {
        let code = r#"import { FormattedMessage } from 'react-intl';
const a = <FormattedMessage id="x" defaultMessage="X" />;
"#;
        let options = ExtractOptions {
            extract_source_location: true,
            ..Default::default()
        };
        let out = transform(code, &file(), &options).unwrap();
        assert_eq!(
            catalog(&out.messages),
            json!([{
                "id": "x",
                "defaultMessage": "X",
                "file": "src/app.js",
                "start": {"line": 2, "column": 10},
                "end": {"line": 2, "column": 56}
            }])
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = transform("const = ;", &file(), &ExtractOptions::default()).unwrap_err();
        assert_eq!(err.rule(), "parse-error");
    }

    const GREETING: &str = r#"import { defineMessage } from 'react-intl';
export const m = defineMessage({ defaultMessage: 'Hi', description: 'Greets' });
"#;

    fn project(code: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src/greeting.js");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, code).unwrap();
        (dir, source)
    }

    #[test]
    fn test_process_file_writes_catalog_and_source() {
        let (dir, source) = project(GREETING);
        let plan = OutputPlan {
            catalogs: Some(CatalogLayout::new(dir.path().join("messages"), dir.path())),
            write_sources: true,
        };
        let report = process_file(&source, dir.path(), &ExtractOptions::default(), &plan).unwrap();

        assert_eq!(report.file.display_path, "src/greeting.js");
        assert!(report.changed);
        assert_eq!(report.written.len(), 2);

        let catalog = fs::read_to_string(dir.path().join("messages/src/greeting.js.json")).unwrap();
        let catalog: Value = serde_json::from_str(&catalog).unwrap();
        assert_eq!(catalog[0]["defaultMessage"], json!("Hi"));
        assert_eq!(catalog[0]["description"], json!("Greets"));

        let rewritten = fs::read_to_string(&source).unwrap();
        assert!(rewritten.contains(&format!("id: \"{}\"", report.messages[0].id)));
    }

    #[test]
    fn test_process_file_dry_run_writes_nothing() {
        let (dir, source) = project(GREETING);
        let report =
            process_file(&source, dir.path(), &ExtractOptions::default(), &OutputPlan::dry_run())
                .unwrap();

        assert!(report.written.is_empty());
        assert_eq!(fs::read_to_string(&source).unwrap(), GREETING);
        assert!(!dir.path().join("messages").exists());
    }

    #[test]
    fn test_failed_file_leaves_no_output() {
        let (dir, source) = project(
            "import { defineMessage } from 'react-intl';\ndefineMessage({ id: 'x' });\n",
        );
        let plan = OutputPlan {
            catalogs: Some(CatalogLayout::new(dir.path().join("messages"), dir.path())),
            write_sources: true,
        };
        let err = process_file(&source, dir.path(), &ExtractOptions::default(), &plan).unwrap_err();

        let extract = err.downcast_ref::<ExtractError>().unwrap();
        assert_eq!(extract.rule(), "missing-default-message");
        assert!(!dir.path().join("messages").exists());
    }

    #[test]
    fn test_file_without_messages_gets_empty_catalog() {
        let (dir, source) = project("export const x = 1;\n");
        let plan = OutputPlan {
            catalogs: Some(CatalogLayout::new(dir.path().join("messages"), dir.path())),
            write_sources: true,
        };
        let report = process_file(&source, dir.path(), &ExtractOptions::default(), &plan).unwrap();

        assert!(!report.changed);
        assert_eq!(report.written, vec![dir.path().join("messages/src/greeting.js.json")]);
        let catalog = fs::read_to_string(&report.written[0]).unwrap();
        insta::assert_snapshot!(catalog.trim_end(), @"[]");
    }

    #[test]
    fn test_same_stem_sources_keep_separate_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let js = dir.path().join("src/a.js");
        let tsx = dir.path().join("src/a.tsx");
        fs::write(
            &js,
            "import { defineMessage } from 'react-intl';\ndefineMessage({ id: 'from.js', defaultMessage: 'JS' });\n",
        )
        .unwrap();
        fs::write(
            &tsx,
            "import { defineMessage } from 'react-intl';\ndefineMessage({ id: 'from.tsx', defaultMessage: 'TSX' });\n",
        )
        .unwrap();

        let plan = OutputPlan {
            catalogs: Some(CatalogLayout::new(dir.path().join("messages"), dir.path())),
            write_sources: false,
        };
        let options = ExtractOptions::default();
        let a = process_file(&js, dir.path(), &options, &plan).unwrap();
        let b = process_file(&tsx, dir.path(), &options, &plan).unwrap();
        assert_ne!(a.written, b.written);

        let read = |name: &str| -> Value {
            let text = fs::read_to_string(dir.path().join("messages/src").join(name)).unwrap();
            serde_json::from_str(&text).unwrap()
        };
        assert_eq!(read("a.js.json")[0]["id"], json!("from.js"));
        assert_eq!(read("a.tsx.json")[0]["id"], json!("from.tsx"));
    }
}
