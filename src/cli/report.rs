//! Report formatting and printing.
//!
//! Failures are printed cargo-style: severity and message, a clickable
//! `--> path:line:col`, then the offending source line with a caret.

use std::{
    fs,
    io::{self, Write},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandKind, CommandResult, CommandSummary, ExtractSummary, FileFailure, InitSummary,
};
use crate::error::ExtractError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Init(summary) => print_init(summary, writer),
        CommandSummary::Extract(summary) | CommandSummary::Check(summary) => {
            if verbose {
                print_files(summary, writer);
            }
            report_failures(&result.failures, writer);
            print_outcome(result.kind, summary, result.failures.len(), writer);
        }
    }
}

/// Print every failure followed by a blank line.
pub fn report_failures<W: Write>(failures: &[FileFailure], writer: &mut W) {
    let width = failures
        .iter()
        .filter_map(|f| f.extract_error().and_then(ExtractError::position))
        .map(|p| p.line.to_string().len())
        .max()
        .unwrap_or(1);

    for failure in failures {
        match failure.extract_error() {
            Some(error) => print_extract_error(failure, error, writer, width),
            None => {
                let _ = writeln!(writer, "{}: {:#}", "error".bold().red(), failure.error);
                let _ = writeln!(writer, "  {} {}", "-->".blue(), failure.display_path);
            }
        }
        let _ = writeln!(writer);
    }
}

fn print_extract_error<W: Write>(
    failure: &FileFailure,
    error: &ExtractError,
    writer: &mut W,
    width: usize,
) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "error".bold().red(),
        error,
        error.rule().dimmed().cyan()
    );

    let Some(position) = error.position() else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), failure.display_path);
        return;
    };
    let _ = writeln!(
        writer,
        "  {} {}:{}",
        "-->".blue(),
        failure.display_path,
        position
    );

    if let Some(source_line) = read_line(failure, position.line) {
        let prefix: String = source_line.chars().take(position.column).collect();
        let padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            position.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            "^".red(),
            width = width,
            padding = padding
        );
    }

    if let ExtractError::ConflictingDuplicateId { first, .. } = error {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} first defined at {}:{}",
            "",
            "=".blue(),
            "note:".bold(),
            failure.display_path,
            first,
            width = width
        );
    }
}

fn read_line(failure: &FileFailure, line: usize) -> Option<String> {
    let content = fs::read_to_string(&failure.path).ok()?;
    content
        .lines()
        .nth(line.checked_sub(1)?)
        .map(|l| l.trim_end().to_string())
}

fn print_files<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    for report in &summary.files {
        let count = report.messages.len();
        let _ = writeln!(
            writer,
            "  {} {} {}",
            report.file.display_path,
            count,
            plural(count, "message", "messages").dimmed()
        );
    }
}

fn print_outcome<W: Write>(
    kind: CommandKind,
    summary: &ExtractSummary,
    failed: usize,
    writer: &mut W,
) {
    let files = summary.files.len();
    let messages = summary.message_count();

    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} failed, {} {} processed",
            FAILURE_MARK.red(),
            failed,
            plural(failed, "file", "files").red(),
            files,
            plural(files, "file", "files"),
        );
        return;
    }

    let text = match kind {
        CommandKind::Check => format!(
            "Checked {} source {} - {} {}, no problems found",
            files,
            plural(files, "file", "files"),
            messages,
            plural(messages, "message", "messages")
        ),
        _ => format!(
            "Extracted {} {} from {} source {}",
            messages,
            plural(messages, "message", "messages"),
            files,
            plural(files, "file", "files")
        ),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());

    let changed = summary.changed_count();
    if kind == CommandKind::Extract && changed > 0 {
        if summary.write_sources {
            let _ = writeln!(
                writer,
                "{} {} source {}",
                "Rewrote".green().bold(),
                changed,
                plural(changed, "file", "files")
            );
        } else {
            let _ = writeln!(
                writer,
                "{} {} source {} would be rewritten (use {} to apply)",
                "note:".bold(),
                changed,
                plural(changed, "file", "files"),
                "--write".cyan()
            );
        }
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    match &summary.error {
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", summary.path.display()).green()
            );
        }
        Some(error) => {
            let _ = writeln!(writer, "{}: {}", "error".bold().red(), error);
        }
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{FileIdentity, FileReport, MessageDescriptor, SourcePosition};

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(result: &CommandResult, verbose: bool) -> String {
        let mut output = Vec::new();
        print_to(result, verbose, &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    fn report(path: &str, ids: &[&str]) -> FileReport {
        FileReport {
            file: FileIdentity::new(path),
            messages: ids
                .iter()
                .map(|id| MessageDescriptor::new(*id, Some("x".to_string())))
                .collect(),
            changed: true,
            written: Vec::new(),
        }
    }

    #[test]
    fn test_extract_success_summary() {
        let result = CommandResult {
            kind: CommandKind::Extract,
            summary: CommandSummary::Extract(ExtractSummary {
                files: vec![report("src/a.js", &["a", "b"]), report("src/b.js", &["c"])],
                write_sources: false,
            }),
            failures: Vec::new(),
        };
        let out = render(&result, true);

        assert!(out.contains("src/a.js 2 messages"));
        assert!(out.contains("src/b.js 1 message\n"));
        assert!(out.contains("✓ Extracted 3 messages from 2 source files"));
        assert!(out.contains("2 source files would be rewritten (use --write to apply)"));
    }

    #[test]
    fn test_extract_failure_with_source_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.js");
        fs::write(&path, "import x from 'y';\nconst a = defineMessage({ id: 'é' });\n").unwrap();

        let error = ExtractError::MissingDefaultMessage {
            file: "app.js".to_string(),
            position: SourcePosition::new(2, 10),
        };
        let result = CommandResult {
            kind: CommandKind::Check,
            summary: CommandSummary::Check(ExtractSummary::default()),
            failures: vec![FileFailure {
                path,
                display_path: "app.js".to_string(),
                error: error.into(),
            }],
        };
        let out = render(&result, false);

        assert!(out.contains("error: [React Intl] Message must have a `defaultMessage`."));
        assert!(out.contains("missing-default-message"));
        assert!(out.contains("--> app.js:2:11"));
        assert!(out.contains("2 | const a = defineMessage({ id: 'é' });"));
        assert!(out.contains("  |           ^"));
        assert!(out.contains("✘ 1 file failed, 0 files processed"));
    }

    #[test]
    fn test_io_failure_is_reported_without_position() {
        let result = CommandResult {
            kind: CommandKind::Extract,
            summary: CommandSummary::Extract(ExtractSummary::default()),
            failures: vec![FileFailure {
                path: PathBuf::from("missing.js"),
                display_path: "missing.js".to_string(),
                error: anyhow::anyhow!("Failed to read missing.js"),
            }],
        };
        let out = render(&result, false);
        assert!(out.contains("error: Failed to read missing.js"));
        assert!(out.contains("--> missing.js"));
    }

    #[test]
    fn test_init_messages() {
        let created = CommandResult {
            kind: CommandKind::Init,
            summary: CommandSummary::Init(InitSummary {
                path: PathBuf::from(".intlrc.json"),
                error: None,
            }),
            failures: Vec::new(),
        };
        assert!(render(&created, false).contains("✓ Created .intlrc.json"));

        let exists = CommandResult {
            kind: CommandKind::Init,
            summary: CommandSummary::Init(InitSummary {
                path: PathBuf::from(".intlrc.json"),
                error: Some(".intlrc.json already exists".to_string()),
            }),
            failures: Vec::new(),
        };
        assert!(render(&exists, false).contains("error: .intlrc.json already exists"));
    }
}
