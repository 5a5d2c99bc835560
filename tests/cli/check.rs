use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/messages.js",
        r#"import { defineMessages } from 'react-intl';
export default defineMessages({
  title: { id: 'app.title', defaultMessage: 'Welcome, {name}!' },
});
"#,
    )?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(stdout(&output).contains("Checked 1 source file - 1 message, no problems found"));
    assert!(!test.root().join("messages").exists());

    Ok(())
}

#[test]
fn test_check_reports_missing_default_message() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        r#"import { defineMessage } from 'react-intl';

export const title = defineMessage({ id: 'title' });
"#,
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("Message must have a `defaultMessage`"));
    assert!(out.contains("--> src/app.js:3:36"));
    assert!(out.contains("3 | export const title = defineMessage({ id: 'title' });"));
    assert!(out.contains("1 file failed"));

    Ok(())
}

#[test]
fn test_check_enforce_descriptions_flag() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.jsx",
        r#"import { FormattedMessage } from 'react-intl';
export const A = () => <FormattedMessage defaultMessage="Hello" />;
"#,
    )?;

    let default = test.check_command().output()?;
    assert_eq!(default.status.code(), Some(0));

    let enforced = test.check_command().arg("--enforce-descriptions").output()?;
    assert_eq!(enforced.status.code(), Some(1));
    assert!(stdout(&enforced).contains("Message must have a `description`"));

    Ok(())
}

#[test]
fn test_check_reports_invalid_icu_syntax() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.jsx",
        r#"import { FormattedMessage } from 'react-intl';
export const A = () => <FormattedMessage id="x" defaultMessage="Hello, {.}" />;
"#,
    )?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Expected argNameOrNumber or whitespace but \".\" found."));

    Ok(())
}

#[test]
fn test_check_continues_after_failing_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/bad.js",
        r#"import { defineMessages } from 'react-intl';
defineMessages({
  a: { id: 'same', defaultMessage: 'One' },
  b: { id: 'same', defaultMessage: 'Two' },
});
"#,
    )?;
    test.write_file(
        "src/good.js",
        "import { defineMessage } from 'react-intl';\ndefineMessage({ id: 'ok', defaultMessage: 'OK' });\n",
    )?;

    let output = test.check_command().arg("-v").output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("conflicting-duplicate-id"));
    assert!(out.contains("first defined at src/bad.js:3:"));
    assert!(out.contains("src/good.js 1 message"));
    assert!(out.contains("1 file failed, 1 file processed"));

    Ok(())
}

#[test]
fn test_check_with_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlrc.json", r#"{ "idInterpolationPattern": "[md5:contenthash]" }"#)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("idInterpolationPattern"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().arg("--help").output()?;
    let out = stdout(&output);
    assert!(out.contains("extract"));
    assert!(out.contains("check"));
    assert!(out.contains("init"));

    Ok(())
}
