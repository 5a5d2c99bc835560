use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .intlrc.json"));

    let content = test.read_file(".intlrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["messagesDir"], "./messages");
    assert_eq!(parsed["moduleSourceName"], "react-intl");
    assert_eq!(parsed["enforceDefaultMessage"], true);
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(".intlrc.json already exists"));
    assert_eq!(test.read_file(".intlrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "src/app.jsx",
        r#"import { FormattedMessage } from 'react-intl';
export const App = () => <FormattedMessage id="app.title" defaultMessage="Title" />;
"#,
    )?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "check should work with initialized config. stdout: {}",
        stdout(&output)
    );

    Ok(())
}
