use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stdout};

const GREETING: &str = r#"import { FormattedMessage } from 'react-intl';

export const Greeting = ({ name }) => (
  <FormattedMessage
    defaultMessage="Hello, {name}!"
    description="Greets the signed-in user"
    values={{ name }}
  />
);
"#;

#[test]
fn test_extract_writes_catalog_without_touching_sources() -> Result<()> {
    let test = CliTest::with_file("src/Greeting.jsx", GREETING)?;

    let output = test.extract_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "{}", out);
    assert!(out.contains("Extracted 1 message from 1 source file"));
    assert!(out.contains("1 source file would be rewritten (use --write to apply)"));

    let catalog = test.read_json("messages/src/Greeting.jsx.json")?;
    let message = &catalog[0];
    assert_eq!(message["defaultMessage"], "Hello, {name}!");
    assert_eq!(message["description"], "Greets the signed-in user");
    assert_eq!(message["id"].as_str().map(str::len), Some(6));

    assert_eq!(test.read_file("src/Greeting.jsx")?, GREETING);

    Ok(())
}

#[test]
fn test_extract_write_rewrites_sources_idempotently() -> Result<()> {
    let test = CliTest::with_file("src/Greeting.jsx", GREETING)?;

    let first = test.extract_command().arg("--write").output()?;
    assert_eq!(first.status.code(), Some(0), "{}", stdout(&first));
    assert!(stdout(&first).contains("Rewrote 1 source file"));

    let catalog = test.read_json("messages/src/Greeting.jsx.json")?;
    let id = catalog[0]["id"].as_str().unwrap_or_default().to_string();
    assert_eq!(catalog[0]["description"], "Greets the signed-in user");
    let rewritten = test.read_file("src/Greeting.jsx")?;
    assert!(rewritten.contains(&format!("id=\"{}\"", id)), "{}", rewritten);
    assert!(!rewritten.contains("description="));
    assert!(rewritten.contains("values={{ name }}"));

    // A second run sees final declarations and makes no further edits.
    let second = test.extract_command().arg("--write").output()?;
    assert_eq!(second.status.code(), Some(0));
    assert!(!stdout(&second).contains("Rewrote"));
    assert_eq!(test.read_file("src/Greeting.jsx")?, rewritten);
    // The description now lives only in the first catalog; the rewritten
    // source no longer carries it, so the second catalog omits it.
    assert_eq!(
        test.read_json("messages/src/Greeting.jsx.json")?,
        json!([{ "id": id, "defaultMessage": "Hello, {name}!" }])
    );

    Ok(())
}

#[test]
fn test_same_content_gets_same_id_across_files() -> Result<()> {
    let test = CliTest::new()?;
    let source = r#"import { defineMessage } from 'react-intl';
export const m = defineMessage({ defaultMessage: 'Save', description: 'Button label' });
"#;
    test.write_file("src/a.js", source)?;
    test.write_file("src/nested/b.js", &source.replace("const m", "const other"))?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));

    let a = test.read_json("messages/src/a.js.json")?;
    let b = test.read_json("messages/src/nested/b.js.json")?;
    assert_eq!(a[0]["id"], b[0]["id"]);

    Ok(())
}

#[test]
fn test_extract_empty_catalog_for_file_without_messages() -> Result<()> {
    let test = CliTest::with_file("src/util.ts", "export const add = (a: number, b: number) => a + b;\n")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("messages/src/util.ts.json")?, "[]\n");

    Ok(())
}

#[test]
fn test_extract_options_from_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlrc.json",
        r#"{
  "messagesDir": "./build/i18n",
  "additionalComponentNames": ["CustomMessage"],
  "extractSourceLocation": true,
  "removeDefaultMessage": true
}"#,
    )?;
    test.write_file(
        "src/app.jsx",
        r#"import { CustomMessage } from './custom';
export const A = () => <CustomMessage id="custom" defaultMessage="Custom" />;
"#,
    )?;

    let output = test.extract_command().arg("--write").output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));

    let catalog = test.read_json("build/i18n/src/app.jsx.json")?;
    assert_eq!(
        catalog,
        json!([{
            "id": "custom",
            "defaultMessage": "Custom",
            "file": "src/app.jsx",
            "start": {"line": 2, "column": 23},
            "end": {"line": 2, "column": 76}
        }])
    );
    assert!(
        test.read_file("src/app.jsx")?
            .contains(r#"<CustomMessage id="custom" />"#)
    );

    Ok(())
}

#[test]
fn test_failing_file_writes_nothing() -> Result<()> {
    let source = r#"import { defineMessage } from 'react-intl';
defineMessage({ defaultMessage: 'Hi' });
"#;
    let test = CliTest::with_file("src/app.js", source)?;

    let output = test
        .extract_command()
        .args(["--write", "--enforce-descriptions"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(!test.root().join("messages").exists());
    assert_eq!(test.read_file("src/app.js")?, source);

    Ok(())
}

#[test]
fn test_extract_two_passes_with_messages_dir_flag() -> Result<()> {
    let test = CliTest::with_file("src/Greeting.jsx", GREETING)?;

    let output = test
        .extract_command()
        .args([
            "--write",
            "--passes",
            "2",
            "--enforce-descriptions",
            "--messages-dir",
            "out",
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(test.root().join("out/src/Greeting.jsx.json").exists());

    Ok(())
}
