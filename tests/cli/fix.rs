use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::CliTest;

const APP: &str = r#"import { useTranslations } from 'next-intl';

export function App() {
  const t = useTranslations('common');
  return <h1>{t('greeting')}</h1>;
}
"#;

fn json_key_exists(value: &Value, key_path: &str) -> bool {
    let mut current = value;
    for part in key_path.split('.') {
        match current.get(part) {
            Some(v) => current = v,
            None => return false,
        }
    }
    true
}

fn parse(content: &str) -> Result<Value> {
    serde_json::from_str(content).context("JSON should be parseable")
}

#[test]
fn test_fix_removes_unused_keys_from_every_locale() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(
        "src/messages/en.json",
        r#"{"common": {"greeting": "Hello", "farewell": "Bye"}, "legacy": {"old": {"title": "Old"}}}"#,
    )?;
    test.write_file(
        "src/messages/fr.json",
        r#"{"common": {"greeting": "Bonjour", "farewell": "Au revoir"}, "legacy": {"old": {"title": "Vieux"}}}"#,
    )?;

    let output = test.run(test.fix_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Deleted 4 keys in 2 files (from 2 unused keys):"));
    assert!(output.stdout.contains("  - ./src/messages/en.json: 2 keys"));
    assert!(output.stdout.contains("  - ./src/messages/fr.json: 2 keys"));

    assert_snapshot!(test.read_file("src/messages/en.json")?, @r#"
    {
      "common": {
        "greeting": "Hello"
      }
    }
    "#);

    let fr = parse(&test.read_file("src/messages/fr.json")?)?;
    assert!(json_key_exists(&fr, "common.greeting"));
    assert!(!json_key_exists(&fr, "common.farewell"));
    assert!(!json_key_exists(&fr, "legacy"));
    Ok(())
}

#[test]
fn test_fix_prunes_top_level_entries() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(
        "src/messages/en.json",
        r#"{"zeta": {"a": "A"}, "common": {"greeting": "Hello"}, "alpha": "x"}"#,
    )?;

    let output = test.run(test.fix_command())?;
    assert_eq!(output.code, Some(0));

    assert_snapshot!(test.read_file("src/messages/en.json")?, @r#"
    {
      "common": {
        "greeting": "Hello"
      }
    }
    "#);
    Ok(())
}

#[test]
fn test_fix_skips_unparsable_locale() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(
        "src/messages/en.json",
        r#"{"common": {"greeting": "Hello", "farewell": "Bye"}}"#,
    )?;
    test.write_file("src/messages/de.json", r#"{"common": {"#)?;
    test.write_file(
        "src/messages/fr.json",
        r#"{"common": {"greeting": "Bonjour", "farewell": "Au revoir"}}"#,
    )?;

    let output = test.run(test.fix_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Deleted 2 keys in 2 files"));
    assert!(output.stderr.contains("1 file(s) could not be parsed"));
    assert_eq!(test.read_file("src/messages/de.json")?, r#"{"common": {"#);

    let fr = parse(&test.read_file("src/messages/fr.json")?)?;
    assert!(!json_key_exists(&fr, "common.farewell"));
    Ok(())
}

#[test]
fn test_fix_reports_unparsable_locale_when_verbose() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(
        "src/messages/en.json",
        r#"{"common": {"greeting": "Hello", "farewell": "Bye"}}"#,
    )?;
    test.write_file("src/messages/de.json", "[1, 2")?;

    let mut cmd = test.fix_command();
    cmd.arg("--verbose");
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("parse-error"));
    assert!(output.stdout.contains("--> ./src/messages/de.json"));
    Ok(())
}

#[test]
fn test_fix_with_missing_keys_still_fails() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"import { useTranslations } from 'next-intl';

export function App() {
  const t = useTranslations('common');
  return <h1>{t('greeting')}{t('title')}</h1>;
}
"#,
    )?;
    test.write_file(
        "src/messages/en.json",
        r#"{"common": {"greeting": "Hello", "farewell": "Bye"}}"#,
    )?;

    let output = test.run(test.fix_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"common.title\"  missing-key"));
    assert!(output.stdout.contains("Deleted 1 key in 1 file"));

    let en = parse(&test.read_file("src/messages/en.json")?)?;
    assert!(!json_key_exists(&en, "common.farewell"));
    Ok(())
}

#[test]
fn test_fix_nothing_to_remove() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    let original = r#"{"common":{"greeting":"Hello"}}"#;
    test.write_file("src/messages/en.json", original)?;

    let output = test.run(test.fix_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("no issues found"));
    assert_eq!(test.read_file("src/messages/en.json")?, original);
    Ok(())
}

#[test]
fn test_fix_missing_source_locale_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/fr.json", r#"{"common": {"old": "x"}}"#)?;

    let mut cmd = test.fix_command();
    cmd.arg("--verbose");
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(!output.stderr.contains("resolution finished"));
    assert_eq!(
        test.read_file("src/messages/fr.json")?,
        r#"{"common": {"old": "x"}}"#
    );
    Ok(())
}
