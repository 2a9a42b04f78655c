use anyhow::Result;

use crate::CliTest;

const PAGE: &str = r#"import { useTranslations } from 'next-intl';

export function Page({ section }) {
  const t = useTranslations('home');
  return (
    <main>
      <h1>{t('title')}</h1>
      <h2>{t('subtitle')}</h2>
      <p>{t('subtitle')}</p>
      <p>{t(section)}</p>
    </main>
  );
}
"#;

#[test]
fn test_lint_reports_each_occurrence() -> Result<()> {
    let test = CliTest::with_file("src/page.tsx", PAGE)?;
    test.write_file("src/messages/en.json", r#"{"home": {"title": "Home"}}"#)?;

    let output = test.run(test.lint_command())?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout.matches("missing-key").count(), 2);
    assert_eq!(output.stdout.matches("dynamic-key").count(), 1);
    assert!(output.stdout.contains("--> ./src/page.tsx:8:14"));
    assert!(output.stdout.contains("--> ./src/page.tsx:9:13"));
    assert!(output.stdout.contains("--> ./src/page.tsx:10:13"));
    // Unused keys are not a lint concern.
    assert!(!output.stdout.contains("unused-key"));
    Ok(())
}

#[test]
fn test_lint_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"import { useTranslations } from 'next-intl';

export function Page() {
  const t = useTranslations('home');
  return <h1>{t('title')}</h1>;
}
"#,
    )?;
    test.write_file(
        "src/messages/en.json",
        r#"{"home": {"title": "Home", "unused": "x"}}"#,
    )?;

    let output = test.run(test.lint_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 source file, 1 locale file - no issues found"));
    Ok(())
}

#[test]
fn test_lint_without_source_locale_degrades() -> Result<()> {
    let test = CliTest::with_file("src/page.tsx", PAGE)?;

    let output = test.run(test.lint_command())?;

    // Every key counts as missing, but the run itself does not abort.
    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout.matches("missing-key").count(), 3);
    assert!(output.stderr.contains("source locale unavailable"));
    Ok(())
}

#[test]
fn test_lint_dynamic_namespace() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"import { useTranslations } from 'next-intl';

export function Page({ ns }) {
  const t = useTranslations(ns);
  return <h1>{t('title')}</h1>;
}
"#,
    )?;
    test.write_file("src/messages/en.json", "{}")?;

    let output = test.run(test.lint_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("warning: \"non-literal namespace\"  dynamic-key"));
    assert!(output.stdout.contains("--> ./src/page.tsx:4:13"));
    Ok(())
}

#[test]
fn test_lint_respects_source_locale_flag() -> Result<()> {
    let test = CliTest::with_file("src/page.tsx", PAGE)?;
    test.write_file(
        "src/messages/ja.json",
        r#"{"home": {"title": "ホーム", "subtitle": "ようこそ"}}"#,
    )?;

    let mut cmd = test.lint_command();
    cmd.args(["--source-locale", "ja"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout.matches("dynamic-key").count(), 1);
    assert!(!output.stdout.contains("missing-key"));
    Ok(())
}
