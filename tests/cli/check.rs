use anyhow::Result;

use crate::CliTest;

const APP: &str = r#"import { useTranslations } from 'next-intl';

export function App() {
  const t = useTranslations('common');
  return <h1>{t('greeting')}</h1>;
}
"#;

#[test]
fn test_all_keys_defined() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/en.json", r#"{"common": {"greeting": "Hello"}}"#)?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 source file, 1 locale file - no issues found"));
    Ok(())
}

#[test]
fn test_check_is_default_mode() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/en.json", r#"{"common": {}}"#)?;

    let output = test.run(test.command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"common.greeting\"  missing-key"));
    Ok(())
}

#[test]
fn test_missing_key_fails() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/en.json", r#"{"common": {"title": "Title"}}"#)?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"common.greeting\"  missing-key"));
    assert!(output.stdout.contains("--> ./src/app.tsx:5:17"));
    assert!(output.stdout.contains("5 |   return <h1>{t('greeting')}</h1>;"));
    assert!(output.stdout.contains("info: \"common.title\"  unused-key"));
    assert!(output.stdout.contains("2 problems (1 error, 0 warnings, 1 unused)"));
    Ok(())
}

#[test]
fn test_missing_key_lists_other_usages() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"import { useTranslations } from 'next-intl';

export function App() {
  const t = useTranslations();
  return <p>{t('title')}{t('title')}</p>;
}
"#,
    )?;
    test.write_file("src/messages/en.json", "{}")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout.matches("missing-key").count(), 1);
    assert!(output.stdout.contains("also used: ./src/app.tsx:5:28"));
    Ok(())
}

#[test]
fn test_unused_only_succeeds() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(
        "src/messages/en.json",
        r#"{"common": {"greeting": "Hello", "farewell": "Bye"}}"#,
    )?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("info: \"common.farewell\"  unused-key"));
    assert!(output.stdout.contains("--> ./src/messages/en.json:1:1"));
    assert!(output.stdout.contains("run with --fix to remove unused keys"));
    Ok(())
}

#[test]
fn test_dynamic_key_warns() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"import { useTranslations } from 'next-intl';

export function App({ name }) {
  const t = useTranslations('common');
  const key = 'greeting';
  return <h1>{t(key)}{t(`${name}.title`)}</h1>;
}
"#,
    )?;
    test.write_file("src/messages/en.json", r#"{"common": {"greeting": "Hi"}}"#)?;

    let output = test.run(test.check_command())?;

    // The literal assigned to `key` is never counted as used.
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout.matches("dynamic-key").count(), 2);
    assert!(output.stdout.contains("--> ./src/app.tsx:6:17"));
    assert!(output.stdout.contains("note: namespace \"common\""));
    assert!(output.stdout.contains("info: \"common.greeting\"  unused-key"));
    Ok(())
}

#[test]
fn test_forwarding_across_files() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"import { getTranslations } from 'next-intl/server';
import { Header } from './header';
import { formatTitle as fmt } from './format';

export default async function Page() {
  const t = await getTranslations('home');
  fmt(t);
  return <Header t={t} />;
}
"#,
    )?;
    test.write_file(
        "src/header.tsx",
        r#"export function Header({ t }) {
  return <h1>{t.rich('title')}</h1>;
}
"#,
    )?;
    test.write_file(
        "src/format.ts",
        r#"export function formatTitle(translator) {
  return translator('subtitle');
}
"#,
    )?;
    test.write_file(
        "src/messages/en.json",
        r#"{"home": {"title": "Home", "subtitle": "Welcome"}}"#,
    )?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(0), "stdout:\n{}", output.stdout);
    assert!(output.stdout.contains("Checked 3 source files, 1 locale file - no issues found"));
    Ok(())
}

#[test]
fn test_hook_from_other_module_is_ignored() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"import { useTranslations } from './my-i18n';

export function App() {
  const t = useTranslations('common');
  return <h1>{t('greeting')}</h1>;
}
"#,
    )?;
    test.write_file("src/messages/en.json", r#"{"common": {"greeting": "Hi"}}"#)?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("info: \"common.greeting\"  unused-key"));
    Ok(())
}

#[test]
fn test_directory_and_locale_flags() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("locales/fr.json", r#"{"common": {"greeting": "Bonjour"}}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--directory", "locales", "--source-locale", "fr"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("no issues found"));
    Ok(())
}

#[test]
fn test_config_file_settings() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", APP)?;
    test.write_file(
        ".keyscanrc.json",
        r#"{
  "messagesDirectory": "messages",
  "includes": ["app"]
}"#,
    )?;
    test.write_file("messages/en.json", r#"{"common": {"greeting": "Hello"}}"#)?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 source file"));
    Ok(())
}

#[test]
fn test_flags_override_config_file() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(".keyscanrc.json", r#"{"sourceLocale": "de"}"#)?;
    test.write_file("src/messages/en.json", r#"{"common": {"greeting": "Hello"}}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--source-locale", "en"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::with_file("web/src/app.tsx", APP)?;
    test.write_file("web/src/messages/en.json", r#"{"common": {"greeting": "Hello"}}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--source-root", "web"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("no issues found"));
    Ok(())
}

#[test]
fn test_missing_source_locale_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/fr.json", "{}")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Error: Cannot load source locale 'en'"));
    Ok(())
}

#[test]
fn test_missing_source_locale_aborts_before_parsing() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/fr.json", "{}")?;

    let mut cmd = test.check_command();
    cmd.arg("--verbose");
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("configuration loaded"));
    assert!(!output.stderr.contains("project loaded"));
    assert!(!output.stderr.contains("resolution finished"));
    Ok(())
}

#[test]
fn test_unparsable_source_locale_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/messages/en.json", r#"{"common": "#)?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse JSON file"));
    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file(".keyscanrc.json", r#"{"ignores": ["[invalid"]}"#)?;
    test.write_file("src/messages/en.json", "{}")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Invalid glob pattern in 'ignores'"));
    Ok(())
}

#[test]
fn test_conflicting_modes_rejected() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args(["--check", "--lint"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(2));
    Ok(())
}

#[test]
fn test_unparsable_source_file_is_skipped() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    test.write_file("src/broken.tsx", "export function (")?;
    test.write_file("src/messages/en.json", r#"{"common": {"greeting": "Hello"}}"#)?;

    let output = test.run(test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stderr.contains("1 file(s) could not be parsed"));

    let mut cmd = test.check_command();
    cmd.arg("--verbose");
    let output = test.run(cmd)?;
    assert!(output.stdout.contains("parse-error"));
    assert!(output.stdout.contains("--> ./src/broken.tsx"));
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let output = test.run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("--source-locale <LOCALE>"));
    assert!(output.stdout.contains("--directory <DIR>"));
    assert!(test.root().join(".git").is_dir());
    Ok(())
}
