use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const WEB_CONFIG: &str = r#"{
    "web": {
        "sources": ["app"],
        "files": ["index.php"],
        "extractors": [
            { "extractor": "PHP" },
            { "extractor": "LegacyLatte" },
            { "extractor": "Neon", "paths": { "app/config/enums.neon": ["parameters|fruits"] } },
            { "extractor": "SQL" }
        ],
        "output": { "destination": "locale/web.pot" }
    }
}"#;

fn web_project() -> Result<CliTest> {
    let test = CliTest::with_config(WEB_CONFIG)?;
    test.write_file(
        "app/Presenters/HomePresenter.php",
        "<?php\n$this->translate('You have %d mails.');\n$form->translate(\"Say \\\"hi\\\"\");\n",
    )?;
    test.write_file("app/templates/default.latte", "<h1>{_'Hello Hugo!'}</h1>\n")?;
    test.write_file("app/config/enums.neon", "parameters:\n    fruits:\n        - Kiwi\n")?;
    test.write_file("app/sql/enum.sql", "INSERT INTO e VALUES (/*_*/'Jack O''Neill'/*_*/);\n")?;
    test.write_file("index.php", "<?php\n\n$t->_('Kiwi');\n")?;
    test.write_file("locale/.keep", "")?;
    Ok(test)
}

#[test]
fn test_mine_writes_catalog() -> Result<()> {
    let test = web_project()?;

    let output = test.mine_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Processing target [web]...\n"));
    assert!(out.contains("Saving extracted string template into: "));
    assert!(out.contains("locale/web.pot      [ OK ]"));

    let expected = r#"# Created: 1970-01-01T00:00:00+00:00

msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

#: ./app/templates/default.latte:1
msgid "Hello Hugo!"
msgstr ""

#: ./app/sql/enum.sql:1
msgid "Jack O'Neill"
msgstr ""

#: ./app/config/enums.neon
#: ./index.php:3
msgid "Kiwi"
msgstr ""

#: ./app/Presenters/HomePresenter.php:3
msgid "Say \"hi\""
msgstr ""

#: ./app/Presenters/HomePresenter.php:2
msgid "You have %d mails."
msgid_plural "You have %d mails."
msgstr[0] ""
msgstr[1] ""
"#;
    assert_eq!(test.read_file("locale/web.pot")?, expected);

    Ok(())
}

#[test]
fn test_mine_is_idempotent() -> Result<()> {
    let test = web_project()?;

    test.mine_command().output()?;
    let first = test.read_file("locale/web.pot")?;
    test.mine_command().output()?;
    let second = test.read_file("locale/web.pot")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_mine_list_files() -> Result<()> {
    let test = web_project()?;

    let output = test.mine_command().arg("--list").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    let listed: Vec<&str> = out
        .lines()
        .filter(|line| line.starts_with("./"))
        .map(|line| line.split(':').next().unwrap_or_default())
        .collect();
    assert_eq!(
        listed,
        vec![
            "./app/Presenters/HomePresenter.php",
            "./app/config/enums.neon",
            "./app/sql/enum.sql",
            "./app/templates/default.latte",
            "./index.php",
        ]
    );
    assert!(out.contains("[ Neon ]"));
    assert!(out.contains("[ LegacyLatte ]"));

    Ok(())
}

#[test]
fn test_mine_from_subdirectory() -> Result<()> {
    let test = web_project()?;

    let output = test
        .mine_command()
        .arg(test.root().join("app/Presenters"))
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("locale/web.pot").exists());

    Ok(())
}

#[test]
fn test_mine_array_file_output() -> Result<()> {
    let test = CliTest::with_config(
        r#"{
        "admin": {
            "sources": ["admin"],
            "extractors": [{ "extractor": "Nette" }],
            "output": {
                "destination": "admin-messages.php",
                "formatter": "ArrayFile",
                "outputVariable": "strings",
                "indent": "tabs"
            }
        }
    }"#,
    )?;
    test.write_file(
        "admin/Form.php",
        "<?php\n$form->addText('name', 'Name');\n$form->addSubmit('send', 'Send');\n$form->setRequired('It\\'s required');\n",
    )?;

    let output = test.mine_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("admin-messages.php")?,
        "<?php declare(strict_types=1);\n$strings = [\n\t'It\\'s required',\n\t'Name',\n\t'Send',\n];"
    );

    Ok(())
}

#[test]
fn test_mine_selector_error_aborts_target_only() -> Result<()> {
    let test = CliTest::with_config(
        r#"{
        "broken": {
            "sources": ["config"],
            "extractors": [{ "extractor": "Neon", "paths": { "config/enums.neon": ["parameters|fruits"] } }],
            "output": { "destination": "broken.pot" }
        },
        "web": {
            "sources": ["app"],
            "extractors": [{ "extractor": "PHP" }],
            "output": { "destination": "web.pot" }
        }
    }"#,
    )?;
    test.write_file("config/enums.neon", "parameters:\n    fruits:\n        kiwi: Kiwi\n")?;
    test.write_file("app/a.php", "<?php $t->translate('Hi');")?;

    let output = test.mine_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Processing target [broken]..."));
    assert!(out.contains("Processing target [web]..."));
    assert!(
        stderr(&output)
            .contains("selector `parameters|fruits` in")
    );
    assert!(!test.root().join("broken.pot").exists());
    assert!(test.read_file("web.pot")?.contains("msgid \"Hi\""));

    Ok(())
}

#[test]
fn test_mine_write_failure() -> Result<()> {
    let test = CliTest::with_config(
        r#"{
        "web": {
            "sources": ["app"],
            "extractors": [{ "extractor": "PHP" }],
            "output": { "destination": "missing/web.pot" }
        }
    }"#,
    )?;
    test.write_file("app/a.php", "<?php $t->translate('Hi');")?;

    let output = test.mine_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("[ FAILED ] (permissions?)"));

    Ok(())
}

#[test]
fn test_mine_no_targets() -> Result<()> {
    let test = CliTest::with_config("{}")?;

    let output = test.mine_command().output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "No targets configured, exiting.\n");

    Ok(())
}

#[test]
fn test_mine_without_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.mine_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot find .gettext-miner.json"));

    Ok(())
}

#[test]
fn test_mine_invalid_selector() -> Result<()> {
    let test = CliTest::with_config(
        r#"{
        "web": {
            "sources": ["app"],
            "extractors": [{ "extractor": "Neon", "paths": { "a.neon": ["parameters|(first)key"] } }],
            "output": { "destination": "web.pot" }
        }
    }"#,
    )?;

    let output = test.mine_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Target [web]"));
    assert!(err.contains("parameters|(first)key"));
    assert!(!test.root().join("web.pot").exists());

    Ok(())
}
