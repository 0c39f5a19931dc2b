use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;
    let target = parsed
        .get("main")
        .context("Config should have a 'main' target")?;

    assert!(target.get("sources").is_some(), "Target should have 'sources'");
    assert!(target.get("extractors").is_some(), "Target should have 'extractors'");
    assert!(
        target.pointer("/output/destination").is_some(),
        "Target should have an output destination"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .gettext-miner.json"));
    assert!(test.root().join(".gettext-miner.json").exists());

    let content = test.read_file(".gettext-miner.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_config("{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".gettext-miner.json already exists"));
    assert_eq!(test.read_file(".gettext-miner.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("app/HomePresenter.php", "<?php $this->translate('Welcome');")?;
    test.write_file("app/default.latte", "{_'Sign in'}")?;
    test.write_file("locale/.keep", "")?;

    let output = test.mine_command().output()?;
    assert!(
        output.status.success(),
        "Mine command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    let template = test.read_file("locale/messages.pot")?;
    assert!(template.contains("msgid \"Sign in\""));
    assert!(template.contains("msgid \"Welcome\""));

    Ok(())
}
