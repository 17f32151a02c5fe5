#![cfg(feature = "iccma")]

use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

const INSTANCE: &str = "p af 3\n# a chain\n1 2\n2 3\n";

#[test]
fn test_authors() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("reducto_iccma23")?;
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "reducto {}\n",
            env!("CARGO_PKG_VERSION")
        )));
    Ok(())
}

#[test]
fn test_problems() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("reducto_iccma23")?;
    cmd.arg("--problems");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("[SE-GR,"));
    Ok(())
}

#[test]
fn test_solve() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.af")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto_iccma23")?;
    cmd.arg("-f").arg(file.path()).arg("-p").arg("DS-PR").arg("-a").arg("3");
    cmd.assert().success().stdout(predicate::eq("YES\n"));
    file.close()?;
    Ok(())
}
