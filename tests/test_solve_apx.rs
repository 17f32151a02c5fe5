use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

const INSTANCE: &str = r#"arg(a).
arg(b).
arg(c).
att(a,b).
att(b,c).
"#;

fn solve_apx(problem: &str, arg: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.apx")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("solve")
        .arg("--reader")
        .arg("apx")
        .arg("-f")
        .arg(file.path())
        .arg("-p")
        .arg(problem)
        .arg("--logging-level")
        .arg("off");
    if let Some(a) = arg {
        cmd.arg("-a").arg(a);
    }
    let output = cmd.assert().success().get_output().stdout.clone();
    file.close()?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_grounded() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!("[a,c]\n", solve_apx("SE-GR", None)?);
    assert_eq!("YES\n", solve_apx("DS-GR", Some("c"))?);
    assert_eq!("NO\n", solve_apx("DC-GR", Some("b"))?);
    Ok(())
}

#[test]
fn test_preferred() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!("[[a,c]]\n", solve_apx("EE-PR", None)?);
    assert_eq!("YES\n", solve_apx("DS-PR", Some("a"))?);
    Ok(())
}

#[test]
fn test_unchallenged() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!("[a,c]\n", solve_apx("SE-UC", None)?);
    assert_eq!("NO\n", solve_apx("DS-UC", Some("b"))?);
    Ok(())
}

#[test]
fn test_initial_sets() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!("[[a]]\n", solve_apx("EE-IT", None)?);
    assert_eq!("1\n", solve_apx("CE-IT", None)?);
    Ok(())
}

#[test]
fn test_unknown_argument() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.apx")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("solve")
        .arg("--reader")
        .arg("apx")
        .arg("-f")
        .arg(file.path())
        .arg("-p")
        .arg("DS-PR")
        .arg("-a")
        .arg("z")
        .arg("--logging-level")
        .arg("off");
    cmd.assert().failure();
    file.close()?;
    Ok(())
}

#[test]
fn test_check() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.apx")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("check")
        .arg("--reader")
        .arg("apx")
        .arg("-f")
        .arg(file.path())
        .arg("--logging-level")
        .arg("off");
    cmd.assert().success().stdout(predicate::str::is_empty());
    file.close()?;
    Ok(())
}

#[test]
fn test_check_error() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.apx")?;
    file.write_str("arg(a).\natt(a,b).\n")?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("check")
        .arg("--reader")
        .arg("apx")
        .arg("-f")
        .arg(file.path())
        .arg("--logging-level")
        .arg("off");
    cmd.assert().failure();
    file.close()?;
    Ok(())
}
