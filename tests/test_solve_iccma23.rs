use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::{
    prelude::{predicate, PredicateBooleanExt},
    BoxPredicate,
};

// Preferred extensions are {1,4} and {2,4}; initial sets are {1}, {2} and {4}.
const INSTANCE: &str = r#"p af 4
1 2
1 3
2 1
2 3
3 4
4 3
"#;

fn test_answer(
    problem: &str,
    possible_answers: &[&'static str],
    additional_arg: Option<&str>,
    n_threads: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.af")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("solve")
        .arg("-f")
        .arg(file.path())
        .arg("-p")
        .arg(problem)
        .arg("--threads")
        .arg(n_threads.to_string())
        .arg("--logging-level")
        .arg("off");
    if let Some(a) = additional_arg {
        cmd.arg("-a").arg(a);
    }
    let mut pred: BoxPredicate<str> = BoxPredicate::new(predicate::never());
    for a in possible_answers {
        pred = BoxPredicate::new(pred.or(predicate::eq(*a)));
    }
    cmd.assert().success().stdout(pred);
    file.close()?;
    Ok(())
}

macro_rules! tests_with_threads {
    ($n_threads:literal) => {
        paste::item! {
            #[test]
            fn [< test_se_gr_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("SE-GR", &["w\n"], None, $n_threads)
            }

            #[test]
            fn [< test_se_pr_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("SE-PR", &["w 1 4\n", "w 2 4\n"], None, $n_threads)
            }

            #[test]
            fn [< test_ds_pr_accepted_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("DS-PR", &["YES\n"], Some("4"), $n_threads)
            }

            #[test]
            fn [< test_ds_pr_rejected_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("DS-PR", &["NO\n"], Some("1"), $n_threads)?;
                test_answer("DS-PR", &["NO\n"], Some("3"), $n_threads)
            }

            #[test]
            fn [< test_dc_pr_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("DC-PR", &["YES\n"], Some("2"), $n_threads)?;
                test_answer("DC-PR", &["NO\n"], Some("3"), $n_threads)
            }

            #[test]
            fn [< test_ee_pr_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("EE-PR", &["w 1 4\nw 2 4\n", "w 2 4\nw 1 4\n"], None, $n_threads)
            }

            #[test]
            fn [< test_ce_pr_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("CE-PR", &["2\n"], None, $n_threads)
            }

            #[test]
            fn [< test_se_uc_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("SE-UC", &["w 4\n"], None, $n_threads)
            }

            #[test]
            fn [< test_ds_uc_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("DS-UC", &["YES\n"], Some("4"), $n_threads)?;
                test_answer("DS-UC", &["NO\n"], Some("1"), $n_threads)
            }

            #[test]
            fn [< test_dc_uc_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("DC-UC", &["YES\n"], Some("4"), $n_threads)?;
                test_answer("DC-UC", &["NO\n"], Some("2"), $n_threads)
            }

            #[test]
            fn [< test_ee_uc_ $n_threads _threads >] () -> Result<(), Box<dyn std::error::Error>> {
                test_answer("EE-UC", &["w 4\n"], None, $n_threads)
            }
        }
    };
}

tests_with_threads!(1);
tests_with_threads!(4);

#[test]
fn test_ee_it() -> Result<(), Box<dyn std::error::Error>> {
    test_answer("EE-IT", &["w 1\nw 2\nw 4\n"], None, 1)
}

#[test]
fn test_ce_it() -> Result<(), Box<dyn std::error::Error>> {
    test_answer("CE-IT", &["3\n"], None, 1)
}

#[test]
fn test_dc_it() -> Result<(), Box<dyn std::error::Error>> {
    test_answer("DC-IT", &["YES\n"], Some("4"), 1)?;
    test_answer("DC-IT", &["NO\n"], Some("3"), 1)
}

#[test]
fn test_ds_it() -> Result<(), Box<dyn std::error::Error>> {
    test_answer("DS-IT", &["NO\n"], Some("4"), 1)
}

#[test]
fn test_missing_argument() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.af")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("solve")
        .arg("-f")
        .arg(file.path())
        .arg("-p")
        .arg("DS-PR")
        .arg("--logging-level")
        .arg("off");
    cmd.assert().failure();
    file.close()?;
    Ok(())
}

#[test]
fn test_unknown_problem() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.af")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("reducto")?;
    cmd.arg("solve")
        .arg("-f")
        .arg(file.path())
        .arg("-p")
        .arg("DS-ST")
        .arg("--logging-level")
        .arg("off");
    cmd.assert().failure();
    file.close()?;
    Ok(())
}
