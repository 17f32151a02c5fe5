use super::{InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument, ArgumentSet};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A reader for the ICCMA 2023 format.
///
/// This object is used to read an [`AAFramework`] encoded using the ICCMA 2023 input format, as defined on [the competition website](https://iccma2023.github.io/rules.html).
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [usize];
/// labels are the 1-based indices of the arguments.
///
/// Lines beginning by `#` are comments.
/// An attack given twice raises a warning; the duplicate is ignored.
///
/// # ICCMA 2023 format
///
/// The following content defines an Argumentation Framework with three arguments (given by the indexes `1`, `2` and `3`) and three attacks (`1` and `2` attack each other and `3` attacks `2`).
///
/// ```text
/// p af 3
/// 1 2
/// 2 1
/// 3 2
/// ```
#[derive(Default)]
pub struct Iccma23Reader {
    warning_handlers: Vec<WarningHandler>,
}

impl Iccma23Reader {
    fn warn(&self, line_index: usize, warning: &str) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(1 + line_index, warning));
    }
}

impl InstanceReader<usize> for Iccma23Reader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<usize>> {
        let br = BufReader::new(reader);
        let mut af: Option<AAFramework<usize>> = None;
        let mut found_empty_lines = false;
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            if l.starts_with('#') {
                continue;
            }
            if l.trim().is_empty() {
                found_empty_lines = true;
                continue;
            }
            if found_empty_lines {
                return Err(anyhow!("got content after an empty line")).with_context(context);
            }
            let words = l.split_whitespace().collect::<Vec<&str>>();
            let current = match af.as_mut() {
                Some(a) => a,
                None => {
                    let n_args = read_preamble(&words).with_context(context)?;
                    af = Some(AAFramework::new_with_argument_set(
                        ArgumentSet::new_with_labels(&(1..=n_args).collect::<Vec<usize>>()),
                    ));
                    continue;
                }
            };
            let (attacker, attacked) =
                read_attack(&words, current.n_arguments()).with_context(context)?;
            if current.has_attack(attacker - 1, attacked - 1) {
                self.warn(i, &format!("attack from {} to {} is declared twice", attacker, attacked));
                continue;
            }
            current
                .new_attack_by_ids(attacker - 1, attacked - 1)
                .with_context(context)?;
        }
        af.ok_or_else(|| anyhow!("missing preamble"))
    }

    fn read_arg_from_str<'a>(
        &self,
        af: &'a AAFramework<usize>,
        arg: &str,
    ) -> Result<&'a Argument<usize>> {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 && n <= af.n_arguments() => {
                Ok(af.argument_set().get_argument_by_id(n - 1))
            }
            _ => Err(anyhow!("unknown argument: {}", arg)),
        }
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

fn read_preamble(words: &[&str]) -> Result<usize> {
    match words {
        ["p", "af", n] => n
            .parse::<usize>()
            .map_err(|_| anyhow!("error in preamble: invalid number of arguments")),
        ["p", kind, _] => Err(anyhow!(
            r#"error in second word of preamble; expected "af", got "{}""#,
            kind
        )),
        [first, _, _] => Err(anyhow!(
            r#"error in first word of preamble; expected "p", got "{}""#,
            first
        )),
        _ => Err(anyhow!(
            "error in preamble; expected 3 words, got {}",
            words.len()
        )),
    }
}

fn read_attack(words: &[&str], n_args: usize) -> Result<(usize, usize)> {
    let read_arg = |word: &str, arg_type| match word.parse::<usize>() {
        Ok(n) if n >= 1 && n <= n_args => Ok(n),
        _ => Err(anyhow!(
            "error in attack: invalid argument index for {}",
            arg_type
        )),
    };
    match words {
        [from, to] => Ok((read_arg(*from, "attacker")?, read_arg(*to, "attacked")?)),
        _ => Err(anyhow!(
            "error in attack; expected 2 words, got {}",
            words.len()
        )),
    }
}
