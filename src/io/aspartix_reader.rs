use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::aa::{AAFramework, Argument, ArgumentSet};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

const ARG_AND_SPACE_PATTERN: &str = r"\s*[_[:alpha:]][_[:alpha:]\d]*\s*";

lazy_static! {
    static ref COMMENT_LINE_PATTERN: Regex = Regex::new(r"^\s*%").unwrap();
    static ref ARG_LINE_PATTERN: Regex = Regex::new(r"^\s*arg\([^)]+\)\.\s*$").unwrap();
    static ref ARG_LINE_ARG_NAME_PATTERN: Regex =
        Regex::new(&format!(r"^\s*arg\(({})\)\.\s*$", ARG_AND_SPACE_PATTERN)).unwrap();
    static ref ATT_LINE_PATTERN: Regex = Regex::new(r"^\s*att\([^,]+,[^)]+\)\.\s*$").unwrap();
    static ref ATT_LINE_ARG_NAMES_PATTERN: Regex = Regex::new(&format!(
        r"^\s*att\(({}),({})\)\.\s*$",
        ARG_AND_SPACE_PATTERN, ARG_AND_SPACE_PATTERN,
    ))
    .unwrap();
}

fn captured_arg(c: &Captures, i: usize) -> Result<WarningResult<String>> {
    let str_arg = c
        .get(i)
        .ok_or_else(|| anyhow!("missing argument name"))?
        .as_str();
    let trimmed = str_arg.trim().to_string();
    if trimmed.len() == str_arg.len() {
        Ok(WarningResult::ok(trimmed))
    } else {
        Ok(WarningResult::warned(
            trimmed,
            "argument names beginning or ending by spaces may be ambiguous",
        ))
    }
}

enum Statement {
    Argument(WarningResult<String>),
    Attack(WarningResult<(String, String)>),
}

fn read_statement(l: &str) -> Result<Option<Statement>> {
    if ARG_LINE_PATTERN.is_match(l) {
        return match ARG_LINE_ARG_NAME_PATTERN.captures(l) {
            Some(c) => Ok(Some(Statement::Argument(captured_arg(&c, 1)?))),
            None => Err(anyhow!("invalid argument name in {}", l.trim())),
        };
    }
    if ATT_LINE_PATTERN.is_match(l) {
        return match ATT_LINE_ARG_NAMES_PATTERN.captures(l) {
            Some(c) => Ok(Some(Statement::Attack(
                captured_arg(&c, 1)?.zip(captured_arg(&c, 2)?),
            ))),
            None => Err(anyhow!("invalid argument names in {}", l.trim())),
        };
    }
    Ok(None)
}

/// A reader for the Aspartix format.
///
/// This object is used to read an [`AAFramework`] encoded using the Aspartix input format, as defined on [the Aspartix website](https://www.dbai.tuwien.ac.at/research/argumentation/aspartix/dung.html).
/// The [LabelType](crate::aa::LabelType) of the returned argument frameworks is [String].
///
/// Lines beginning by `%` are comments.
/// Arguments may be declared in any place of the file, even after the attacks that involve them.
/// Declaring an argument or an attack twice raises a warning; the duplicate is ignored.
///
/// # Aspartix format
///
/// The following content defines an Argumentation Framework with three arguments labelled `a`, `b` and `c` and three attacks (`a` and `b` attack each other and `c` attacks `b`).
///
/// ```text
/// arg(a).
/// arg(b).
/// arg(c).
/// att(a,b).
/// att(b,a).
/// att(c,b).
/// ```
///
/// # Example
///
/// ```
/// # use reducto::aa::AAFramework;
/// # use reducto::io::{AspartixReader, InstanceReader};
/// fn read_af_from_str(s: &str) -> AAFramework<String> {
///     let reader = AspartixReader::default();
///     reader.read(&mut s.as_bytes()).expect("invalid Aspartix AF")
/// }
/// # read_af_from_str("arg(a).");
/// ```
#[derive(Default)]
pub struct AspartixReader {
    warning_handlers: Vec<WarningHandler>,
}

impl AspartixReader {
    fn warn(&self, line_index: usize, warning: &str) {
        self.warning_handlers
            .iter()
            .for_each(|h| (h)(1 + line_index, warning));
    }
}

impl InstanceReader<String> for AspartixReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<String>> {
        let mut labels = ArgumentSet::default();
        let mut attacks = Vec::new();
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            if l.trim().is_empty() || COMMENT_LINE_PATTERN.is_match(&l) {
                continue;
            }
            match read_statement(&l).with_context(context)? {
                Some(Statement::Argument(a)) => {
                    let label = a.consume_warnings(|w| self.warn(i, w));
                    if labels.contains_label(&label) {
                        self.warn(i, &format!("argument {} is declared twice", label));
                    }
                    labels.new_argument(label);
                }
                Some(Statement::Attack(att)) => {
                    attacks.push((i, att.consume_warnings(|w| self.warn(i, w))));
                }
                None => {
                    return Err(anyhow!("syntax error in line \"{}\"", l)).with_context(context)
                }
            }
        }
        let mut af = AAFramework::new_with_argument_set(labels);
        for (i, (from, to)) in attacks {
            let context = || format!("while reading line with index {}", i);
            let from_id = af.argument_set().get_argument_index(&from).with_context(context)?;
            let to_id = af.argument_set().get_argument_index(&to).with_context(context)?;
            if af.has_attack(from_id, to_id) {
                self.warn(i, &format!("attack from {} to {} is declared twice", from, to));
                continue;
            }
            af.new_attack_by_ids(from_id, to_id).with_context(context)?;
        }
        Ok(af)
    }

    fn read_arg_from_str<'a>(
        &self,
        af: &'a AAFramework<String>,
        arg: &str,
    ) -> Result<&'a Argument<String>> {
        af.argument_set().get_argument(&arg.to_string())
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
