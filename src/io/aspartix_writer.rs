use super::ResponseWriter;
use crate::aa::{Argument, LabelType};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the answers expected by the solvers of the Aspartix family.
///
/// The answers are written this way:
///   * extension: the labels of the arguments, split by commas and enclosed by brackets (`[a,b]`)
///   * list of extensions: the extensions, split by commas and enclosed by brackets (`[[a,b],[c]]`)
///   * absence of extension and acceptance status: `NO` and `YES`
///   * extension count: the integer alone on its line
///
/// # Example
///
/// ```
/// # use reducto::aa::ArgumentSet;
/// # use reducto::io::{AspartixWriter, ResponseWriter};
/// let arguments = ArgumentSet::new_with_labels(&["a".to_string(), "b".to_string()]);
/// let mut buffer = Vec::new();
/// AspartixWriter::default()
///     .write_single_extension(&mut buffer, &arguments.iter().collect::<Vec<_>>())
///     .unwrap();
/// assert_eq!("[a,b]\n", String::from_utf8(buffer).unwrap());
/// ```
#[derive(Default)]
pub struct AspartixWriter;

fn format_extension<T>(extension: &[&Argument<T>]) -> String
where
    T: LabelType,
{
    let labels = extension
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<String>>();
    format!("[{}]", labels.join(","))
}

impl ResponseWriter<String> for AspartixWriter {
    fn write_single_extension(
        &self,
        writer: &mut dyn Write,
        extension: &[&Argument<String>],
    ) -> Result<()> {
        let context = "while writing an extension";
        writeln!(writer, "{}", format_extension(extension)).context(context)?;
        writer.flush().context(context)
    }

    fn write_extension_list(
        &self,
        writer: &mut dyn Write,
        extensions: &[Vec<&Argument<String>>],
    ) -> Result<()> {
        let context = "while writing a list of extensions";
        let formatted = extensions
            .iter()
            .map(|e| format_extension(e))
            .collect::<Vec<String>>();
        writeln!(writer, "[{}]", formatted.join(",")).context(context)?;
        writer.flush().context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aa::ArgumentSet;

    fn labels(names: &[&str]) -> ArgumentSet<String> {
        ArgumentSet::new_with_labels(&names.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    fn written<F>(f: F) -> String
    where
        F: FnOnce(&AspartixWriter, &mut Vec<u8>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        f(&AspartixWriter::default(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_single_extension() {
        let args = labels(&["a", "b", "c"]);
        let ext = args.iter().collect::<Vec<_>>();
        assert_eq!("[a,b,c]\n", written(|w, b| w.write_single_extension(b, &ext)));
    }

    #[test]
    fn test_write_empty_extension() {
        assert_eq!(
            "[]\n",
            written(|w, b| w.write_single_extension(b, &[] as &[&Argument<String>]))
        );
    }

    #[test]
    fn test_write_extension_list() {
        let args = labels(&["a", "b", "c"]);
        let exts = vec![
            vec![args.get_argument_by_id(0), args.get_argument_by_id(1)],
            vec![args.get_argument_by_id(2)],
            vec![],
        ];
        assert_eq!(
            "[[a,b],[c],[]]\n",
            written(|w, b| w.write_extension_list(b, &exts))
        );
        assert_eq!("[]\n", written(|w, b| w.write_extension_list(b, &[])));
    }

    #[test]
    fn test_write_statuses_and_count() {
        assert_eq!("NO\n", written(|w, b| w.write_no_extension(b)));
        assert_eq!("YES\n", written(|w, b| w.write_acceptance_status(b, true)));
        assert_eq!("NO\n", written(|w, b| w.write_acceptance_status(b, false)));
        assert_eq!("3\n", written(|w, b| w.write_extension_count(b, 3)));
    }
}
