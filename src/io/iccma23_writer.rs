use super::ResponseWriter;
use crate::aa::Argument;
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the output format used in the ICCMA 2023 competition.
///
/// More precisely, the answers to argumentation problems are written this way:
///   * extension: the letter `w`, followed by a space and the list of argument labels, split by spaces
///   * list of extensions: one extension per line
///   * absence of extension: `NO`
///   * acceptance status: `YES` and `NO`
///   * extension count: the integer alone on its line
#[derive(Default)]
pub struct Iccma23Writer;

fn write_witness_line(writer: &mut dyn Write, extension: &[&Argument<usize>]) -> Result<()> {
    write!(writer, "w")?;
    extension
        .iter()
        .try_for_each(|arg| write!(writer, " {}", arg))?;
    writeln!(writer)?;
    Ok(())
}

impl ResponseWriter<usize> for Iccma23Writer {
    fn write_single_extension(
        &self,
        writer: &mut dyn Write,
        extension: &[&Argument<usize>],
    ) -> Result<()> {
        let context = "while writing an extension";
        write_witness_line(writer, extension).context(context)?;
        writer.flush().context(context)
    }

    fn write_extension_list(
        &self,
        writer: &mut dyn Write,
        extensions: &[Vec<&Argument<usize>>],
    ) -> Result<()> {
        let context = "while writing a list of extensions";
        extensions
            .iter()
            .try_for_each(|e| write_witness_line(writer, e))
            .context(context)?;
        writer.flush().context(context)
    }
}
