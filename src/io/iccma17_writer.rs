use super::ResponseWriter;
use crate::aa::{Argument, LabelType};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the output format used in the ICCMA 2017 competition.
///
/// The answers to argumentation problems are written this way:
///   * acceptance status: `YES` and `NO`
///   * extension: the list of argument labels between brackets, separated by commas (`[a,b,c]`)
///   * absence of extension: `NO`
///   * list of extensions: the list of extensions between brackets, separated by commas (`[[a,b],[c]]`)
///   * D3: the grounded, stable and preferred extensions, as three lists separated by commas (`[[a]],[[a,b]],[[a,b]]`)
///
/// Each answer ends with a newline character.
#[derive(Default)]
pub struct Iccma17Writer;

fn write_extension<T>(writer: &mut dyn Write, extension: &[&Argument<T>]) -> Result<()>
where
    T: LabelType,
{
    write!(writer, "[")?;
    for (i, arg) in extension.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "{}", arg)?;
    }
    write!(writer, "]")?;
    Ok(())
}

fn write_extension_list<T>(writer: &mut dyn Write, extensions: &[Vec<&Argument<T>>]) -> Result<()>
where
    T: LabelType,
{
    write!(writer, "[")?;
    for (i, ext) in extensions.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_extension(writer, ext)?;
    }
    write!(writer, "]")?;
    Ok(())
}

impl<T> ResponseWriter<T> for Iccma17Writer
where
    T: LabelType,
{
    fn write_acceptance_status(
        &self,
        writer: &mut dyn Write,
        acceptance_status: bool,
    ) -> Result<()> {
        let context = "while writing an acceptance status";
        writeln!(writer, "{}", if acceptance_status { "YES" } else { "NO" }).context(context)?;
        writer.flush().context(context)
    }

    fn write_single_extension(
        &self,
        writer: &mut dyn Write,
        extension: Option<&[&Argument<T>]>,
    ) -> Result<()> {
        let context = "while writing an extension";
        match extension {
            Some(ext) => write_extension(writer, ext).context(context)?,
            None => write!(writer, "NO").context(context)?,
        }
        writeln!(writer).context(context)?;
        writer.flush().context(context)
    }

    fn write_extensions(
        &self,
        writer: &mut dyn Write,
        extensions: &[Vec<&Argument<T>>],
    ) -> Result<()> {
        let context = "while writing a list of extensions";
        write_extension_list(writer, extensions).context(context)?;
        writeln!(writer).context(context)?;
        writer.flush().context(context)
    }

    fn write_d3(
        &self,
        writer: &mut dyn Write,
        grounded: &[&Argument<T>],
        stable: &[Vec<&Argument<T>>],
        preferred: &[Vec<&Argument<T>>],
    ) -> Result<()> {
        let context = "while writing the D3 answer";
        write!(writer, "[").context(context)?;
        write_extension(writer, grounded).context(context)?;
        write!(writer, "],").context(context)?;
        write_extension_list(writer, stable).context(context)?;
        write!(writer, ",").context(context)?;
        write_extension_list(writer, preferred).context(context)?;
        writeln!(writer).context(context)?;
        writer.flush().context(context)
    }
}
