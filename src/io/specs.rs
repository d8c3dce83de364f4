use crate::aa::{AAFramework, Argument, LabelType};
use anyhow::Result;
use std::io::{Read, Write};

/// The type of callback functions to call when warnings are raised while parsing an AF.
///
/// The first parameter is the (1-based) index of the line that raised the warning.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read Argumentation Frameworks.
pub trait InstanceReader<T>
where
    T: LabelType,
{
    /// Reads an [`AAFramework`].
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::AAFramework;
    /// # use circabri::io::{AspartixReader, InstanceReader};
    /// fn read_af_from_str(s: &str) -> AAFramework<String> {
    ///     let reader = AspartixReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid Aspartix AF")
    /// }
    /// # read_af_from_str("arg(a).");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<AAFramework<T>>;

    /// Reads an argument from a string.
    fn read_arg_from_str<'a>(&self, af: &'a AAFramework<T>, arg: &str) -> Result<&'a Argument<T>>;

    /// Adds a callback function to call when warnings are raised while parsing an AF.
    fn add_warning_handler(&mut self, h: WarningHandler);
}

/// A trait implemented by objects that write responses to problems.
pub trait ResponseWriter<T>
where
    T: LabelType,
{
    /// Writes an acceptance status.
    fn write_acceptance_status(
        &self,
        writer: &mut dyn Write,
        acceptance_status: bool,
    ) -> Result<()>;

    /// Writes a single extension, or the fact there is none.
    fn write_single_extension(
        &self,
        writer: &mut dyn Write,
        extension: Option<&[&Argument<T>]>,
    ) -> Result<()>;

    /// Writes a list of extensions.
    fn write_extensions(
        &self,
        writer: &mut dyn Write,
        extensions: &[Vec<&Argument<T>>],
    ) -> Result<()>;

    /// Writes the grounded, stable and preferred extensions computed for the D3 problem.
    fn write_d3(
        &self,
        writer: &mut dyn Write,
        grounded: &[&Argument<T>],
        stable: &[Vec<&Argument<T>>],
        preferred: &[Vec<&Argument<T>>],
    ) -> Result<()>;
}
