use crate::aa::{Argument, LabelType};
use anyhow::Result;

/// A trait for solvers able to compute an extension.
pub trait SingleExtensionComputer<T>
where
    T: LabelType,
{
    /// Computes a single extension.
    ///
    /// In case the problem admits no extension, [Option::None] is return.
    /// In case an extension is found, it is returned as a vector of arguments.
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>>;
}

/// A trait for solvers able to enumerate the extensions.
pub trait ExtensionEnumerator<T>
where
    T: LabelType,
{
    /// Computes all the extensions.
    ///
    /// The extensions are returned in the order they were found; the vector is empty if there is no extension.
    fn enumerate_extensions(&mut self) -> Result<Vec<Vec<&Argument<T>>>>;
}

/// A trait for solvers able to check the credulous acceptance of an argument.
pub trait CredulousAcceptanceComputer<T>
where
    T: LabelType,
{
    /// Checks the credulous acceptance of an argument.
    fn is_credulously_accepted(&mut self, arg: &Argument<T>) -> Result<bool>;
}

/// A trait for solvers able to check the skeptical acceptance of an argument.
pub trait SkepticalAcceptanceComputer<T>
where
    T: LabelType,
{
    /// Checks the skeptical acceptance of an argument.
    ///
    /// If the semantics admits no extension, every argument is skeptically accepted.
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool>;
}
