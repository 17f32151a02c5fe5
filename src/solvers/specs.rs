use crate::aa::{Argument, LabelType};
use anyhow::Result;

/// A trait for solvers able to compute an extension.
pub trait SingleExtensionComputer<T>
where
    T: LabelType,
{
    /// Computes a single extension.
    ///
    /// In case the problem admits no extension, [Option::None] is returned.
    /// In case an extension is found, it is returned as a vector of arguments.
    fn compute_one_extension(&mut self) -> Result<Option<Vec<&Argument<T>>>>;
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
    fn is_skeptically_accepted(&mut self, arg: &Argument<T>) -> Result<bool>;
}

/// A trait for solvers able to compute all the extensions.
pub trait ExtensionEnumerator<T>
where
    T: LabelType,
{
    /// Computes all the extensions.
    ///
    /// Each extension is returned once, whatever the way it was found.
    fn enumerate_extensions(&mut self) -> Result<Vec<Vec<&Argument<T>>>>;

    /// Counts the extensions.
    fn count_extensions(&mut self) -> Result<usize> {
        Ok(self.enumerate_extensions()?.len())
    }
}
