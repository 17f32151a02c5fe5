/// A value read from an instance, together with the warnings raised while reading it.
///
/// There is no error case: a reading step that fails returns an [anyhow::Error] instead.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct WarningResult<T> {
    value: T,
    warnings: Vec<String>,
}

impl<T> WarningResult<T> {
    /// Wraps a value without warning.
    pub(crate) fn ok(value: T) -> Self {
        Self {
            value,
            warnings: vec![],
        }
    }

    /// Wraps a value associated with a single warning.
    pub(crate) fn warned<S>(value: T, warning: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            value,
            warnings: vec![warning.into()],
        }
    }

    /// Returns the value, passing the warnings (if any) to the callback function one by one.
    pub(crate) fn consume_warnings<F>(self, mut f: F) -> T
    where
        F: FnMut(&str),
    {
        self.warnings.iter().for_each(|w| f(w));
        self.value
    }

    /// Merges two results; the warnings of `self` come first.
    pub(crate) fn zip<U>(mut self, other: WarningResult<U>) -> WarningResult<(T, U)> {
        self.warnings.extend(other.warnings);
        WarningResult {
            value: (self.value, other.value),
            warnings: self.warnings,
        }
    }
}
