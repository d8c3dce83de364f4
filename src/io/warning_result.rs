/// A value read from an input file, possibly associated with warnings.
///
/// Warnings never prevent a value from being produced; they are forwarded to the warning handlers
/// of the reader when the value is consumed.
pub(crate) enum WarningResult<T> {
    Clean(T),
    Warned(T, Vec<String>),
}

impl<T> WarningResult<T> {
    /// Builds a value associated with a single warning.
    pub fn with_warning<S>(value: T, warning: S) -> Self
    where
        S: Into<String>,
    {
        WarningResult::Warned(value, vec![warning.into()])
    }

    /// Consumes the warnings one by one and returns the value.
    pub fn consume_warnings<F>(self, mut f: F) -> T
    where
        F: FnMut(&str),
    {
        match self {
            WarningResult::Clean(t) => t,
            WarningResult::Warned(t, warnings) => {
                warnings.iter().for_each(|w| f(w));
                t
            }
        }
    }

    /// Pairs two values, concatenating their warnings.
    pub fn zip<U>(self, other: WarningResult<U>) -> WarningResult<(T, U)> {
        match (self, other) {
            (WarningResult::Clean(t), WarningResult::Clean(u)) => WarningResult::Clean((t, u)),
            (WarningResult::Clean(t), WarningResult::Warned(u, w))
            | (WarningResult::Warned(t, w), WarningResult::Clean(u)) => {
                WarningResult::Warned((t, u), w)
            }
            (WarningResult::Warned(t, mut w1), WarningResult::Warned(u, w2)) => {
                w1.extend(w2);
                WarningResult::Warned((t, u), w1)
            }
        }
    }
}
