use crate::{
    aa::{AAFramework, Argument, LabelType},
    circ::Variable,
};

/// Maps the arguments of a framework to the variables used in the ccnf encodings.
///
/// For a framework with `n` arguments, the variables are split into three bands:
/// the truth variables `1..=n` (the argument is in the extension),
/// the attacked variables `n+1..=2n` (the argument is attacked by the extension),
/// and the range variables `2n+1..=3n` (the argument is in the range of the extension).
///
/// # Example
///
/// ```
/// # use circabri::aa::{AAFramework, ArgumentSet};
/// # use circabri::encodings::VarAllocator;
/// let af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&["a", "b"]));
/// let vars = VarAllocator::new(&af);
/// let b = af.argument_set().get_argument(&"b").unwrap();
/// assert_eq!(2, usize::from(vars.truth_var(b)));
/// assert_eq!(4, usize::from(vars.attacked_var(b)));
/// assert_eq!(6, usize::from(vars.range_var(b)));
/// assert_eq!(6, vars.max_var());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarAllocator {
    n_args: usize,
}

impl VarAllocator {
    /// Builds the allocator for a framework.
    pub fn new<T>(af: &AAFramework<T>) -> Self
    where
        T: LabelType,
    {
        Self {
            n_args: af.n_arguments(),
        }
    }

    /// Returns the variable which is true iff the argument is in the extension.
    pub fn truth_var<T>(&self, arg: &Argument<T>) -> Variable
    where
        T: LabelType,
    {
        Variable::from(arg.id())
    }

    /// Returns the variable which is true iff the argument is attacked by the extension.
    pub fn attacked_var<T>(&self, arg: &Argument<T>) -> Variable
    where
        T: LabelType,
    {
        Variable::from(self.n_args + arg.id())
    }

    /// Returns the variable which is true iff the argument is in the range of the extension.
    pub fn range_var<T>(&self, arg: &Argument<T>) -> Variable
    where
        T: LabelType,
    {
        Variable::from(2 * self.n_args + arg.id())
    }

    /// Returns the highest variable in use.
    pub fn max_var(&self) -> usize {
        3 * self.n_args
    }

    /// Returns the index of the argument which truth variable is the one provided.
    ///
    /// If the variable is not a truth variable, [Option::None] is returned.
    pub fn arg_id_from_truth_var(&self, v: Variable) -> Option<usize> {
        let id = usize::from(v);
        if id <= self.n_args {
            Some(id)
        } else {
            None
        }
    }
}
