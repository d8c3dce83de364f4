use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable of a ccnf instance.
///
/// A variable is represented by a non-null positive integer.
/// It can be obtained through the [From] trait from an unsigned integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroUsize);

impl Variable {
    /// Returns the positive literal of this variable.
    pub fn positive(self) -> Literal {
        Literal::from(self)
    }

    /// Returns the negative literal of this variable.
    pub fn negative(self) -> Literal {
        Literal::from(self).negate()
    }
}

macro_rules! impl_var_from {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                match NonZeroUsize::new(v as usize) {
                    Some(n) => Self(n),
                    None => panic!("cannot build a variable from 0"),
                }
            }
        }
    };
}
impl_var_from!(usize);
impl_var_from!(u64);
impl_var_from!(u32);

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal of a ccnf instance.
///
/// A literal is represented by a non-null integer, its sign giving its polarity.
/// It can be obtained through the [From] trait from a signed integer type, or from a [Variable].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the literal with the same variable and the opposite polarity.
    pub fn negate(self) -> Self {
        Self::from(-self.0.get())
    }

    /// Returns the variable of this literal.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }
}

macro_rules! impl_lit_from {
    ($t: ty) => {
        impl From<$t> for Literal {
            fn from(l: $t) -> Self {
                match NonZeroIsize::new(l as isize) {
                    Some(n) => Self(n),
                    None => panic!("cannot build a literal from 0"),
                }
            }
        }
    };
}
impl_lit_from!(isize);
impl_lit_from!(i64);
impl_lit_from!(i32);

impl From<Variable> for Literal {
    fn from(v: Variable) -> Self {
        Self::from(usize::from(v) as isize)
    }
}

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of integers.
#[cfg(test)]
macro_rules! clause {
    () => (
        vec![] as Vec<$crate::circ::Literal>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+].into_iter().map($crate::circ::Literal::from).collect::<Vec<$crate::circ::Literal>>()
    );
}
#[cfg(test)]
pub(crate) use clause;
