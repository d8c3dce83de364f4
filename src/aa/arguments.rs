use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// The trait for argument labels.
///
/// Arguments may be labeled by any type implementing some traits.
/// This trait is used to combine them.
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}

/// Handles a single argument.
///
/// Each argument has a label and an index which is unique in an argument set.
/// Indices begin at 1, the index 0 being a reserved sentinel that never refers to an argument.
///
/// Arguments are built by [`ArgumentSet`] objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument<T: LabelType> {
    id: usize,
    label: T,
}

impl<T> Argument<T>
where
    T: LabelType,
{
    /// Returns the label of the argument.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{Argument, LabelType};
    /// fn describe_argument<T: LabelType>(a: &Argument<T>) {
    ///     println!("argument with id {} has the label {}", a.id(), a.label());
    /// }
    /// ```
    pub fn label(&self) -> &T {
        &self.label
    }

    /// Returns the index of the argument.
    ///
    /// The first argument added to a set gets the index 1.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Display for Argument<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Handles the set of arguments of an AA framework.
///
/// Arguments are stored in the order they were first seen.
/// Adding an argument whose label is already known has no effect.
pub struct ArgumentSet<T>
where
    T: LabelType,
{
    arguments: Vec<Option<Argument<T>>>,
    label_to_id: HashMap<T, usize>,
}

impl<T> Default for ArgumentSet<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self {
            arguments: vec![None],
            label_to_id: HashMap::new(),
        }
    }
}

impl<T> ArgumentSet<T>
where
    T: LabelType,
{
    /// Builds a new argument set given the labels of the arguments.
    ///
    /// The argument at position `i` in the slice gets the index `i+1`.
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::ArgumentSet;
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// assert_eq!(3, arguments.len());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut argument_set = ArgumentSet {
            arguments: Vec::with_capacity(labels.len() + 1),
            label_to_id: HashMap::with_capacity(labels.len()),
        };
        argument_set.arguments.push(None);
        labels.iter().for_each(|l| {
            argument_set.new_argument(l.clone());
        });
        argument_set
    }

    /// Adds a new argument to this set and returns its index.
    ///
    /// The index of the new argument is the previous maximal index plus one.
    /// If an argument with the same label is already defined, no argument is added and the existing index is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::ArgumentSet;
    /// let mut arguments = ArgumentSet::default();
    /// assert_eq!(1, arguments.new_argument("a"));
    /// assert_eq!(2, arguments.new_argument("b"));
    /// assert_eq!(1, arguments.new_argument("a"));
    /// ```
    pub fn new_argument(&mut self, label: T) -> usize {
        let arguments = &mut self.arguments;
        *self.label_to_id.entry(label.clone()).or_insert_with(|| {
            let id = arguments.len();
            arguments.push(Some(Argument { id, label }));
            id
        })
    }

    /// Returns the number of arguments in the set.
    pub fn len(&self) -> usize {
        self.arguments.len() - 1
    }

    /// Returns `true` iff the set has no argument.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the index associated to an argument label.
    ///
    /// If no such label exists, an error is returned.
    pub fn get_argument_index(&self, label: &T) -> Result<usize> {
        self.label_to_id
            .get(label)
            .copied()
            .ok_or_else(|| anyhow!("no such argument: {}", label))
    }

    /// Returns the argument associated to an argument label.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::ArgumentSet;
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// assert!(arguments.get_argument(&"a").is_ok());
    /// assert!(arguments.get_argument(&"d").is_err());
    /// ```
    pub fn get_argument(&self, label: &T) -> Result<&Argument<T>> {
        self.get_argument_index(label)
            .map(|id| self.get_argument_by_id(id))
    }

    /// Returns the argument with the corresponding index.
    ///
    /// # Panics
    ///
    /// Panics if no argument has such index (including the sentinel index 0).
    pub fn get_argument_by_id(&self, id: usize) -> &Argument<T> {
        match self.arguments.get(id) {
            Some(Some(arg)) => arg,
            _ => panic!("no argument with index {}", id),
        }
    }

    /// Returns an iterator to the arguments, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument<T>> + '_ {
        self.arguments.iter().filter_map(|o| o.as_ref())
    }
}
