use crate::aa::{Argument, ArgumentSet, LabelType};
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;

/// An Abstract Argumentation framework as defined in Dung semantics.
///
/// The attack relation is stored both forward (attacks from an argument) and backward (attacks to an argument),
/// preserving insertion order in both directions.
/// An attack given more than once is registered only once.
pub struct AAFramework<T>
where
    T: LabelType,
{
    arguments: ArgumentSet<T>,
    attacks: Vec<(usize, usize)>,
    known_attacks: HashSet<(usize, usize)>,
    attacks_from: Vec<Vec<usize>>,
    attacks_to: Vec<Vec<usize>>,
}

impl<T> Default for AAFramework<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new_with_argument_set(ArgumentSet::default())
    }
}

/// An attack, represented as a couple of two arguments.
///
/// Attacks are built by [`AAFramework`] objects.
pub struct Attack<'a, T>(&'a Argument<T>, &'a Argument<T>)
where
    T: LabelType;

impl<'a, T> Attack<'a, T>
where
    T: LabelType,
{
    /// Returns the attacker.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{Attack, LabelType};
    /// fn describe_attack<T: LabelType>(attack: &Attack<T>) {
    ///     println!("{} attacks {}", attack.attacker(), attack.attacked());
    /// }
    /// ```
    pub fn attacker(&self) -> &'a Argument<T> {
        self.0
    }

    /// Returns the attacked argument.
    pub fn attacked(&self) -> &'a Argument<T> {
        self.1
    }
}

impl<T> AAFramework<T>
where
    T: LabelType,
{
    /// Builds an AA framework with no attacks over the provided set of arguments.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{ArgumentSet, AAFramework};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// let framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(3, framework.n_arguments());
    /// assert_eq!(0, framework.n_attacks());
    /// ```
    pub fn new_with_argument_set(arguments: ArgumentSet<T>) -> Self {
        let n_slots = arguments.len() + 1;
        AAFramework {
            arguments,
            attacks: vec![],
            known_attacks: HashSet::new(),
            attacks_from: vec![vec![]; n_slots],
            attacks_to: vec![vec![]; n_slots],
        }
    }

    /// Adds a new argument to this argumentation framework and returns its index.
    ///
    /// If the argument already exists, its index is returned and the framework is left unchanged.
    pub fn new_argument(&mut self, label: T) -> usize {
        let id = self.arguments.new_argument(label);
        while self.attacks_from.len() <= id {
            self.attacks_from.push(Vec::new());
            self.attacks_to.push(Vec::new());
        }
        id
    }

    /// Adds a new attack given the labels of the source and destination arguments.
    ///
    /// Both arguments must already be declared, else an error is returned.
    /// Adding an attack that already exists has no effect.
    ///
    /// # Example
    ///
    /// ```
    /// # use circabri::aa::{ArgumentSet, AAFramework};
    /// let labels = vec!["a", "b", "c"];
    /// let mut framework = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&labels));
    /// framework.new_attack(&labels[0], &labels[1]).unwrap();
    /// framework.new_attack(&labels[0], &labels[1]).unwrap();
    /// assert_eq!(1, framework.n_attacks());
    /// assert!(framework.new_attack(&labels[0], &"d").is_err());
    /// ```
    pub fn new_attack(&mut self, from: &T, to: &T) -> Result<()> {
        let context = || format!("cannot add an attack from {:?} to {:?}", from, to);
        let attacker_id = self
            .arguments
            .get_argument_index(from)
            .with_context(context)?;
        let attacked_id = self
            .arguments
            .get_argument_index(to)
            .with_context(context)?;
        self.register_attack(attacker_id, attacked_id);
        Ok(())
    }

    /// Adds a new attack given the indices of the source and destination arguments.
    ///
    /// If one of the indices does not refer to an argument, an error is returned.
    /// Adding an attack that already exists has no effect.
    pub fn new_attack_by_ids(&mut self, from: usize, to: usize) -> Result<()> {
        let n_arguments = self.arguments.len();
        let is_valid = |id: usize| id >= 1 && id <= n_arguments;
        if !is_valid(from) || !is_valid(to) {
            return Err(anyhow!(
                "cannot add an attack from indices {} to {}; valid indices are 1 to {}",
                from,
                to,
                n_arguments
            ));
        }
        self.register_attack(from, to);
        Ok(())
    }

    fn register_attack(&mut self, from: usize, to: usize) {
        if self.known_attacks.insert((from, to)) {
            self.attacks.push((from, to));
            self.attacks_from[from].push(self.attacks.len() - 1);
            self.attacks_to[to].push(self.attacks.len() - 1);
        }
    }

    /// Returns the argument set of the framework.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.arguments
    }

    fn attack_at(&self, i: usize) -> Attack<'_, T> {
        let (a, b) = self.attacks[i];
        Attack(
            self.arguments.get_argument_by_id(a),
            self.arguments.get_argument_by_id(b),
        )
    }

    /// Provides an iterator to the attacks, in insertion order.
    pub fn iter_attacks(&self) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        (0..self.attacks.len()).map(|i| self.attack_at(i))
    }

    /// Provides an iterator to the attacks that have the given argument as attacker.
    pub fn iter_attacks_from(&self, arg: &Argument<T>) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks_from[arg.id()]
            .iter()
            .map(|i| self.attack_at(*i))
    }

    /// Provides an iterator to the attacks that have the given argument as attacked.
    pub fn iter_attacks_to(&self, arg: &Argument<T>) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.iter_attacks_to_id(arg.id())
    }

    /// Provides an iterator to the attacks in which the attacked argument is the one given by the index.
    pub fn iter_attacks_to_id(
        &self,
        attacked_id: usize,
    ) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks_to[attacked_id]
            .iter()
            .map(|i| self.attack_at(*i))
    }

    /// Returns the number of arguments in this framework.
    pub fn n_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// Returns the number of (distinct) attacks in this framework.
    pub fn n_attacks(&self) -> usize {
        self.attacks.len()
    }

    /// Checks whether a set of arguments is a stable extension of this framework.
    ///
    /// The set must be conflict-free, and every argument outside of it must be attacked by one of its members.
    pub fn is_stable_extension(&self, extension: &[&Argument<T>]) -> bool {
        let mut in_ext = vec![false; self.n_arguments() + 1];
        extension.iter().for_each(|a| in_ext[a.id()] = true);
        let conflict_free = self
            .iter_attacks()
            .all(|att| !in_ext[att.attacker().id()] || !in_ext[att.attacked().id()]);
        conflict_free
            && self.argument_set().iter().all(|arg| {
                in_ext[arg.id()]
                    || self
                        .iter_attacks_to(arg)
                        .any(|att| in_ext[att.attacker().id()])
            })
    }
}
