use super::{Argument, ArgumentSet, LabelType};
use crate::sat::Variable;
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;

/// An Abstract Argumentation framework as defined in Dung semantics.
///
/// Arguments are indexed densely from `0` to `n-1`.
/// For each argument, the framework stores both its attackers and the arguments it attacks,
/// so that both directions can be followed in constant time per attack.
/// Attack existence is checked in constant time; duplicate attacks are ignored.
///
/// Each argument is associated with two SAT variables, used by the [encodings](crate::encodings):
/// `accepted_var(i)` is `i+1` and `rejected_var(i)` is `n+i+1`, where `n` is the number of arguments.
/// Since derived frameworks are renumbered, these variables are specific to a framework instance.
#[derive(Clone, Debug, Default)]
pub struct AAFramework<T>
where
    T: LabelType,
{
    arguments: ArgumentSet<T>,
    attacks: Vec<(usize, usize)>,
    attack_set: HashSet<(usize, usize)>,
    attackers: Vec<Vec<usize>>,
    targets: Vec<Vec<usize>>,
    self_attacking: Vec<bool>,
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
    /// Example
    ///
    /// ```
    /// # use reducto::aa::{Attack, LabelType};
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
    /// Builds an AA framework.
    ///
    /// The set of arguments used in the framework is provided.
    ///
    /// # Example
    ///
    /// ```
    /// # use reducto::aa::{ArgumentSet, AAFramework};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// let framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(3, framework.argument_set().len());
    /// assert_eq!(0, framework.iter_attacks().count());
    /// ```
    pub fn new_with_argument_set(arguments: ArgumentSet<T>) -> Self {
        let n = arguments.len();
        AAFramework {
            arguments,
            attacks: vec![],
            attack_set: HashSet::new(),
            attackers: vec![vec![]; n],
            targets: vec![vec![]; n],
            self_attacking: vec![false; n],
        }
    }

    /// Adds a new argument to this argumentation framework.
    pub fn new_argument(&mut self, label: T) {
        let old_len = self.arguments.len();
        self.arguments.new_argument(label);
        if self.arguments.len() > old_len {
            self.attackers.push(Vec::new());
            self.targets.push(Vec::new());
            self.self_attacking.push(false);
        }
    }

    /// Adds a new attack given the labels of the source and destination arguments.
    ///
    /// If the provided arguments are undefined, an error is returned.
    /// If the attack already exists, this call has no effect.
    ///
    /// # Example
    ///
    /// ```
    /// # use reducto::aa::{ArgumentSet, AAFramework};
    /// let labels = vec!["a", "b", "c"];
    /// let arguments = ArgumentSet::new_with_labels(&labels);
    /// let mut framework = AAFramework::new_with_argument_set(arguments);
    /// framework.new_attack(&labels[0], &labels[1]).unwrap();
    /// framework.new_attack(&labels[0], &labels[1]).unwrap();
    /// assert_eq!(1, framework.n_attacks());
    /// ```
    pub fn new_attack(&mut self, from: &T, to: &T) -> Result<()> {
        let context = || format!("cannot add an attack from {:?} to {:?}", from, to,);
        let attacker_id = self
            .arguments
            .get_argument_index(from)
            .with_context(context)?;
        let attacked_id = self
            .arguments
            .get_argument_index(to)
            .with_context(context)?;
        self.push_attack(attacker_id, attacked_id);
        Ok(())
    }

    /// Adds a new attack given the IDs of the source and destination arguments.
    ///
    /// If the provided arguments are undefined, an error is returned.
    /// If the attack already exists, this call has no effect.
    ///
    /// # Example
    ///
    /// ```
    /// # use reducto::aa::{ArgumentSet, AAFramework};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// let mut framework = AAFramework::new_with_argument_set(arguments);
    /// framework.new_attack_by_ids(0, 1).unwrap(); // "a" attacks "b"
    /// assert!(framework.has_attack(0, 1));
    /// assert!(!framework.has_attack(1, 0));
    /// ```
    pub fn new_attack_by_ids(&mut self, from: usize, to: usize) -> Result<()> {
        let n_arguments = self.arguments.len();
        if from >= n_arguments || to >= n_arguments {
            return Err(anyhow!(
                "cannot add an attack from identifiers {:?} to {:?}; the framework has {} argument(s)",
                from,
                to,
                n_arguments
            ));
        }
        self.push_attack(from, to);
        Ok(())
    }

    fn push_attack(&mut self, from: usize, to: usize) {
        if !self.attack_set.insert((from, to)) {
            return;
        }
        self.attacks.push((from, to));
        self.targets[from].push(to);
        self.attackers[to].push(from);
        if from == to {
            self.self_attacking[from] = true;
        }
    }

    /// Returns the argument set of the framework.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.arguments
    }

    /// Provides an iterator to the attacks, in insertion order.
    pub fn iter_attacks(&self) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks.iter().map(|(a, b)| {
            Attack(
                self.arguments.get_argument_by_id(*a),
                self.arguments.get_argument_by_id(*b),
            )
        })
    }

    /// Provides the attacks as couples of argument ids, in insertion order.
    pub fn attack_ids(&self) -> &[(usize, usize)] {
        &self.attacks
    }

    /// Returns the ids of the arguments attacking the argument with the given id.
    pub fn attackers_of(&self, id: usize) -> &[usize] {
        &self.attackers[id]
    }

    /// Returns the ids of the arguments attacked by the argument with the given id.
    pub fn targets_of(&self, id: usize) -> &[usize] {
        &self.targets[id]
    }

    /// Returns `true` iff the first argument attacks the second one.
    pub fn has_attack(&self, from: usize, to: usize) -> bool {
        self.attack_set.contains(&(from, to))
    }

    /// Returns `true` iff the argument with the given id attacks itself.
    pub fn is_self_attacking(&self, id: usize) -> bool {
        self.self_attacking[id]
    }

    /// Returns `true` iff the argument with the given id has no attacker.
    pub fn is_unattacked(&self, id: usize) -> bool {
        self.attackers[id].is_empty()
    }

    /// Returns `true` iff the attack from `from` to `to` exists and is countered by an attack from `to` to `from`.
    pub fn is_symmetric(&self, from: usize, to: usize) -> bool {
        self.has_attack(from, to) && self.has_attack(to, from)
    }

    /// Returns `true` iff some argument in `set` attacks the argument `id`.
    pub fn is_attacked_by_set(&self, id: usize, set: &[usize]) -> bool {
        set.iter().any(|s| self.has_attack(*s, id))
    }

    /// Returns the SAT variable stating the argument with the given id is accepted.
    pub fn accepted_var(&self, id: usize) -> Variable {
        Variable::from(id + 1)
    }

    /// Returns the SAT variable stating the argument with the given id is attacked by an accepted argument.
    pub fn rejected_var(&self, id: usize) -> Variable {
        Variable::from(self.n_arguments() + id + 1)
    }

    /// Returns the number of SAT variables used to encode this framework.
    pub fn n_vars(&self) -> usize {
        self.n_arguments() << 1
    }

    /// Returns the number of arguments in this framework.
    ///
    /// # Example
    ///
    /// ```
    /// # use reducto::aa::{ArgumentSet, AAFramework};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// let framework = AAFramework::new_with_argument_set(arguments);
    /// assert_eq!(3, framework.n_arguments());
    /// ```
    pub fn n_arguments(&self) -> usize {
        self.argument_set().len()
    }

    /// Returns the number of attacks in this framework.
    pub fn n_attacks(&self) -> usize {
        self.attacks.len()
    }
}
