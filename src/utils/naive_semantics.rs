//! Brute-force computation of extensions, used to check the solvers on small frameworks.
//!
//! Sets of arguments are lists of sorted ids, and lists of sets are sorted.

use super::reduct;
use crate::aa::{AAFramework, LabelType};

const MAX_ARGS: usize = 16;

fn all_subsets<T>(af: &AAFramework<T>) -> impl Iterator<Item = Vec<usize>>
where
    T: LabelType,
{
    let n = af.n_arguments();
    assert!(n <= MAX_ARGS, "too many arguments for brute force");
    (0..(1usize << n)).map(move |mask| (0..n).filter(|i| mask & (1 << i) != 0).collect())
}

fn is_conflict_free<T>(af: &AAFramework<T>, set: &[usize]) -> bool
where
    T: LabelType,
{
    set.iter()
        .all(|a| set.iter().all(|b| !af.has_attack(*a, *b)))
}

fn defends<T>(af: &AAFramework<T>, set: &[usize], id: usize) -> bool
where
    T: LabelType,
{
    af.attackers_of(id)
        .iter()
        .all(|attacker| af.is_attacked_by_set(*attacker, set))
}

fn is_admissible<T>(af: &AAFramework<T>, set: &[usize]) -> bool
where
    T: LabelType,
{
    is_conflict_free(af, set) && set.iter().all(|a| defends(af, set, *a))
}

fn is_subset(a: &[usize], b: &[usize]) -> bool {
    a.iter().all(|x| b.contains(x))
}

pub fn conflict_free_sets<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let mut sets = all_subsets(af)
        .filter(|s| is_conflict_free(af, s))
        .collect::<Vec<Vec<usize>>>();
    sets.sort_unstable();
    sets
}

pub fn admissible_sets<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let mut sets = all_subsets(af)
        .filter(|s| is_admissible(af, s))
        .collect::<Vec<Vec<usize>>>();
    sets.sort_unstable();
    sets
}

pub fn complete_extensions<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let mut sets = all_subsets(af)
        .filter(|s| {
            is_admissible(af, s)
                && (0..af.n_arguments()).all(|a| s.contains(&a) || !defends(af, s, a))
        })
        .collect::<Vec<Vec<usize>>>();
    sets.sort_unstable();
    sets
}

pub fn grounded_extension<T>(af: &AAFramework<T>) -> Vec<usize>
where
    T: LabelType,
{
    complete_extensions(af)
        .into_iter()
        .min_by_key(|s| s.len())
        .unwrap_or_default()
}

pub fn preferred_extensions<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let admissible = admissible_sets(af);
    admissible
        .iter()
        .filter(|s| {
            !admissible
                .iter()
                .any(|other| other.len() > s.len() && is_subset(s, other))
        })
        .cloned()
        .collect()
}

pub fn initial_sets<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let nonempty_admissible = admissible_sets(af)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<Vec<usize>>>();
    nonempty_admissible
        .iter()
        .filter(|s| {
            !nonempty_admissible
                .iter()
                .any(|other| other.len() < s.len() && is_subset(other, s))
        })
        .cloned()
        .collect()
}

/// Returns the initial sets that have no attack, in either direction, with another initial set.
pub fn unchallenged_initial_sets<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let initial = initial_sets(af);
    initial
        .iter()
        .filter(|s| {
            initial.iter().all(|other| {
                other == *s
                    || !s.iter().any(|a| {
                        other
                            .iter()
                            .any(|b| af.has_attack(*a, *b) || af.has_attack(*b, *a))
                    })
            })
        })
        .cloned()
        .collect()
}

/// Returns the unchallenged extensions, as sorted lists of labels.
///
/// An extension is built by repeatedly adding an unchallenged initial set and taking the reduct,
/// until the current framework has no unchallenged initial set.
pub fn unchallenged_extensions<T>(af: &AAFramework<T>) -> Vec<Vec<T>>
where
    T: LabelType,
{
    let mut result = Vec::new();
    let mut to_process = vec![(reduct(af, &[]).unwrap(), Vec::new())];
    while let Some((current, base)) = to_process.pop() {
        let candidates = unchallenged_initial_sets(&current);
        if candidates.is_empty() {
            let mut ext: Vec<T> = base;
            ext.sort_unstable();
            if !result.contains(&ext) {
                result.push(ext);
            }
            continue;
        }
        for c in candidates {
            let mut new_base = base.clone();
            new_base.append(&mut current.argument_set().labels_of(&c));
            to_process.push((reduct(&current, &c).unwrap(), new_base));
        }
    }
    result.sort_unstable();
    result
}

/// Translates lists of ids into sorted lists of labels.
pub fn to_labels<T>(af: &AAFramework<T>, sets: &[Vec<usize>]) -> Vec<Vec<T>>
where
    T: LabelType,
{
    let mut result = sets
        .iter()
        .map(|s| {
            let mut labels = af.argument_set().labels_of(s);
            labels.sort_unstable();
            labels
        })
        .collect::<Vec<Vec<T>>>();
    result.sort_unstable();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{AspartixReader, InstanceReader};

    #[test]
    fn test_two_mutual_attacks() {
        let af = AspartixReader::default()
            .read(&mut "arg(a).\narg(b).\narg(c).\narg(d).\natt(a,b).\natt(b,a).\natt(c,d).\natt(d,c).\n".as_bytes())
            .unwrap();
        assert_eq!(
            vec![vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3]],
            preferred_extensions(&af)
        );
        assert_eq!(vec![vec![0], vec![1], vec![2], vec![3]], initial_sets(&af));
        assert_eq!(Vec::<Vec<usize>>::new(), unchallenged_initial_sets(&af));
        assert_eq!(vec![Vec::<String>::new()], unchallenged_extensions(&af));
    }

    #[test]
    fn test_unattacked_arguments() {
        let af = AspartixReader::default()
            .read(&mut "arg(a).\narg(b).\narg(c).\natt(a,b).\natt(b,c).\n".as_bytes())
            .unwrap();
        assert_eq!(vec![0, 2], grounded_extension(&af));
        assert_eq!(vec![vec![0]], initial_sets(&af));
        assert_eq!(
            vec![vec!["a".to_string(), "c".to_string()]],
            unchallenged_extensions(&af)
        );
    }
}
