use crate::aa::{AAFramework, ArgumentSet, LabelType};
use anyhow::{Context, Result};

/// Computes the reduct of an AF by a set of arguments.
///
/// The reduct is the framework obtained by removing the arguments of the set and the arguments they attack.
/// The remaining arguments are renumbered densely, keeping their relative order,
/// and the attacks between two remaining arguments are kept.
/// The returned framework does not share anything with the original one.
///
/// # Example
///
/// ```
/// # use reducto::aa::{AAFramework, ArgumentSet};
/// # use reducto::utils::reduct;
/// let mut af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&["a", "b", "c", "d"]));
/// af.new_attack(&"a", &"b").unwrap();
/// af.new_attack(&"b", &"c").unwrap();
/// af.new_attack(&"c", &"d").unwrap();
/// let reduced = reduct(&af, &[0]).unwrap();
/// assert_eq!(2, reduced.n_arguments());
/// assert!(reduced.has_attack(0, 1)); // "c" attacks "d"
/// ```
pub fn reduct<T>(af: &AAFramework<T>, removed: &[usize]) -> Result<AAFramework<T>>
where
    T: LabelType,
{
    let mut kept = vec![true; af.n_arguments()];
    removed.iter().for_each(|id| {
        kept[*id] = false;
        af.targets_of(*id)
            .iter()
            .for_each(|target| kept[*target] = false);
    });
    let mut next_id = 0;
    let arg_mapping = kept
        .into_iter()
        .map(|k| {
            if k {
                next_id += 1;
                Some(next_id - 1)
            } else {
                None
            }
        })
        .collect::<Vec<Option<usize>>>();
    let labels = af
        .argument_set()
        .iter()
        .filter(|a| arg_mapping[a.id()].is_some())
        .map(|a| a.label().clone())
        .collect::<Vec<T>>();
    let mut new_af = AAFramework::new_with_argument_set(ArgumentSet::new_with_labels(&labels));
    for (from, to) in af.attack_ids() {
        if let (Some(new_from), Some(new_to)) = (arg_mapping[*from], arg_mapping[*to]) {
            new_af
                .new_attack_by_ids(new_from, new_to)
                .context("while computing a reduct")?;
        }
    }
    Ok(new_af)
}
