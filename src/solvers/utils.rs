use crate::{
    aa::{AAFramework, Argument, LabelType},
    sat::SatSolverFactory,
};
use anyhow::{anyhow, Result};

// Translates labels coming from a derived framework into the arguments of the initial AF.
pub(crate) fn labels_to_init_af_extension<'a, T>(
    labels: &[T],
    init_af: &'a AAFramework<T>,
) -> Result<Vec<&'a Argument<T>>>
where
    T: LabelType,
{
    labels
        .iter()
        .map(|l| init_af.argument_set().get_argument(l))
        .collect()
}

pub(crate) fn ids_to_extension<'a, T>(ids: &[usize], af: &'a AAFramework<T>) -> Vec<&'a Argument<T>>
where
    T: LabelType,
{
    ids.iter()
        .map(|id| af.argument_set().get_argument_by_id(*id))
        .collect()
}

// Computes the initial sets when no interruption may occur.
pub(crate) fn all_initial_sets<T>(
    af: &AAFramework<T>,
    solver_factory: &dyn SatSolverFactory,
) -> Result<Vec<Vec<usize>>>
where
    T: LabelType,
{
    super::compute_initial_sets(af, solver_factory, &|| false)?
        .ok_or_else(|| anyhow!("the computation of the initial sets was interrupted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{AspartixReader, InstanceReader};

    #[test]
    fn test_ids_to_extension_outlives_ids() {
        let af = AspartixReader::default()
            .read(&mut "arg(a).\narg(b).\narg(c).\natt(a,b).\n".as_bytes())
            .unwrap();
        let extension = {
            let ids = vec![0, 2];
            ids_to_extension(&ids, &af)
        };
        let labels = extension.iter().map(|a| a.label().as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["a", "c"], labels);
    }
}
