use crate::aa::{AAFramework, LabelType};

/// The status of an argument regarding the grounded extension.
#[derive(Debug, PartialEq, Eq)]
pub enum GroundedStatus {
    /// The argument belongs to the grounded extension.
    Accepted,
    /// The argument is attacked by the grounded extension.
    Rejected,
    /// Neither accepted nor rejected; the full grounded extension is given.
    Undecided(Vec<usize>),
}

enum Watch {
    Nothing,
    Argument(usize),
}

enum Fixpoint {
    WatchedAccepted,
    WatchedRejected,
    Reached(Vec<usize>),
}

fn compute_fixpoint<T>(af: &AAFramework<T>, watch: Watch) -> Fixpoint
where
    T: LabelType,
{
    let watched = match watch {
        Watch::Nothing => None,
        Watch::Argument(id) => Some(id),
    };
    let mut ext = Vec::new();
    let mut n_processed_args = 0;
    let mut defeated_args = vec![false; af.n_arguments()];
    let mut remaining_attackers = (0..af.n_arguments())
        .map(|id| {
            let n = af.attackers_of(id).len();
            if n == 0 {
                ext.push(id);
            }
            n
        })
        .collect::<Vec<usize>>();
    if watched.map(|w| ext.contains(&w)).unwrap_or(false) {
        return Fixpoint::WatchedAccepted;
    }
    while n_processed_args < ext.len() {
        let id = ext[n_processed_args];
        for defeated in af.targets_of(id) {
            if defeated_args[*defeated] {
                continue;
            }
            defeated_args[*defeated] = true;
            if watched == Some(*defeated) {
                return Fixpoint::WatchedRejected;
            }
            for attacked in af.targets_of(*defeated) {
                remaining_attackers[*attacked] -= 1;
                if remaining_attackers[*attacked] == 0 {
                    if watched == Some(*attacked) {
                        return Fixpoint::WatchedAccepted;
                    }
                    ext.push(*attacked);
                }
            }
        }
        n_processed_args += 1;
    }
    Fixpoint::Reached(ext)
}

/// Computes the grounded extension of an AF.
///
/// The result is the list of the argument ids, in the order they were found.
pub fn grounded_extension<T>(af: &AAFramework<T>) -> Vec<usize>
where
    T: LabelType,
{
    match compute_fixpoint(af, Watch::Nothing) {
        Fixpoint::Reached(ext) => ext,
        _ => unreachable!(),
    }
}

/// Computes the status of an argument regarding the grounded extension.
///
/// The computation stops as soon as the argument is found accepted or rejected.
pub fn grounded_status_of<T>(af: &AAFramework<T>, id: usize) -> GroundedStatus
where
    T: LabelType,
{
    match compute_fixpoint(af, Watch::Argument(id)) {
        Fixpoint::WatchedAccepted => GroundedStatus::Accepted,
        Fixpoint::WatchedRejected => GroundedStatus::Rejected,
        Fixpoint::Reached(ext) => GroundedStatus::Undecided(ext),
    }
}
