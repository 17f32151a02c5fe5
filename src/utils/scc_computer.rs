use crate::aa::{AAFramework, LabelType};

const UNVISITED: usize = usize::MAX;

/// Computes the strongly connected components of the attack graph of an AF.
///
/// This is an iterative version of Tarjan's algorithm.
/// The components are returned in reverse topological order: a component is listed before the components attacking it.
/// The argument ids inside a component are sorted.
pub fn strongly_connected_components<T>(af: &AAFramework<T>) -> Vec<Vec<usize>>
where
    T: LabelType,
{
    let n = af.n_arguments();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut components = Vec::new();
    let mut next_index = 0;
    let mut call_stack: Vec<(usize, usize)> = Vec::new();
    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        call_stack.push((root, 0));
        while let Some(&(node, pos)) = call_stack.last() {
            let successors = af.targets_of(node);
            if pos < successors.len() {
                let top = call_stack.len() - 1;
                call_stack[top].1 += 1;
                let succ = successors[pos];
                if index[succ] == UNVISITED {
                    index[succ] = next_index;
                    lowlink[succ] = next_index;
                    next_index += 1;
                    stack.push(succ);
                    on_stack[succ] = true;
                    call_stack.push((succ, 0));
                } else if on_stack[succ] {
                    lowlink[node] = usize::min(lowlink[node], index[succ]);
                }
                continue;
            }
            call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                lowlink[parent] = usize::min(lowlink[parent], lowlink[node]);
            }
            if lowlink[node] == index[node] {
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }
    components
}
