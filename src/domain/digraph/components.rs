//! Strong and weak connectivity on the median cut.

use super::BipolarDigraph;

impl BipolarDigraph {
    /// Strongly connected components of the median cut.
    ///
    /// Components come out of Tarjan's algorithm in reverse topological
    /// order (sinks first); members of each component are sorted.
    pub fn strong_components(&self) -> &[Vec<usize>] {
        self.cache.strong_components.get_or_init(|| tarjan(self))
    }

    /// Connected components of the median cut, ignoring arc direction.
    pub fn weak_components(&self) -> &[Vec<usize>] {
        self.cache.weak_components.get_or_init(|| {
            let order = self.order();
            let gamma = self.gamma();
            let mut component = vec![usize::MAX; order];
            let mut components = Vec::new();
            for start in 0..order {
                if component[start] != usize::MAX {
                    continue;
                }
                let id = components.len();
                let mut members = vec![start];
                let mut stack = vec![start];
                component[start] = id;
                while let Some(x) = stack.pop() {
                    for &y in gamma[x].dominant.iter().chain(gamma[x].absorbent.iter()) {
                        if component[y] == usize::MAX {
                            component[y] = id;
                            members.push(y);
                            stack.push(y);
                        }
                    }
                }
                members.sort_unstable();
                components.push(members);
            }
            components
        })
    }
}

/// Iterative Tarjan strongly connected components.
fn tarjan(digraph: &BipolarDigraph) -> Vec<Vec<usize>> {
    const UNVISITED: usize = usize::MAX;
    let order = digraph.order();
    let gamma = digraph.gamma();
    let mut index = vec![UNVISITED; order];
    let mut low = vec![0usize; order];
    let mut on_stack = vec![false; order];
    let mut stack = Vec::new();
    let mut components = Vec::new();
    let mut next_index = 0usize;

    for root in 0..order {
        if index[root] != UNVISITED {
            continue;
        }
        // Call frames: (node, position in its successor list).
        let mut frames = vec![(root, 0usize)];
        index[root] = next_index;
        low[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = frames.last_mut() {
            let x = frame.0;
            let successors = &gamma[x].dominant;
            if frame.1 < successors.len() {
                let y = successors[frame.1];
                frame.1 += 1;
                if index[y] == UNVISITED {
                    index[y] = next_index;
                    low[y] = next_index;
                    next_index += 1;
                    stack.push(y);
                    on_stack[y] = true;
                    frames.push((y, 0));
                } else if on_stack[y] {
                    low[x] = low[x].min(index[y]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                low[parent] = low[parent].min(low[x]);
            }
            if low[x] == index[x] {
                let mut component = Vec::new();
                while let Some(y) = stack.pop() {
                    on_stack[y] = false;
                    component.push(y);
                    if y == x {
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

#[cfg(test)]
mod tests {
    use crate::domain::digraph::graph::tests::digraph;
    use rust_decimal_macros::dec;

    #[test]
    fn three_cycle_is_one_strong_component() {
        let g = digraph(
            &["a", "b", "c", "d"],
            &[
                &[dec!(-1), dec!(1), dec!(-1), dec!(-1)],
                &[dec!(-1), dec!(-1), dec!(1), dec!(-1)],
                &[dec!(1), dec!(-1), dec!(-1), dec!(1)],
                &[dec!(-1), dec!(-1), dec!(-1), dec!(-1)],
            ],
        );
        let components = g.strong_components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], vec![3]);
        assert_eq!(components[1], vec![0, 1, 2]);
    }

    #[test]
    fn weak_components_ignore_direction() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0.5), dec!(-1)],
                &[dec!(-1), dec!(-1), dec!(0)],
                &[dec!(-1), dec!(-1), dec!(-1)],
            ],
        );
        assert_eq!(g.weak_components(), &[vec![0, 1], vec![2]]);
        assert_eq!(g.strong_components().len(), 3);
    }
}
