use std::iter;

use tracing::trace;

use crate::{
    ast::{Bound, ExceptionClause, RangeClause, RangeSpec},
    error::StatementError,
    interpreter::{expression::evaluate_in, frame::ParameterFrame},
};

/// Index of the root node in every [`BindingTree`].
pub const ROOT: usize = 0;

/// A node of a [`BindingTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The quantifier variable and its value; `None` only for the root.
    pub binding:  Option<(String, i64)>,
    /// Index of the parent node; `None` only for the root.
    pub parent:   Option<usize>,
    /// Indices of the child nodes, in ascending value order.
    pub children: Vec<usize>,
}

/// The enumeration of every valid assignment of a statement's quantifiers.
///
/// Nodes live in an arena and refer to each other by index. Level `k` of the
/// tree binds the variable of the `k`-th range clause, so the first declared
/// clause is the outermost level. The leaves are the nodes at full depth, kept
/// in enumeration order; each root-to-leaf path is one complete assignment.
/// A node whose interval turned out empty simply has no children and is not a
/// leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTree {
    nodes:  Vec<Node>,
    leaves: Vec<usize>,
}

impl Default for BindingTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTree {
    /// Creates a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes:  vec![Node { binding:  None,
                                   parent:   None,
                                   children: Vec::new(), }],
               leaves: vec![ROOT], }
    }

    /// Expands a parsed range into a binding tree.
    ///
    /// Clauses are applied in declaration order; each application grows every
    /// current leaf by one child per integer in the clause's interval, as
    /// resolved against that leaf's ancestors. Exclusive lower bounds and
    /// inclusive upper bounds are adjusted so the interval is always
    /// `lower <= v < upper`; an empty interval yields no children. While the
    /// last clause is applied, every candidate value is checked against the
    /// exception clauses and dropped when both sides of any of them evaluate
    /// equal.
    ///
    /// # Errors
    /// Returns [`StatementError::Expression`] when a symbolic bound or an
    /// exception expression cannot be evaluated.
    ///
    /// # Example
    /// ```
    /// use snpli::interpreter::{binding_tree::BindingTree, range::parse_range};
    ///
    /// let spec = parse_range("1<=i<4, 1<=j<4, i<>j", 1).unwrap();
    /// let tree = BindingTree::expand(&spec, 1).unwrap();
    /// assert_eq!(tree.leaves().len(), 6);
    ///
    /// let first = tree.bindings(tree.leaves()[0]);
    /// assert_eq!((first.get("i"), first.get("j")), (Some(1), Some(2)));
    /// ```
    pub fn expand(spec: &RangeSpec, line: usize) -> Result<Self, StatementError> {
        let mut tree = Self::new();
        let last = spec.clauses.len().saturating_sub(1);

        for (depth, clause) in spec.clauses.iter().enumerate() {
            let exceptions = if depth == last { spec.exceptions.as_slice() } else { &[] };
            tree.grow(clause, exceptions, line)?;
            trace!(clause = %clause, leaves = tree.leaves.len(), "grew binding tree");
        }

        Ok(tree)
    }

    /// Adds one generation of children under every current leaf.
    fn grow(&mut self,
            clause: &RangeClause,
            exceptions: &[ExceptionClause],
            line: usize)
            -> Result<(), StatementError> {
        let frontier = std::mem::take(&mut self.leaves);

        for parent in frontier {
            let frame = self.bindings(parent);

            let mut lower = resolve_bound(&clause.lower, &frame, line)?;
            let mut upper = resolve_bound(&clause.upper, &frame, line)?;
            if !clause.lower_inclusive {
                lower = lower.saturating_add(1);
            }
            if clause.upper_inclusive {
                upper = upper.saturating_add(1);
            }

            for value in lower..upper {
                if !exceptions.is_empty() {
                    let candidate: ParameterFrame =
                        frame.iter()
                             .chain(iter::once((clause.variable.as_str(), value)))
                             .collect();
                    if is_excluded(exceptions, &candidate, line)? {
                        continue;
                    }
                }

                let child = self.nodes.len();
                self.nodes.push(Node { binding:  Some((clause.variable.clone(), value)),
                                       parent:   Some(parent),
                                       children: Vec::new(), });
                self.nodes[parent].children.push(child);
                self.leaves.push(child);
            }
        }

        Ok(())
    }

    /// Returns the full-depth nodes in enumeration order.
    #[must_use]
    pub fn leaves(&self) -> &[usize] {
        &self.leaves
    }

    /// Returns the node at `id`.
    ///
    /// # Panics
    /// Panics if `id` is not a node of this tree.
    #[must_use]
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// Total number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Walks from `id` up to, but excluding, the root.
    pub fn ancestors(&self, id: usize) -> impl Iterator<Item = &Node> {
        iter::successors(Some(id), |&current| self.nodes[current].parent)
            .map(|current| &self.nodes[current])
            .filter(|node| node.binding.is_some())
    }

    /// Returns the value of the nearest ancestor of `id` binding `name`.
    #[must_use]
    pub fn lookup(&self, id: usize, name: &str) -> Option<i64> {
        self.ancestors(id)
            .filter_map(|node| node.binding.as_ref())
            .find_map(|(bound, value)| (bound == name).then_some(*value))
    }

    /// Collects the bindings on the path from the root to `id`.
    #[must_use]
    pub fn bindings(&self, id: usize) -> ParameterFrame {
        let mut path: Vec<(String, i64)> = self.ancestors(id)
                                               .filter_map(|node| node.binding.clone())
                                               .collect();
        path.reverse();
        path.into_iter().collect()
    }
}

fn resolve_bound(bound: &Bound, frame: &ParameterFrame, line: usize) -> Result<i64, StatementError> {
    match bound {
        Bound::Literal(value) => Ok(*value),
        Bound::Symbolic(expr) => {
            evaluate_in(expr, frame).map_err(|e| StatementError::expression(expr, e, line))
        },
    }
}

fn is_excluded(exceptions: &[ExceptionClause],
               candidate: &ParameterFrame,
               line: usize)
               -> Result<bool, StatementError> {
    for exception in exceptions {
        let left = evaluate_in(&exception.left, candidate)
            .map_err(|e| StatementError::expression(&exception.left, e, line))?;
        let right = evaluate_in(&exception.right, candidate)
            .map_err(|e| StatementError::expression(&exception.right, e, line))?;
        if left == right {
            return Ok(true);
        }
    }
    Ok(false)
}
