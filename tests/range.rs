use snpli::{
    ast::Bound,
    error::StatementError,
    interpreter::{
        binding_tree::{BindingTree, ROOT},
        range::parse_range,
    },
};

/// Expands `src` and returns every leaf as its list of bound values.
fn assignments(src: &str) -> Vec<Vec<i64>> {
    let spec = parse_range(src, 1).unwrap_or_else(|e| panic!("Range '{src}' failed: {e}"));
    let tree = BindingTree::expand(&spec, 1).unwrap_or_else(|e| panic!("Range '{src}' failed: {e}"));

    tree.leaves()
        .iter()
        .map(|&leaf| tree.bindings(leaf).iter().map(|(_, value)| value).collect())
        .collect()
}

fn values(src: &str) -> Vec<i64> {
    assignments(src).into_iter().flatten().collect()
}

#[test]
fn literal_bounds() {
    assert_eq!(values("1<=i<5"), [1, 2, 3, 4]);
    assert_eq!(values("1<i<=5"), [2, 3, 4, 5]);
    assert_eq!(values("1<i<5"), [2, 3, 4]);
    assert_eq!(values("1=<i=<3"), [1, 2, 3]);
    assert_eq!(values(" 0 <= i < 2 "), [0, 1]);
}

#[test]
fn empty_intervals() {
    assert!(values("5<=i<5").is_empty());
    assert!(values("5<=i<1").is_empty());
}

#[test]
fn independent_clauses_multiply() {
    let leaves = assignments("1<=i<4, 1<=j<3");

    assert_eq!(leaves.len(), 6);
    assert_eq!(leaves,
               [vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2], vec![3, 1], vec![3, 2]]);
}

#[test]
fn dependent_bounds() {
    assert_eq!(assignments("1<=i<=3, i<j<=3"),
               [vec![1, 2], vec![1, 3], vec![2, 3]]);
    assert_eq!(assignments("1<=i<=2, 0<=j<2*i"),
               [vec![1, 0], vec![1, 1], vec![2, 0], vec![2, 1], vec![2, 2], vec![2, 3]]);
}

#[test]
fn exceptions_apply_to_innermost_clause() {
    let leaves = assignments("1<=i<4, 1<=j<4, i<>j");
    assert_eq!(leaves.len(), 6);
    assert!(leaves.iter().all(|leaf| leaf[0] != leaf[1]));

    assert_eq!(assignments("1<=i<4, 1<=j<3, j<>1, i+j<>4"),
               [vec![1, 2], vec![3, 2]]);
}

#[test]
fn tree_structure() {
    let spec = parse_range("1<=i<3, 1<=j<4", 1).unwrap();
    let tree = BindingTree::expand(&spec, 1).unwrap();

    assert_eq!(tree.len(), 1 + 2 + 6);
    assert_eq!(tree.node(ROOT).children.len(), 2);
    assert_eq!(tree.node(ROOT).binding, None);

    let leaf = tree.leaves()[4];
    assert_eq!(tree.lookup(leaf, "i"), Some(2));
    assert_eq!(tree.lookup(leaf, "j"), Some(2));
    assert_eq!(tree.lookup(leaf, "k"), None);
    assert_eq!(tree.ancestors(leaf).count(), 2);
}

#[test]
fn without_clauses_the_root_is_the_only_leaf() {
    let tree = BindingTree::expand(&parse_range("", 1).unwrap(), 1).unwrap();

    assert_eq!(tree.leaves(), [ROOT]);
    assert_eq!(tree.len(), 1);
}

#[test]
fn parsed_clauses() {
    let spec = parse_range("0<x<=n+1", 1).unwrap();
    let clause = &spec.clauses[0];

    assert_eq!(clause.variable, "x");
    assert_eq!(clause.lower, Bound::Literal(0));
    assert!(!clause.lower_inclusive);
    assert_eq!(clause.upper, Bound::Symbolic("n+1".into()));
    assert!(clause.upper_inclusive);
    assert_eq!(clause.to_string(), "0<x<=n+1");
}

#[test]
fn malformed_ranges() {
    assert!(matches!(parse_range("1 i 4", 2),
                     Err(StatementError::MissingRangeOperator { line: 2, .. })));
    assert!(matches!(parse_range("1<=i", 3),
                     Err(StatementError::MalformedRange { line: 3, .. })));
    assert!(matches!(parse_range("<=i<4", 3),
                     Err(StatementError::MalformedRange { .. })));
    assert!(matches!(parse_range("i<>j", 4),
                     Err(StatementError::ExceptionWithoutRange { line: 4 })));
    assert!(matches!(parse_range("1<=i<3, <>j", 5),
                     Err(StatementError::MalformedRange { .. })));
}

#[test]
fn variables_must_be_identifiers() {
    assert!(matches!(parse_range("1<=3<=2", 1),
                     Err(StatementError::MalformedRange { line: 1, .. })));
    assert!(matches!(parse_range("1<=2i<=2", 1),
                     Err(StatementError::MalformedRange { .. })));
    assert!(matches!(parse_range("1<=α<3", 1),
                     Err(StatementError::MalformedRange { .. })));
    assert_eq!(values("1<=_i<3"), [1, 2]);
    assert_eq!(values("1<=i2<3"), [1, 2]);
}

#[test]
fn unresolvable_bounds() {
    let spec = parse_range("1<=i<n", 7).unwrap();

    assert!(matches!(BindingTree::expand(&spec, 7),
                     Err(StatementError::Expression { line: 7, .. })));
}
