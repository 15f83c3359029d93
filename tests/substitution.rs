use snpli::{
    error::StatementError,
    interpreter::{frame::ParameterFrame, substitution::substitute},
};

fn frame() -> ParameterFrame {
    [("n", 3), ("m", 10)].into_iter().collect()
}

fn assert_substitution(src: &str, expected: &str) {
    match substitute(src, &frame(), 1) {
        Ok(text) => assert_eq!(text, expected, "Substituting '{src}'"),
        Err(e) => panic!("Substituting '{src}' failed: {e}"),
    }
}

#[test]
fn only_regions_are_substituted() {
    assert_substitution("x = n", "x = n");
    assert_substitution("σ{n}", "σ{3}");
    assert_substitution("n, s{n}, m", "n, s{3}, m");
    assert_substitution("s{i} : 1<=i<n", "s{i} : 1<=i<3");
    assert_substitution("(s{n}) = a*(n*m)", "(s{3}) = a*(3*10)");
}

#[test]
fn whole_identifiers_only() {
    assert_substitution("s{nm, n_1, mn}", "s{nm, n_1, mn}");
    assert_substitution("s{n+m-n/m}", "s{3+10-3/10}");
}

#[test]
fn unbound_identifiers_pass_through() {
    assert_substitution("s{i, j} : 1<=i<=n, i<j<=m, i<>j", "s{i, j} : 1<=i<=3, i<j<=10, i<>j");
}

#[test]
fn nested_parentheses_in_multiplicity() {
    assert_substitution("(s{1}) += a*((n+1)*(m-1)) + n",
                        "(s{1}) += a*((3+1)*(10-1)) + n");
}

#[test]
fn multiplicity_marker_needs_a_word_boundary() {
    assert_substitution("(ba*(n))", "(ba*(n))");
}

#[test]
fn idempotent_without_bound_names() {
    let src = "@mu = s{i}, t{2*i} : 1<=i<4";
    let once = substitute(src, &frame(), 1).unwrap();
    let twice = substitute(&once, &frame(), 1).unwrap();

    assert_eq!(once, src);
    assert_eq!(twice, once);
}

#[test]
fn unbalanced_regions() {
    assert_eq!(substitute("s{n", &frame(), 4),
               Err(StatementError::UnbalancedDelimiter { delimiter: '{',
                                                         line:      4, }));
    assert_eq!(substitute("s}n", &frame(), 5),
               Err(StatementError::UnbalancedDelimiter { delimiter: '}',
                                                         line:      5, }));
    assert_eq!(substitute("a*(n", &frame(), 6),
               Err(StatementError::UnbalancedDelimiter { delimiter: '(',
                                                         line:      6, }));
}
