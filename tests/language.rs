use snpli::{Interpretation, diagnostics::Severity, interpret};

/// Wraps `body` into a program with a header and a `main` module.
///
/// The first body line is source line 3.
fn program(body: &str) -> String {
    format!("@model<spiking_psystems>\ndef main() {{\n{body}\n}}\n")
}

fn run(src: &str) -> Interpretation {
    interpret(src).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn assert_success(src: &str) {
    let result = run(src);
    assert!(result.diagnostics.is_empty(),
            "Script reported diagnostics: {:?}",
            result.diagnostics.into_vec());
}

fn assert_failure(src: &str) {
    if interpret(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn spikes(result: &Interpretation) -> Vec<(&str, u64)> {
    result.system
          .neurons
          .iter()
          .map(|neuron| (neuron.label.as_str(), neuron.spikes))
          .collect()
}

fn synapses(result: &Interpretation) -> Vec<(&str, &str)> {
    result.system
          .synapses
          .iter()
          .map(|synapse| (synapse.from.as_str(), synapse.to.as_str()))
          .collect()
}

#[test]
fn neurons_and_spikes_from_ranges() {
    let result = run(&program("@mu σ{i} : 1<=i<4;\n@ms setSpike(σ{i}) = a*(2*i) : 1<=i<4;"));

    assert_eq!(spikes(&result), [("σ{1}", 2), ("σ{2}", 4), ("σ{3}", 6)]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn range_bounds_and_inclusivity() {
    let result = run(&program("@mu = s{i} : 1<i<=5"));
    assert_eq!(result.system.labels(), ["s{2}", "s{3}", "s{4}", "s{5}"]);

    let result = run(&program("@mu = s{i} : 1=<i<3"));
    assert_eq!(result.system.labels(), ["s{1}", "s{2}"]);

    let result = run(&program("@mu = s{i} : -2<=i<0"));
    assert_eq!(result.system.labels(), ["s{-2}", "s{-1}"]);
}

#[test]
fn first_clause_is_outermost() {
    let result = run(&program("@mu = p{i, j} : 1<=i<3, 1<=j<3"));

    assert_eq!(result.system.labels(), ["p{1,1}", "p{1,2}", "p{2,1}", "p{2,2}"]);
}

#[test]
fn symbolic_bounds_use_enclosing_bindings() {
    let result = run(&program("@mu = p{i, j} : 1<=i<=3, i<j<=3"));

    assert_eq!(result.system.labels(), ["p{1,2}", "p{1,3}", "p{2,3}"]);
}

#[test]
fn exceptions_remove_equal_pairs() {
    let result = run(&program("@mu = p{i, j} : 1<=i<4, 1<=j<4, i<>j"));

    assert_eq!(result.system.neurons.len(), 6);
    assert!(!result.system.labels().contains(&"p{2,2}"));
    assert!(result.system.labels().contains(&"p{3,1}"));
}

#[test]
fn empty_interval_generates_nothing() {
    let result = run(&program("@mu = a, b;\n@mu = s{i} : 5<=i<1"));

    assert!(result.system.neurons.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn replace_and_append_neurons() {
    let result = run(&program("@mu = a, b;\n@mu += c;\n@mu += s{i} : 1<=i<=2"));
    assert_eq!(result.system.labels(), ["a", "b", "c", "s{1}", "s{2}"]);

    let result = run(&program("@mu = a, b;\n@mu = c"));
    assert_eq!(result.system.labels(), ["c"]);
}

#[test]
fn plain_and_indexed_entries_in_one_template() {
    let result = run(&program("@mu = in, s{i}, t{2*i} : 1<=i<=2"));

    assert_eq!(result.system.labels(), ["in", "s{1}", "t{2}", "s{2}", "t{4}"]);
}

#[test]
fn entries_on_different_variables_follow_template_order() {
    let result = run(&program("@mu = a{i}, b{j} : 1<=i<3, 1<=j<3"));

    assert_eq!(result.system.labels(),
               ["a{1}", "b{1}", "a{1}", "b{2}", "a{2}", "b{1}", "a{2}", "b{2}"]);
}

#[test]
fn quantifier_shadowed_by_parameter_is_reported() {
    let src = "@model<spiking_psystems>
def f(i) {
    @mu += s{i} : 1<=i<=2;
}
def main() {
    @mu = a;
    call f(5);
}";
    let result = run(src);

    assert_eq!(result.system.labels(), ["a"]);
    let lines: Vec<Option<usize>> = result.diagnostics
                                          .with_severity(Severity::Error)
                                          .map(|diagnostic| diagnostic.line)
                                          .collect();
    assert_eq!(lines, [Some(3)]);

    let result = run(&program("@mu = s{3} : 1<=3<=2"));
    assert!(result.system.neurons.is_empty());
    assert!(result.diagnostics.has_errors());
}

#[test]
fn non_ascii_quantifiers_are_malformed_ranges() {
    let result = run(&program("@mu = s{α} : 1<=α<3;\n@mu += σ{i} : 1<=i<2"));

    assert_eq!(result.system.labels(), ["σ{1}"]);
    let messages: Vec<&str> = result.diagnostics
                                    .with_severity(Severity::Error)
                                    .map(|diagnostic| diagnostic.message.as_str())
                                    .collect();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Range '1<=α<3'"), "{}", messages[0]);
}

#[test]
fn replace_and_append_spikes() {
    let result = run(&program("@mu = a, b;\n@ms(a) = a*(3);\n@ms(a) += a*(2);\n@ms(b) += a*(1);\n@ms(b) = a*(5)"));

    assert_eq!(spikes(&result), [("a", 5), ("b", 5)]);
}

#[test]
fn spikes_on_unknown_labels_do_nothing() {
    assert_success(&program("@mu = a;\n@ms(ghost) = a*(3)"));

    let result = run(&program("@mu = a;\n@ms(ghost) = a*(3)"));
    assert_eq!(spikes(&result), [("a", 0)]);
}

#[test]
fn spikes_apply_to_every_neuron_with_the_label() {
    let result = run(&program("@mu = a, a;\n@ms(a) = a*(2)"));

    assert_eq!(spikes(&result), [("a", 2), ("a", 2)]);
}

#[test]
fn spike_labels_are_normalized() {
    let result = run(&program("@mu = s{i} : 1<=i<=2;\n@ms(s{1+1}) = a*(7)"));

    assert_eq!(spikes(&result), [("s{1}", 0), ("s{2}", 7)]);
}

#[test]
fn synapses_from_pairs_and_ranges() {
    let result = run(&program("@mu = s{i} : 1<=i<=3;\n@marcs = (s{i}, s{i+1}) : 1<=i<3;\n@marcs += ( s{3} ,s{1} ), (s{1}, s{3})"));

    assert_eq!(synapses(&result),
               [("s{1}", "s{2}"), ("s{2}", "s{3}"), ("s{3}", "s{1}"), ("s{1}", "s{3}")]);
}

#[test]
fn synapses_are_not_deduplicated() {
    let result = run(&program("@marcs = (a, b);\n@marcs = (a, b)"));

    assert_eq!(synapses(&result), [("a", "b"), ("a", "b")]);
}

#[test]
fn module_parameters_are_substituted() {
    let src = "@model<spiking_psystems>
def ring(n, k) {
    @mu += r{k, i} : 1<=i<=n;
    @ms(r{k, i}) = a*(n - i) : 1<=i<=n;
}
def main() {
    call ring(2, 7);
    call ring(1, 8);
}";
    let result = run(src);

    assert_eq!(spikes(&result), [("r{7,1}", 1), ("r{7,2}", 0), ("r{8,1}", 0)]);
}

#[test]
fn call_arguments_are_expressions() {
    let src = "@model<spiking_psystems>
def leaf(m) {
    @mu += x{m};
}
def branch(n) {
    call leaf(n + 1);
    call leaf(n * n);
}
def main() {
    call branch(3);
}";
    let result = run(src);

    assert_eq!(result.system.labels(), ["x{4}", "x{9}"]);
}

#[test]
fn callee_does_not_see_caller_bindings() {
    let src = "@model<spiking_psystems>
def inner() {
    @mu += x{n};
}
def outer(n) {
    call inner();
}
def main() {
    @mu = a;
    call outer(2);
}";
    let result = run(src);

    assert_eq!(result.system.labels(), ["a"]);
    assert!(result.diagnostics.has_errors());
}

#[test]
fn parameter_outside_regions_is_kept() {
    let src = "@model<spiking_psystems>
def f(n) {
    @mu += n, s{n};
}
def main() {
    call f(5);
}";
    let result = run(src);

    assert_eq!(result.system.labels(), ["n", "s{5}"]);
}

#[test]
fn empty_call_arguments_skip_the_call() {
    let src = "@model<spiking_psystems>
def f(a, b) {
    @mu += x{a}, y{b};
}
def g() {
    @mu += z;
}
def main() {
    call f(1,,2);
    call f(1, 2,);
    call g( );
}";
    let result = run(src);

    assert_eq!(result.system.labels(), ["z"]);
    assert_eq!(result.diagnostics.with_severity(Severity::Error).count(), 2);
}

#[test]
fn spike_helpers_count_matches() {
    let mut system = run(&program("@mu = a, b, a")).system;

    assert_eq!(system.set_spikes("a", 2), 2);
    assert_eq!(system.add_spikes("a", 3), 2);
    assert_eq!(system.add_spikes("c", 1), 0);
    assert_eq!(system.neuron("a").map(|neuron| neuron.spikes), Some(5));
    assert_eq!(system.neuron("b").map(|neuron| neuron.spikes), Some(0));
}

#[test]
fn fatal_invocation_errors() {
    assert_failure(&program("call missing()"));
    assert_failure("@model<spiking_psystems>\ndef f(a, b) {\n}\ndef main() {\ncall f(1);\n}");
    assert_failure("@model<spiking_psystems>\ndef f() {\n}\ndef main() {\ncall f(1);\n}");
}

#[test]
fn fatal_loader_errors() {
    assert_failure("@model<spiking_psystems>\ndef helper() {\n}");
    assert_failure("@model<spiking_psystems>\ndef main(n) {\n}");
    assert_failure("@model<spiking_psystems>\ndef main() {\n}\ndef main() {\n}");
    assert_failure("@model<spiking_psystems>\ndef main() {\n@mu = a;");
    assert_failure("@model<spiking_psystems>\ndef main {\n}");
    assert_failure("@model<spiking_psystems>\n/* open\ndef main() {\n}");
    assert_failure("@model<spiking_psystems>\ndef f(a,,b) {\n}\ndef main() {\n}");
    assert_failure("@model<spiking_psystems>\ndef f(1) {\n}\ndef main() {\n}");
}

#[test]
fn malformed_statements_are_skipped() {
    let result = run(&program("@mu = s{i} : 1 i 4;\n@mu = a;\n@ms(a) = a*(2 +);\n@marcs = (a);\n@mu += s{i}"));

    assert_eq!(result.system.labels(), ["a"]);
    assert_eq!(spikes(&result), [("a", 0)]);
    assert!(result.system.synapses.is_empty());

    let lines: Vec<Option<usize>> = result.diagnostics
                                          .with_severity(Severity::Error)
                                          .map(|diagnostic| diagnostic.line)
                                          .collect();
    assert_eq!(lines, [Some(3), Some(5), Some(6), Some(7)]);
}

#[test]
fn failing_leaf_leaves_statement_without_effect() {
    let result = run(&program("@mu = s{i} : 1<=i<=3;\n@ms(s{i}) = a*(6 / (2 - i)) : 1<=i<=3"));

    assert!(result.system.neurons.iter().all(|neuron| neuron.spikes == 0));
    assert!(result.diagnostics.has_errors());
}

#[test]
fn negative_spike_counts_are_rejected() {
    let result = run(&program("@mu = a;\n@ms(a) = a*(1 - 3)"));

    assert_eq!(spikes(&result), [("a", 0)]);
    assert!(result.diagnostics.has_errors());
}

#[test]
fn unbound_qualifier_is_reported_once() {
    let result = run(&program("@mu = s{i}, t{k} : 1<=i<=3"));

    assert_eq!(result.system.labels(), ["s{1}", "s{2}", "s{3}"]);
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn ports_and_modes() {
    let result = run(&program("@mu = in, s{i} : 1<=i<=2;\n@min = in;\n@mout = s{i} : 1<=i<=2;\n@mout += extra;\n@masynch = 0;\n@mseq = 1 + 1"));

    assert_eq!(result.system.inputs, ["in"]);
    assert_eq!(result.system.outputs, ["s{1}", "s{2}", "extra"]);
    assert_eq!(result.system.asynchronous, Some(0));
    assert_eq!(result.system.sequential, Some(2));
}

#[test]
fn mode_values_use_parameters() {
    let src = "@model<spiking_psystems>
def configure(n) {
    @masynch = n;
}
def main() {
    call configure(3);
}";
    let result = run(src);

    assert_eq!(result.system.asynchronous, Some(3));
}

#[test]
fn comments_and_layout() {
    let src = "@model<spiking_psystems>
// a comment with @mu = ghost;
def main()
{
}";
    assert_failure(src);

    let src = "@model<spiking_psystems>
// a comment with @mu = ghost;
def main() { @mu = a; /* @mu += ghost; */ @mu += b;
    @ms(b) = a*(1); // trailing
}";
    let result = run(src);
    assert_eq!(spikes(&result), [("a", 0), ("b", 1)]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn unrecognized_statements_are_ignored() {
    assert_success(&program("@mu = a;\n@rules [a]/a -> a;\nsomething else;\n;;"));
}

#[test]
fn header_problems_are_warnings() {
    let result = run("def main() {\n@mu = a;\n}");
    assert_eq!(result.system.labels(), ["a"]);
    assert_eq!(result.diagnostics.with_severity(Severity::Warning).count(), 1);
    assert!(!result.diagnostics.has_errors());

    let result = run("@model<other>\ndef main() {\n}\nstray text");
    assert_eq!(result.diagnostics.with_severity(Severity::Warning).count(), 2);
}

#[test]
fn exported_model() {
    let result = run(&program("@mu = a, s{i} : 1<=i<=2;\n@ms(s{2}) = a*(3);\n@marcs = (a, s{1}), (s{1}, s{2});\n@mout = s{2}"));

    assert_eq!(result.system.to_string(),
               "@mu = a, s{1}, s{2};\n@ms(s{2}) = a*(3);\n@marcs = (a, s{1}), (s{1}, s{2});\n@mout = s{2};\n");
}
