use std::fs;

use snpli::interpret;
use walkdir::WalkDir;

#[test]
fn demo_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "snp"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        match interpret(&source) {
            Ok(result) => {
                assert!(result.diagnostics.is_empty(),
                        "Demo {:?} reported diagnostics: {:?}",
                        path,
                        result.diagnostics.into_vec());
                assert!(!result.system.neurons.is_empty(), "Demo {path:?} generated no neurons");
            },
            Err(e) => panic!("Demo {path:?} failed:\n{source}\nError: {e:?}"),
        }
    }

    assert!(count > 0, "No demo programs found in demos");
}

#[test]
fn chain_demo() {
    let source = fs::read_to_string("demos/chain.snp").unwrap();
    let result = interpret(&source).unwrap();

    assert_eq!(result.system.labels(), ["in", "c{1}", "c{2}", "c{3}", "c{4}"]);
    assert_eq!(result.system.neuron("c{1}").map(|n| n.spikes), Some(4));
    assert_eq!(result.system.synapses.len(), 4);
    assert_eq!(result.system.inputs, ["in"]);
    assert_eq!(result.system.outputs, ["c{4}"]);
}

#[test]
fn complete_demo() {
    let source = fs::read_to_string("demos/complete.snp").unwrap();
    let result = interpret(&source).unwrap();

    let spikes: Vec<u64> = result.system.neurons.iter().map(|n| n.spikes).collect();
    assert_eq!(spikes, [1, 5, 9]);
    assert_eq!(result.system.synapses.len(), 6);
    assert_eq!(result.system.asynchronous, Some(0));
    assert_eq!(result.system.sequential, Some(1));
}

#[test]
fn triangle_demo() {
    let source = fs::read_to_string("demos/triangle.snp").unwrap();
    let result = interpret(&source).unwrap();

    assert_eq!(result.system.labels(),
               ["start", "t{1,2}", "t{1,3}", "t{2,3}", "out{1}", "t{1,2}", "out{2}"]);
    assert_eq!(result.system.synapses.len(), 2);
    assert_eq!(result.system.synapses[1].from, "t{1,2}");
}
