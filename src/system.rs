use std::fmt;

use crate::ast::Section;

/// A neuron of the generated system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neuron {
    /// The neuron label, such as `σ{3}`.
    pub label:  String,
    /// The number of spikes the neuron initially holds.
    pub spikes: u64,
}

impl Neuron {
    /// Creates a neuron without spikes.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label:  label.into(),
               spikes: 0, }
    }
}

/// A directed synapse between two neuron labels.
///
/// Endpoints are not checked against the neuron list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synapse {
    pub from: String,
    pub to:   String,
}

/// The accumulated result of interpreting a program.
///
/// Only the element generators write to the system; the interpreter never
/// reads it back. Labels are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnpSystem {
    /// Neurons, in generation order.
    pub neurons:      Vec<Neuron>,
    /// Synapses, in generation order. Duplicates are kept.
    pub synapses:     Vec<Synapse>,
    /// Labels declared with `@min`.
    pub inputs:       Vec<String>,
    /// Labels declared with `@mout`.
    pub outputs:      Vec<String>,
    /// Value declared with `@masynch`.
    pub asynchronous: Option<i64>,
    /// Value declared with `@mseq`.
    pub sequential:   Option<i64>,
}

impl SnpSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first neuron carrying `label`.
    #[must_use]
    pub fn neuron(&self, label: &str) -> Option<&Neuron> {
        self.neurons.iter().find(|neuron| neuron.label == label)
    }

    /// Returns the neuron labels, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.neurons.iter().map(|neuron| neuron.label.as_str()).collect()
    }

    /// Sets the spike count of every neuron carrying `label`.
    ///
    /// Returns how many neurons matched; zero is not an error.
    pub fn set_spikes(&mut self, label: &str, spikes: u64) -> usize {
        let mut matched = 0;
        for neuron in self.neurons.iter_mut().filter(|neuron| neuron.label == label) {
            neuron.spikes = spikes;
            matched += 1;
        }
        matched
    }

    /// Adds to the spike count of every neuron carrying `label`.
    ///
    /// Returns how many neurons matched; zero is not an error.
    pub fn add_spikes(&mut self, label: &str, spikes: u64) -> usize {
        let mut matched = 0;
        for neuron in self.neurons.iter_mut().filter(|neuron| neuron.label == label) {
            neuron.spikes = neuron.spikes.saturating_add(spikes);
            matched += 1;
        }
        matched
    }

    pub fn add_synapse(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.synapses.push(Synapse { from: from.into(),
                                     to:   to.into(), });
    }
}

/// Writes `items` as a comma-separated list.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Synapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// Renders the system in the section syntax it was declared with.
///
/// Sections without content are omitted, and only neurons holding spikes get
/// an `@ms` line.
impl fmt::Display for SnpSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in Section::ALL {
            let keyword = section.keyword();
            match section {
                Section::Neurons if !self.neurons.is_empty() => {
                    write!(f, "{keyword} = ")?;
                    write_list(f, &self.labels())?;
                    writeln!(f, ";")?;
                },
                Section::Spikes => {
                    for neuron in self.neurons.iter().filter(|neuron| neuron.spikes > 0) {
                        writeln!(f, "{keyword}({}) = a*({});", neuron.label, neuron.spikes)?;
                    }
                },
                Section::Synapses if !self.synapses.is_empty() => {
                    write!(f, "{keyword} = ")?;
                    write_list(f, &self.synapses)?;
                    writeln!(f, ";")?;
                },
                Section::Inputs if !self.inputs.is_empty() => {
                    write!(f, "{keyword} = ")?;
                    write_list(f, &self.inputs)?;
                    writeln!(f, ";")?;
                },
                Section::Outputs if !self.outputs.is_empty() => {
                    write!(f, "{keyword} = ")?;
                    write_list(f, &self.outputs)?;
                    writeln!(f, ";")?;
                },
                Section::Asynchronous => {
                    if let Some(mode) = self.asynchronous {
                        writeln!(f, "{keyword} = {mode};")?;
                    }
                },
                Section::Sequential => {
                    if let Some(mode) = self.sequential {
                        writeln!(f, "{keyword} = {mode};")?;
                    }
                },
                _ => {},
            }
        }
        Ok(())
    }
}
