/// An ordered mapping from names to bound integer values.
///
/// A frame is built once, either when a module is invoked (parameter names
/// zipped with call arguments) or from the ancestor chain of a binding tree
/// node, and is never mutated afterwards. Lookups prefer the most recently
/// bound name, so a quantifier bound deeper in a tree shadows a shallower one
/// with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterFrame {
    bindings: Vec<(String, i64)>,
}

impl ParameterFrame {
    /// Creates an empty frame.
    #[must_use]
    pub const fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Zips declared parameter names with argument values.
    ///
    /// Returns `None` when the counts differ; the caller turns that into an
    /// arity error because only it knows which module and line are involved.
    ///
    /// # Example
    /// ```
    /// use snpli::interpreter::frame::ParameterFrame;
    ///
    /// let names = vec!["n".to_string(), "m".to_string()];
    /// let frame = ParameterFrame::bind(&names, &[3, 4]).unwrap();
    /// assert_eq!(frame.get("m"), Some(4));
    /// assert!(ParameterFrame::bind(&names, &[3]).is_none());
    /// ```
    #[must_use]
    pub fn bind(names: &[String], values: &[i64]) -> Option<Self> {
        if names.len() != values.len() {
            return None;
        }
        Some(names.iter().cloned().zip(values.iter().copied()).collect())
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.bindings
            .iter()
            .rev()
            .find_map(|(bound, value)| (bound == name).then_some(*value))
    }

    /// Iterates the bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), *value))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(String, i64)> for ParameterFrame {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        Self { bindings: iter.into_iter().collect() }
    }
}

impl<'a> FromIterator<(&'a str, i64)> for ParameterFrame {
    fn from_iter<T: IntoIterator<Item = (&'a str, i64)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}
