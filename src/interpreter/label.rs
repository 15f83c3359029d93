use crate::{
    error::ExprError,
    interpreter::{
        expression::{evaluate, evaluate_in},
        frame::ParameterFrame,
    },
    util::text::{find_matching, split_top_level},
};

/// A label index component that did not evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedIndex {
    pub component: String,
    pub error:     ExprError,
}

/// Evaluates every index component of `label` against `frame`.
///
/// Each `{ … }` group is split on commas and every component is replaced by
/// its integer value, so `s{i, j+1}` under `i = 2, j = 3` becomes `s{2,4}`.
/// Text outside braces is kept as is.
///
/// # Errors
/// Returns the first component that does not evaluate.
///
/// # Example
/// ```
/// use snpli::interpreter::{frame::ParameterFrame, label::resolve_indices};
///
/// let frame: ParameterFrame = [("i", 2), ("j", 3)].into_iter().collect();
/// assert_eq!(resolve_indices("s{i, j+1}", &frame).unwrap(), "s{2,4}");
/// assert!(resolve_indices("s{k}", &frame).is_err());
/// ```
pub fn resolve_indices(label: &str, frame: &ParameterFrame) -> Result<String, UnresolvedIndex> {
    map_indices(label, |component| {
        evaluate_in(component, frame).map(|value| value.to_string())
                                     .map_err(|error| UnresolvedIndex { component:
                                                                            component.to_string(),
                                                                        error })
    })
}

/// Evaluates the index components of `label` that are plain arithmetic.
///
/// Components that do not evaluate are kept verbatim, since labels are opaque
/// and may carry symbolic indices.
///
/// # Example
/// ```
/// use snpli::interpreter::label::normalize_indices;
///
/// assert_eq!(normalize_indices("s{1+1}"), "s{2}");
/// assert_eq!(normalize_indices("s{in, 2*3}"), "s{in,6}");
/// assert_eq!(normalize_indices("out"), "out");
/// ```
#[must_use]
pub fn normalize_indices(label: &str) -> String {
    let normalized: Result<String, UnresolvedIndex> = map_indices(label, |component| {
        Ok(evaluate(component).map_or_else(|_| component.to_string(), |value| value.to_string()))
    });
    normalized.unwrap_or_else(|_| label.to_string())
}

/// Returns `true` if `label` has at least one `{ … }` index group.
#[must_use]
pub fn has_indices(label: &str) -> bool {
    label.contains('{')
}

/// Rewrites every component of every brace group of `label` with `map`.
fn map_indices<F>(label: &str, mut map: F) -> Result<String, UnresolvedIndex>
    where F: FnMut(&str) -> Result<String, UnresolvedIndex>
{
    let mut out = String::with_capacity(label.len());
    let mut rest = label;

    while let Some(open) = rest.find('{') {
        let Some(close) = find_matching(rest, open) else {
            break;
        };
        out.push_str(&rest[..=open]);
        let components = split_top_level(&rest[open + 1..close], ',').into_iter()
                                                                      .map(&mut map)
                                                                      .collect::<Result<Vec<_>, _>>()?;
        out.push_str(&components.join(","));
        out.push('}');
        rest = &rest[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}
