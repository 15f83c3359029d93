use crate::{
    ast::{Section, Statement, StatementKind},
    error::StatementError,
    interpreter::substitution::{is_identifier, is_identifier_char},
    util::text::{find_matching, split_top_level},
};

/// Structural keyword that opens a module.
pub const DEF_KEYWORD: &str = "def";
/// Structural keyword that invokes a module.
pub const CALL_KEYWORD: &str = "call";

/// Classifies a statement.
///
/// Structural keywords are matched as whitespace-separated words; a `def`
/// header that reaches the interpreter is ignored. Section keywords are
/// matched as a whole `@word`, so `@ms` never matches the start of `@mseq`.
/// Everything else is [`StatementKind::Ignored`].
///
/// # Errors
/// Returns [`StatementError::MalformedCall`] for a `call` that does not name a
/// module, whose argument list is not closed or has an empty argument.
///
/// # Example
/// ```
/// use snpli::{
///     ast::{Section, Statement, StatementKind},
///     interpreter::statement::classify,
/// };
///
/// let call = classify(&Statement::new("call grid(n, 2*n)", 3)).unwrap();
/// assert_eq!(call,
///            StatementKind::Call { target:    "grid".into(),
///                                  arguments: vec!["n".into(), "2*n".into()], });
///
/// let section = classify(&Statement::new("@mseq = 1", 4)).unwrap();
/// assert!(matches!(section, StatementKind::Section { section: Section::Sequential, .. }));
/// ```
pub fn classify(statement: &Statement) -> Result<StatementKind, StatementError> {
    let text = statement.text.as_str();
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.contains(&DEF_KEYWORD) {
        return Ok(StatementKind::Ignored);
    }
    if words.contains(&CALL_KEYWORD) {
        return parse_call(text, statement.line);
    }

    Ok(find_section(text).map_or(StatementKind::Ignored, |(section, body)| {
                             StatementKind::Section { section,
                                                      body: body.to_string() }
                         }))
}

/// Finds the first `@word` that names a section and returns the text after it.
fn find_section(text: &str) -> Option<(Section, &str)> {
    text.match_indices('@').find_map(|(at, _)| {
                               let word_end = text[at + 1..].find(|c: char| !is_identifier_char(c))
                                                            .map_or(text.len(), |end| at + 1 + end);
                               Section::from_keyword(&text[at..word_end]).map(|section| {
                                                                             (section,
                                                                              &text[word_end..])
                                                                         })
                           })
}

/// Parses `call NAME(ARG, …)`.
fn parse_call(text: &str, line: usize) -> Result<StatementKind, StatementError> {
    let is_boundary = |c: Option<char>| c.is_none_or(char::is_whitespace);
    let start = text.match_indices(CALL_KEYWORD)
                    .map(|(start, _)| start)
                    .find(|&start| {
                        is_boundary(text[..start].chars().next_back())
                        && is_boundary(text[start + CALL_KEYWORD.len()..].chars().next())
                    })
                    .ok_or(StatementError::MalformedCall { line })?;
    let rest = text[start + CALL_KEYWORD.len()..].trim();

    let (target, arguments) = match rest.find('(') {
        Some(open) => {
            let close = find_matching(rest, open).ok_or(StatementError::MalformedCall { line })?;
            let list = rest[open + 1..close].trim();
            let arguments: Vec<String> = if list.is_empty() {
                Vec::new()
            } else {
                split_top_level(list, ',').into_iter().map(str::to_string).collect()
            };
            if arguments.iter().any(String::is_empty) {
                return Err(StatementError::MalformedCall { line });
            }
            (rest[..open].trim(), arguments)
        },
        None => (rest, Vec::new()),
    };

    if !is_identifier(target) {
        return Err(StatementError::MalformedCall { line });
    }

    Ok(StatementKind::Call { target: target.to_string(),
                             arguments })
}
