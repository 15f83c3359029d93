use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Module, Statement},
    diagnostics::Diagnostics,
    error::ParseError,
    interpreter::{statement::DEF_KEYWORD, substitution::is_identifier},
    util::text::{find_matching, split_top_level},
};

/// The header every program is expected to start with.
pub const MODEL_HEADER: &str = "@model<spiking_psystems>";
/// The module every run starts from.
pub const ENTRY_MODULE: &str = "main";

/// All modules of a program, keyed by name.
pub type ModuleTable = HashMap<String, Rc<Module>>;

/// Splits a program into its modules.
///
/// Comments are stripped first, keeping line numbers intact. A missing header
/// and text outside every module are reported to `diagnostics` as warnings.
///
/// # Errors
/// Returns a [`ParseError`] for a malformed `def` header, a module that is
/// never closed, a duplicate module name, a missing `main` or a `main` that
/// declares parameters.
///
/// # Example
/// ```
/// use snpli::{diagnostics::Diagnostics, interpreter::loader::load};
///
/// let source = "@model<spiking_psystems>
/// def grid(n) {
///     @mu += s{i} : 1<=i<=n;
/// }
/// def main() {
///     @mu = a, b; call grid(2);
/// }";
/// let mut diagnostics = Diagnostics::new();
/// let modules = load(source, &mut diagnostics).unwrap();
///
/// assert_eq!(modules["grid"].parameters, ["n"]);
/// assert_eq!(modules["main"].statements.len(), 2);
/// assert!(diagnostics.is_empty());
/// ```
pub fn load(source: &str, diagnostics: &mut Diagnostics) -> Result<ModuleTable, ParseError> {
    let text = strip_comments(source)?;
    let mut loader = Loader { modules: ModuleTable::new(),
                              open: None,
                              header_checked: false,
                              diagnostics };

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let mut rest = line;
        while !rest.trim().is_empty() {
            rest = if loader.open.is_some() {
                loader.body(rest, number)
            } else {
                loader.outside(rest, number)?
            };
        }
    }

    if let Some(open) = loader.open {
        return Err(ParseError::UnterminatedModule { name: open.module.name,
                                                    line: open.module.line, });
    }
    if !loader.modules.contains_key(ENTRY_MODULE) {
        return Err(ParseError::MissingMain);
    }
    Ok(loader.modules)
}

/// Replaces `// …` and `/* … */` comments with nothing, keeping their line
/// breaks.
///
/// # Errors
/// Returns [`ParseError::UnterminatedComment`] for a `/*` without `*/`.
///
/// # Example
/// ```
/// use snpli::interpreter::loader::strip_comments;
///
/// let text = strip_comments("@mu a; // neurons\n/* multi\nline */@ms(a) = a*(1)").unwrap();
/// assert_eq!(text, "@mu a; \n\n@ms(a) = a*(1)");
/// ```
pub fn strip_comments(source: &str) -> Result<String, ParseError> {
    let mut text = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('/', Some('/')) => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            },
            ('/', Some('*')) => {
                let start = line;
                chars.next();
                let mut previous = '\0';
                loop {
                    match chars.next() {
                        Some('/') if previous == '*' => break,
                        Some(next) => {
                            if next == '\n' {
                                line += 1;
                                text.push('\n');
                            }
                            previous = next;
                        },
                        None => return Err(ParseError::UnterminatedComment { line: start }),
                    }
                }
            },
            _ => {
                if c == '\n' {
                    line += 1;
                }
                text.push(c);
            },
        }
    }

    Ok(text)
}

struct OpenModule {
    module: Module,
    depth:  usize,
}

struct Loader<'d> {
    modules:        ModuleTable,
    open:           Option<OpenModule>,
    header_checked: bool,
    diagnostics:    &'d mut Diagnostics,
}

impl Loader<'_> {
    /// Consumes body text of the open module up to its closing `}`.
    fn body<'t>(&mut self, text: &'t str, line: usize) -> &'t str {
        let Some(open) = self.open.as_mut() else {
            return "";
        };

        let mut end = None;
        for (index, c) in text.char_indices() {
            match c {
                '{' => open.depth += 1,
                '}' => {
                    open.depth -= 1;
                    if open.depth == 0 {
                        end = Some(index);
                        break;
                    }
                },
                _ => {},
            }
        }

        let body = end.map_or(text, |index| &text[..index]);
        open.module.statements.extend(body.split(';')
                                          .map(str::trim)
                                          .filter(|statement| !statement.is_empty())
                                          .map(|statement| Statement::new(statement, line)));

        match end {
            Some(index) => {
                if let Some(open) = self.open.take() {
                    debug!(module = %open.module.name,
                           statements = open.module.statements.len(),
                           "loaded module");
                    self.modules.insert(open.module.name.clone(), Rc::new(open.module));
                }
                &text[index + 1..]
            },
            None => "",
        }
    }

    /// Handles text between modules: the header, a `def` or stray text.
    fn outside<'t>(&mut self, text: &'t str, line: usize) -> Result<&'t str, ParseError> {
        let trimmed = text.trim();

        if !self.header_checked {
            self.header_checked = true;
            if trimmed.starts_with("@model") {
                let header: String = trimmed.split_whitespace().collect();
                if header.trim_end_matches(';') != MODEL_HEADER {
                    self.diagnostics.warn(format!("expected the model header '{MODEL_HEADER}'"),
                                          Some(line),
                                          Some(trimmed));
                }
                return Ok("");
            }
            self.diagnostics.warn(format!("program does not start with '{MODEL_HEADER}'"),
                                  Some(line),
                                  None);
        }

        if let Some(rest) = trimmed.strip_prefix(DEF_KEYWORD)
           && rest.starts_with(char::is_whitespace)
        {
            return self.open_module(rest, line);
        }

        self.diagnostics.warn("text outside of a module is ignored", Some(line), Some(trimmed));
        Ok("")
    }

    /// Parses `NAME(p1, p2, …) {` and opens the module.
    fn open_module<'t>(&mut self, header: &'t str, line: usize) -> Result<&'t str, ParseError> {
        let invalid = ParseError::InvalidModuleDefinition { line };
        let open = header.find('(').ok_or_else(|| invalid.clone())?;
        let close = find_matching(header, open).ok_or_else(|| invalid.clone())?;

        let name = header[..open].trim();
        if !is_identifier(name) {
            return Err(invalid);
        }
        let list = header[open + 1..close].trim();
        let parameters: Vec<String> = if list.is_empty() {
            Vec::new()
        } else {
            split_top_level(list, ',').into_iter().map(str::to_string).collect()
        };
        if parameters.iter()
                     .any(|parameter| !is_identifier(parameter))
        {
            return Err(invalid);
        }
        let Some(body) = header[close + 1..].trim_start().strip_prefix('{') else {
            return Err(invalid);
        };

        if name == ENTRY_MODULE && !parameters.is_empty() {
            return Err(ParseError::MainWithParameters { line });
        }
        if self.modules.contains_key(name) {
            return Err(ParseError::DuplicateModule { name: name.to_string(),
                                                     line });
        }

        self.open = Some(OpenModule { module: Module { name: name.to_string(),
                                                       parameters,
                                                       statements: Vec::new(),
                                                       line },
                                      depth:  1, });
        Ok(body)
    }
}
