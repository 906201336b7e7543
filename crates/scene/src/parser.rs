//! Parser for the GLIB scene-description format.
//!
//! GLIB is line-oriented and whitespace-tokenized:
//!
//! ```text
//! Vertex lighting            # records lighting.vert
//! Fragment lighting          # records lighting.frag
//! Program glow {
//!     intensity <0.0 0.5 1.0>
//! }
//! cube 2 2 2
//! sphere 1.5 32 16
//! ```
//!
//! Parsing is all-or-nothing: any structural error aborts the parse and no
//! partial [`SceneDocument`] escapes to the caller.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{ProgramDeclaration, SceneDocument, ShapeCommand, UniformVariable};

/// Result of parsing GLIB text.
pub type ParseResult = Result<SceneDocument, FormatError>;

/// Errors in the GLIB scene text, with 1-based line numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// `{` appeared as the first token of a line; only legal as the trailing
    /// token of a `Program` line
    MisplacedBrace { line: usize },
    /// `Program` line while a program scope is already open
    NestedProgramScope { line: usize },
    /// `}` with no open program scope
    UnmatchedClosingBrace { line: usize },
    /// Tokens after a closing `}`
    TrailingAfterBrace { line: usize },
    /// Uniform declaration that is not `name <min default max>`
    InvalidUniformBound { line: usize, reason: String },
    /// `Vertex` / `Fragment` / `Program` without its argument
    MissingDirectiveArgument { line: usize, directive: String },
    /// End of input while a program scope is still open
    UnclosedProgramScope { program: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MisplacedBrace { line } => {
                write!(f, "line {}: misplaced opening brace", line)
            }
            FormatError::NestedProgramScope { line } => {
                write!(f, "line {}: nested program scope", line)
            }
            FormatError::UnmatchedClosingBrace { line } => {
                write!(f, "line {}: closing brace with no open program scope", line)
            }
            FormatError::TrailingAfterBrace { line } => {
                write!(f, "line {}: unexpected tokens after closing brace", line)
            }
            FormatError::InvalidUniformBound { line, reason } => {
                write!(f, "line {}: invalid uniform bound: {}", line, reason)
            }
            FormatError::MissingDirectiveArgument { line, directive } => {
                write!(f, "line {}: {} directive is missing its argument", line, directive)
            }
            FormatError::UnclosedProgramScope { program } => {
                write!(f, "program '{}' is never closed", program)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors from loading a scene file from disk.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Format(FormatError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read scene file: {}", e),
            LoadError::Format(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Format(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<FormatError> for LoadError {
    fn from(e: FormatError) -> Self {
        LoadError::Format(e)
    }
}

/// Read and parse a GLIB scene file.
pub fn parse_scene_file<P: AsRef<Path>>(path: P) -> Result<SceneDocument, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let doc = parse_scene(&text)?;
    tracing::info!(
        "Loaded {} ({} programs, {} commands)",
        path.display(),
        doc.programs.len(),
        doc.commands.len()
    );
    Ok(doc)
}

/// Parse GLIB scene text into a [`SceneDocument`].
///
/// Lines are trimmed and split on whitespace; empty lines are discarded
/// before classification. Program scopes are exactly one level deep.
pub fn parse_scene(text: &str) -> ParseResult {
    let mut doc = SceneDocument::default();
    let mut in_program = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match tokens[0] {
            "Vertex" => {
                let base = directive_arg(&tokens, line, "Vertex")?;
                doc.shaders.vertex = Some(format!("{}.vert", base));
            }
            "Fragment" => {
                let base = directive_arg(&tokens, line, "Fragment")?;
                doc.shaders.fragment = Some(format!("{}.frag", base));
            }
            "Program" => {
                if in_program {
                    return Err(FormatError::NestedProgramScope { line });
                }
                let name = directive_arg(&tokens, line, "Program")?;
                doc.programs.push(ProgramDeclaration {
                    name: name.to_string(),
                    variables: Vec::new(),
                });
                if tokens.get(2) == Some(&"{") {
                    in_program = true;
                }
            }
            "}" => {
                if !in_program {
                    return Err(FormatError::UnmatchedClosingBrace { line });
                }
                if tokens.len() > 1 {
                    return Err(FormatError::TrailingAfterBrace { line });
                }
                in_program = false;
            }
            "{" => return Err(FormatError::MisplacedBrace { line }),
            _ if in_program => {
                let var = parse_uniform_declaration(&tokens, line)?;
                // `in_program` implies at least one pushed program
                if let Some(program) = doc.programs.last_mut() {
                    program.variables.push(var);
                }
            }
            _ => {
                doc.commands.push(ShapeCommand {
                    shape: tokens[0].to_string(),
                    args: tokens[1..].iter().map(|t| t.to_string()).collect(),
                });
            }
        }
    }

    if in_program {
        let program = doc
            .programs
            .last()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        return Err(FormatError::UnclosedProgramScope { program });
    }

    Ok(doc)
}

fn directive_arg<'a>(
    tokens: &[&'a str],
    line: usize,
    directive: &str,
) -> Result<&'a str, FormatError> {
    tokens
        .get(1)
        .copied()
        .ok_or_else(|| FormatError::MissingDirectiveArgument {
            line,
            directive: directive.to_string(),
        })
}

/// Parse a uniform declaration: exactly four tokens `name <min default max>`,
/// the `<` and `>` adjacent to the min/max numbers with no space.
fn parse_uniform_declaration(tokens: &[&str], line: usize) -> Result<UniformVariable, FormatError> {
    if tokens.len() != 4 {
        return Err(FormatError::InvalidUniformBound {
            line,
            reason: format!("expected `name <min default max>`, got {} tokens", tokens.len()),
        });
    }

    let min_body = tokens[1]
        .strip_prefix('<')
        .ok_or_else(|| FormatError::InvalidUniformBound {
            line,
            reason: format!("min bound '{}' does not start with '<'", tokens[1]),
        })?;
    let max_body = tokens[3]
        .strip_suffix('>')
        .ok_or_else(|| FormatError::InvalidUniformBound {
            line,
            reason: format!("max bound '{}' does not end with '>'", tokens[3]),
        })?;

    let parse_num = |text: &str| -> Result<f32, FormatError> {
        text.parse::<f32>()
            .map_err(|_| FormatError::InvalidUniformBound {
                line,
                reason: format!("'{}' is not a number", text),
            })
    };

    let min = parse_num(min_body)?;
    let max = parse_num(max_body)?;
    let value = parse_num(tokens[2])?;

    // `f32::parse` accepts NaN/inf spellings; a range needs finite ends.
    if !min.is_finite() || !max.is_finite() || !value.is_finite() {
        return Err(FormatError::InvalidUniformBound {
            line,
            reason: format!("bounds must be finite, got <{} {} {}>", min, value, max),
        });
    }
    if min > max {
        return Err(FormatError::InvalidUniformBound {
            line,
            reason: format!("min {} exceeds max {}", min, max),
        });
    }

    Ok(UniformVariable {
        name: tokens[0].to_string(),
        min,
        max,
        // an out-of-range default starts at the nearest bound
        value: value.clamp(min, max),
    })
}
