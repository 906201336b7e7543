//! Static shape registry and command execution.
//!
//! The original viewer discovered generators by module introspection and
//! evaluated command text as code. Here the mapping is an explicit registry
//! built once at startup: each generator is registered under its command name
//! with a fixed argument arity, and dispatch is a plain table lookup.

use std::collections::HashMap;
use std::fmt;

use crate::shapes::{self, MeshData};
use crate::{SceneDocument, ShapeCommand};

/// A geometry generator invoked with its parsed numeric arguments.
///
/// The slice length is checked against the registered arity before the call.
pub type GeneratorFn = fn(&[f32]) -> MeshData;

/// Errors when dispatching one shape command.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Command names no registered generator
    UnknownShape { shape: String },
    /// Argument count disagrees with the generator's arity
    ArityMismatch {
        shape: String,
        expected: usize,
        got: usize,
    },
    /// Argument token is not a number
    InvalidArgument { shape: String, token: String },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownShape { shape } => {
                write!(f, "unknown shape '{}'", shape)
            }
            DispatchError::ArityMismatch {
                shape,
                expected,
                got,
            } => {
                write!(
                    f,
                    "shape '{}' takes {} arguments, got {}",
                    shape, expected, got
                )
            }
            DispatchError::InvalidArgument { shape, token } => {
                write!(f, "shape '{}': argument '{}' is not a number", shape, token)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// What to do with commands that fail to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Log and skip the command, keep executing. Matches the original
    /// viewer, which drew nothing for unknown commands.
    #[default]
    Skip,
    /// Abort execution on the first failing command.
    Strict,
}

struct ShapeEntry {
    arity: usize,
    generate: GeneratorFn,
}

/// Registry mapping shape-command names to typed generators.
pub struct ShapeRegistry {
    generators: HashMap<String, ShapeEntry>,
}

impl ShapeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// The registry of built-in generators: `cube` and `sphere`.
    pub fn with_builtin_shapes() -> Self {
        let mut registry = Self::new();
        registry.register("cube", 3, |args| shapes::cube(args[0], args[1], args[2]));
        registry.register("sphere", 3, |args| {
            shapes::sphere(args[0], args[1] as u32, args[2] as u32)
        });
        registry
    }

    /// Register a generator under a command name with a fixed arity.
    /// Re-registering a name replaces the previous entry.
    pub fn register(&mut self, name: &str, arity: usize, generate: GeneratorFn) {
        self.generators
            .insert(name.to_string(), ShapeEntry { arity, generate });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered shape names, sorted. Drives UI-side validity checks.
    pub fn shape_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check that a command would dispatch, without generating anything.
    pub fn validate_command(&self, command: &ShapeCommand) -> Result<(), DispatchError> {
        self.resolve(command).map(|_| ())
    }

    /// Dispatch one command: look up the generator, check arity, convert the
    /// argument tokens to numbers and invoke it.
    pub fn generate(&self, command: &ShapeCommand) -> Result<MeshData, DispatchError> {
        let (generate, args) = self.resolve(command)?;
        Ok(generate(&args))
    }

    fn resolve(&self, command: &ShapeCommand) -> Result<(GeneratorFn, Vec<f32>), DispatchError> {
        let entry =
            self.generators
                .get(&command.shape)
                .ok_or_else(|| DispatchError::UnknownShape {
                    shape: command.shape.clone(),
                })?;

        if command.args.len() != entry.arity {
            return Err(DispatchError::ArityMismatch {
                shape: command.shape.clone(),
                expected: entry.arity,
                got: command.args.len(),
            });
        }

        let mut args = Vec::with_capacity(entry.arity);
        for token in &command.args {
            let value = token
                .parse::<f32>()
                .map_err(|_| DispatchError::InvalidArgument {
                    shape: command.shape.clone(),
                    token: token.clone(),
                })?;
            args.push(value);
        }

        Ok((entry.generate, args))
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_builtin_shapes()
    }
}

/// Execute the document's shape commands in file order.
///
/// Under [`DispatchPolicy::Skip`] failing commands produce no mesh and are
/// logged; under [`DispatchPolicy::Strict`] the first failure aborts.
pub fn execute_commands(
    doc: &SceneDocument,
    registry: &ShapeRegistry,
    policy: DispatchPolicy,
) -> Result<Vec<MeshData>, DispatchError> {
    let mut meshes = Vec::with_capacity(doc.commands.len());

    for command in &doc.commands {
        match registry.generate(command) {
            Ok(mesh) => meshes.push(mesh),
            Err(err) => match policy {
                DispatchPolicy::Skip => {
                    tracing::debug!("skipping command '{}': {}", command.shape, err);
                }
                DispatchPolicy::Strict => return Err(err),
            },
        }
    }

    Ok(meshes)
}
