//! Core of the glman viewer: the GLIB scene-description interpreter and the
//! procedural shape library it dispatches into.
//!
//! The GUI shell (window, sliders, file dialogs, GL calls) lives outside this
//! crate and talks to it through a handful of entry points:
//!
//! - [`parse_scene`] / [`parse_scene_file`] — GLIB text → [`SceneDocument`]
//! - [`execute_commands`] — replay the document's shape commands against a
//!   [`ShapeRegistry`], producing one mesh per command
//! - [`SceneDocument::update_uniform`] — slider-driven uniform mutation

pub mod fixtures;
pub mod parser;
pub mod registry;
pub mod shapes;
pub mod uniforms;
pub mod validation;

pub use parser::{parse_scene, parse_scene_file, FormatError, LoadError};
pub use registry::{execute_commands, DispatchError, DispatchPolicy, ShapeRegistry};
pub use shapes::MeshData;
pub use uniforms::LookupError;

use serde::{Deserialize, Serialize};

/// Root parse result: everything a GLIB file declares, in file order.
///
/// Immutable after parsing except for the uniform current values, which the
/// external UI mutates through [`SceneDocument::update_uniform`]. A reload
/// replaces the whole document; no partially parsed document is ever visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneDocument {
    /// Shader programs, in declaration order. External sliders address
    /// programs (and their variables) by position, so order is contractual.
    pub programs: Vec<ProgramDeclaration>,
    /// Shape commands, in file order. Execution order equals file order.
    pub commands: Vec<ShapeCommand>,
    /// Shader source paths from `Vertex` / `Fragment` directives, if any.
    #[serde(default, skip_serializing_if = "ShaderReference::is_empty")]
    pub shaders: ShaderReference,
}

/// A named group of tunable uniform variables for one shader program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDeclaration {
    pub name: String,
    /// Declaration order preserved; variables are reached positionally.
    pub variables: Vec<UniformVariable>,
}

/// A bounded floating-point shader parameter, declared as `name <min default max>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformVariable {
    pub name: String,
    pub min: f32,
    pub max: f32,
    /// Current value; starts at the declared default. Updates through
    /// [`SceneDocument::update_uniform`] keep `min <= value <= max`.
    pub value: f32,
}

/// One line of the scene file invoking a named geometry generator.
///
/// Arguments stay as raw tokens; the registry converts them to numbers when
/// the command is dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeCommand {
    pub shape: String,
    pub args: Vec<String>,
}

/// Shader source paths declared by `Vertex` / `Fragment` directives.
///
/// The GLIB file names a base path; the `.vert` / `.frag` extension is
/// appended at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShaderReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl ShaderReference {
    pub fn is_empty(&self) -> bool {
        self.vertex.is_none() && self.fragment.is_none()
    }
}

impl SceneDocument {
    /// Total number of uniform variables across all programs.
    pub fn uniform_count(&self) -> usize {
        self.programs.iter().map(|p| p.variables.len()).sum()
    }
}
