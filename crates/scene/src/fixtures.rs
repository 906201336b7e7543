//! Factory functions for creating test data.
//!
//! Scene-text snippets and pre-built documents shared by the unit and
//! integration tests.

use crate::{ProgramDeclaration, SceneDocument, ShapeCommand, UniformVariable};

// ── Scene text ───────────────────────────────────────────────

/// One program with two bounded uniforms.
pub fn scene_text_two_uniform_program() -> String {
    "Program lighting {\n\
     ambient <0.0 0.2 1.0>\n\
     shininess <1.0 30.0 100.0>\n\
     }\n"
        .to_string()
}

/// Two programs, in addressing order `glow` then `ripple`.
pub fn scene_text_two_programs() -> String {
    "Program glow {\n\
     intensity <0.0 0.5 1.0>\n\
     }\n\
     Program ripple {\n\
     height <0.0 0.25 1.0>\n\
     speed <0.0 1.0 4.0>\n\
     }\n"
        .to_string()
}

/// Shaders, programs and commands together.
pub fn scene_text_full() -> String {
    "Vertex lighting\n\
     Fragment lighting\n\
     Program glow {\n\
     intensity <0.0 0.5 1.0>\n\
     }\n\
     cube 2 2 2\n\
     sphere 1.5 16 8\n"
        .to_string()
}

// ── Documents ────────────────────────────────────────────────

/// A bounded uniform with the given range and current value.
pub fn uniform(name: &str, min: f32, value: f32, max: f32) -> UniformVariable {
    UniformVariable {
        name: name.to_string(),
        min,
        max,
        value,
    }
}

/// Document with one `glow` program holding `intensity <0.0 0.5 1.0>`.
pub fn doc_single_program() -> SceneDocument {
    SceneDocument {
        programs: vec![ProgramDeclaration {
            name: "glow".to_string(),
            variables: vec![uniform("intensity", 0.0, 0.5, 1.0)],
        }],
        ..Default::default()
    }
}

/// Document with `glow` (index 0) and `ripple` (index 1).
pub fn doc_two_programs() -> SceneDocument {
    SceneDocument {
        programs: vec![
            ProgramDeclaration {
                name: "glow".to_string(),
                variables: vec![uniform("intensity", 0.0, 0.5, 1.0)],
            },
            ProgramDeclaration {
                name: "ripple".to_string(),
                variables: vec![
                    uniform("height", 0.0, 0.25, 1.0),
                    uniform("speed", 0.0, 1.0, 4.0),
                ],
            },
        ],
        ..Default::default()
    }
}

/// A shape command with string arguments.
pub fn command(shape: &str, args: &[&str]) -> ShapeCommand {
    ShapeCommand {
        shape: shape.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}
