//! Headless inspector for GLIB scene files.
//!
//! Parses a scene, prints what it declares, executes the shape commands
//! against the built-in registry and reports per-mesh statistics. Useful for
//! checking a scene file without bringing up the viewer.

use std::process::ExitCode;

use glman_scene::{execute_commands, parse_scene_file, DispatchPolicy, ShapeRegistry};

struct Options {
    scene_path: String,
    /// Dump the parsed document as JSON instead of the summary
    json: bool,
    /// Abort on the first command that fails to dispatch
    strict: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glman=info,glman_scene=info".into()),
        )
        .init();

    let options = match parse_args() {
        Some(options) => options,
        None => {
            eprintln!("Usage: glman [--json] [--strict] <scene.glib>");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Option<Options> {
    let mut scene_path = None;
    let mut json = false;
    let mut strict = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--strict" => strict = true,
            _ if arg.starts_with('-') => return None,
            _ if scene_path.is_some() => return None,
            _ => scene_path = Some(arg),
        }
    }

    Some(Options {
        scene_path: scene_path?,
        json,
        strict,
    })
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_scene_file(&options.scene_path)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if let Some(vertex) = &doc.shaders.vertex {
        println!("Vertex shader:   {}", vertex);
    }
    if let Some(fragment) = &doc.shaders.fragment {
        println!("Fragment shader: {}", fragment);
    }

    println!(
        "{} programs, {} uniform variables",
        doc.programs.len(),
        doc.uniform_count()
    );
    for (index, program) in doc.programs.iter().enumerate() {
        println!("Program {} '{}':", index, program.name);
        for v in &program.variables {
            println!("    {} <{} {} {}>", v.name, v.min, v.value, v.max);
        }
    }

    let registry = ShapeRegistry::with_builtin_shapes();
    let policy = if options.strict {
        DispatchPolicy::Strict
    } else {
        DispatchPolicy::Skip
    };

    let meshes = execute_commands(&doc, &registry, policy)?;

    // Per-command breakdown. Commands the policy skipped produced no mesh,
    // so the mesh list is consumed only for commands that dispatch.
    let mut produced = meshes.iter();
    for command in &doc.commands {
        let args = command.args.join(" ");
        match registry.validate_command(command) {
            Ok(()) => {
                if let Some(mesh) = produced.next() {
                    println!(
                        "    {} {} -> {} vertices, {} triangles",
                        command.shape,
                        args,
                        mesh.vertex_count(),
                        mesh.triangle_count()
                    );
                }
            }
            Err(err) => println!("    {} {} -> skipped ({})", command.shape, args, err),
        }
    }

    println!(
        "{} of {} commands produced meshes (known shapes: {})",
        meshes.len(),
        doc.commands.len(),
        registry.shape_names().join(", ")
    );

    Ok(())
}
