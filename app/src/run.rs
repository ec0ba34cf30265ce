//! The headless viewer run.

use std::io::{self, Write};

use miterline_core::mesh::MeshBuffers;
use miterline_graphics::shader::load_program;
use miterline_graphics::uniforms::UNIFORM_NAMES;
use miterline_graphics::{DummyBackend, GlslProgram, LineUniforms, MeshUploader, ShaderProgram};

use crate::args::Args;
use crate::error::AppError;
use crate::input::{InputAction, InputDispatcher};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Number of path points.
    pub point_count: usize,
    /// Indices the draw call uses.
    pub draw_index_count: u32,
    /// Bytes handed to the upload backend.
    pub uploaded_bytes: u64,
    /// Frame uniforms for `--time`.
    pub uniforms: LineUniforms,
    /// Actions produced by the replayed key presses.
    pub actions: Vec<InputAction>,
}

/// Build, link and upload everything for one path.
///
/// With `--dump` the generated buffers are written to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<RunReport, AppError> {
    miterline_core::init();
    miterline_graphics::init();

    let path = args.path()?;
    log::info!(
        "Path: {} points, {} segments",
        path.len(),
        path.segment_count()
    );

    let buffers = MeshBuffers::from_path(&path);

    let source = args.shader_source()?;
    if let Some((vertex, fragment)) = source.paths() {
        log::info!(
            "Loading shaders from {} and {}",
            vertex.display(),
            fragment.display()
        );
    }
    let mut program = GlslProgram::new();
    load_program(&mut program, &source, false)?;
    for name in UNIFORM_NAMES {
        match program.uniform_location(name) {
            Some(location) => log::info!(
                "Uniform {name}: group {}, binding {}, offset {}",
                location.group,
                location.binding,
                location.offset
            ),
            None => log::warn!("Uniform {name} not found in the linked program"),
        }
    }

    let backend = DummyBackend::new();
    let mesh = backend.upload(&buffers)?;
    log::info!(
        "{}: uploaded {} buffers ({} bytes), {} vertices, draw {} of {} indices",
        backend.name(),
        backend.uploads().len(),
        backend.uploaded_bytes(),
        mesh.vertex_count,
        mesh.draw_index_count,
        mesh.index_count
    );

    let uniforms = LineUniforms::for_frame(args.time, args.aspect, &args.style());
    log::info!(
        "Frame uniforms at t={}s: thickness {}, aspect {}, miter {}",
        args.time,
        uniforms.thickness,
        uniforms.aspect,
        uniforms.miter
    );
    log::debug!("{uniforms:?}");

    let mut actions = Vec::with_capacity(args.press.len());
    let mut dispatcher = InputDispatcher::new(&mut program, source);
    for &key in &args.press {
        let action = dispatcher.handle_key(key, true);
        dispatcher.handle_key(key, false);
        log::info!("Key {key:?}: {action:?}");
        let quit = action == InputAction::Quit;
        actions.push(action);
        if quit {
            break;
        }
    }

    if args.dump {
        dump_buffers(&buffers, out).map_err(|source| AppError::Io {
            path: "<stdout>".into(),
            source,
        })?;
    }

    Ok(RunReport {
        point_count: buffers.point_count(),
        draw_index_count: mesh.draw_index_count,
        uploaded_bytes: backend.uploaded_bytes(),
        uniforms,
        actions,
    })
}

/// Write every buffer of `buffers` as text.
pub fn dump_buffers(buffers: &MeshBuffers, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "points: {}  vertices: {}  indices: {}  drawn: {}",
        buffers.point_count(),
        buffers.vertex_count(),
        buffers.index_count(),
        buffers.draw_index_count()
    )?;
    write_vec3s(out, "positions", buffers.positions())?;
    writeln!(out, "directions: {:?}", buffers.directions())?;
    write_vec3s(out, "previous", buffers.previous())?;
    write_vec3s(out, "next", buffers.next())?;
    writeln!(out, "indices:")?;
    for quad in buffers.indices().chunks(6) {
        writeln!(out, "  {quad:?}")?;
    }
    Ok(())
}

fn write_vec3s(out: &mut impl Write, name: &str, values: &[f32]) -> io::Result<()> {
    writeln!(out, "{name}:")?;
    for v in values.chunks(3) {
        writeln!(out, "  {v:?}")?;
    }
    Ok(())
}
