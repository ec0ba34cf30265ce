//! GLSL shader program backed by naga.

use std::collections::HashMap;

use miterline_core::mesh::PolylineAttribute;

use super::{ShaderProgram, ShaderStage, UniformLocation};
use crate::error::GraphicsError;

/// A shader program compiled from GLSL 450 with naga's front-end.
///
/// Stages are parsed and validated when registered; linking checks that
/// the vertex stage consumes every polyline attribute location and merges
/// the uniform blocks of both stages into one name table.
#[derive(Debug, Default)]
pub struct GlslProgram {
    pending: HashMap<ShaderStage, naga::Module>,
    linked: Option<LinkedProgram>,
    link_count: u32,
}

#[derive(Debug)]
struct LinkedProgram {
    uniforms: HashMap<String, UniformLocation>,
}

impl GlslProgram {
    /// Create an empty, unlinked program.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a program has been linked successfully.
    pub fn link_count(&self) -> u32 {
        self.link_count
    }

    /// Names of all uniforms in the linked program, sorted.
    pub fn uniform_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .linked
            .iter()
            .flat_map(|linked| linked.uniforms.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names
    }

    fn pending_stage(&self, stage: ShaderStage) -> Result<&naga::Module, GraphicsError> {
        self.pending
            .get(&stage)
            .ok_or_else(|| GraphicsError::InvalidParameter(format!("no {stage} shader registered")))
    }
}

impl ShaderProgram for GlslProgram {
    fn register_shader(&mut self, stage: ShaderStage, source: &str) -> Result<(), GraphicsError> {
        let module = compile(stage, source)?;
        log::debug!(
            "Registered {stage} shader ({} functions, {} globals)",
            module.functions.len(),
            module.global_variables.len()
        );
        self.pending.insert(stage, module);
        Ok(())
    }

    fn register_program(
        &mut self,
        erase_if_program_registered: bool,
    ) -> Result<(), GraphicsError> {
        if self.linked.is_some() && !erase_if_program_registered {
            return Err(GraphicsError::ProgramAlreadyRegistered);
        }

        let vertex = self.pending_stage(ShaderStage::Vertex)?;
        let fragment = self.pending_stage(ShaderStage::Fragment)?;

        check_vertex_inputs(vertex)?;
        let mut uniforms = collect_uniforms(vertex);
        for (name, location) in collect_uniforms(fragment) {
            match uniforms.get(&name) {
                Some(existing) if *existing != location => {
                    return Err(GraphicsError::ShaderCompilationFailed(format!(
                        "uniform '{name}' differs between stages ({existing:?} vs {location:?})"
                    )));
                }
                Some(_) => {}
                None => {
                    uniforms.insert(name, location);
                }
            }
        }

        self.pending.clear();

        if self.linked.is_some() {
            log::info!("Replacing linked shader program");
        }
        log::debug!("Linked program with {} uniforms", uniforms.len());

        self.linked = Some(LinkedProgram { uniforms });
        self.link_count += 1;
        Ok(())
    }

    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.linked.as_ref()?.uniforms.get(name).copied()
    }

    fn is_linked(&self) -> bool {
        self.linked.is_some()
    }
}

// =============================================================================
// naga helpers
// =============================================================================

fn compile(stage: ShaderStage, source: &str) -> Result<naga::Module, GraphicsError> {
    let options = naga::front::glsl::Options::from(stage.to_naga());
    let mut frontend = naga::front::glsl::Frontend::default();
    let module = frontend.parse(&options, source).map_err(|errors| {
        GraphicsError::ShaderCompilationFailed(format!("{stage} GLSL parse error:\n{errors}"))
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).map_err(|e| {
        GraphicsError::ShaderCompilationFailed(format!("{stage} validation error: {e}"))
    })?;

    if !module
        .entry_points
        .iter()
        .any(|entry| entry.stage == stage.to_naga())
    {
        return Err(GraphicsError::ShaderCompilationFailed(format!(
            "no {stage} entry point"
        )));
    }

    Ok(module)
}

fn location_of(binding: Option<&naga::Binding>) -> Option<u32> {
    match binding {
        Some(naga::Binding::Location { location, .. }) => Some(*location),
        _ => None,
    }
}

/// Input locations consumed by the vertex entry point.
fn vertex_input_locations(module: &naga::Module) -> Vec<u32> {
    let mut locations = Vec::new();
    for entry in module
        .entry_points
        .iter()
        .filter(|entry| entry.stage == naga::ShaderStage::Vertex)
    {
        for argument in &entry.function.arguments {
            if argument.binding.is_some() {
                locations.extend(location_of(argument.binding.as_ref()));
            } else if let naga::TypeInner::Struct { members, .. } = &module.types[argument.ty].inner
            {
                locations.extend(
                    members
                        .iter()
                        .filter_map(|member| location_of(member.binding.as_ref())),
                );
            }
        }
    }
    locations
}

fn check_vertex_inputs(module: &naga::Module) -> Result<(), GraphicsError> {
    let locations = vertex_input_locations(module);
    for attribute in PolylineAttribute::ALL {
        if !locations.contains(&attribute.location()) {
            return Err(GraphicsError::ShaderCompilationFailed(format!(
                "vertex shader has no input at location {} ({})",
                attribute.location(),
                attribute.name()
            )));
        }
    }
    Ok(())
}

/// Map uniform names to locations.
///
/// Block members are addressed by member name; a bare uniform that is not
/// a block is addressed by its variable name at offset zero.
fn collect_uniforms(module: &naga::Module) -> HashMap<String, UniformLocation> {
    let mut uniforms = HashMap::new();

    for (_, variable) in module.global_variables.iter() {
        if variable.space != naga::AddressSpace::Uniform {
            continue;
        }
        let Some(binding) = &variable.binding else {
            continue;
        };

        match &module.types[variable.ty].inner {
            naga::TypeInner::Struct { members, .. } => {
                for member in members {
                    if let Some(name) = &member.name {
                        uniforms.insert(
                            name.clone(),
                            UniformLocation {
                                group: binding.group,
                                binding: binding.binding,
                                offset: member.offset,
                            },
                        );
                    }
                }
            }
            _ => {
                if let Some(name) = &variable.name {
                    uniforms.insert(
                        name.clone(),
                        UniformLocation {
                            group: binding.group,
                            binding: binding.binding,
                            offset: 0,
                        },
                    );
                }
            }
        }
    }

    uniforms
}
