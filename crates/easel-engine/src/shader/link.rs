use std::collections::HashMap;

use super::reflect::{active_resources, entry_inputs, entry_outputs, Resource, UniformSlot};
use super::stage::StageModule;
use super::{CompiledProgram, ShaderError};

/// Accumulates every link problem so the caller sees them all at once.
#[derive(Debug, Default)]
struct LinkLog {
    lines: Vec<String>,
}

impl LinkLog {
    fn error(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn into_error(self) -> ShaderError {
        ShaderError::Link {
            log: self.lines.join("\n"),
        }
    }

    fn finish(self) -> Result<(), ShaderError> {
        if self.lines.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Links two compiled stages into a program.
///
/// Checks performed:
/// - each source provides an entry point for its stage
/// - the vertex stage writes a clip-space position
/// - every fragment input location is written by the vertex stage with the same type
/// - a binding used by both stages names the same resource of the same kind
pub(crate) fn link(vertex: StageModule, fragment: StageModule) -> Result<CompiledProgram, ShaderError> {
    let mut log = LinkLog::default();

    let vs_index = vertex.entry_index();
    let fs_index = fragment.entry_index();
    if vs_index.is_none() {
        log.error("vertex source has no vertex entry point");
    }
    if fs_index.is_none() {
        log.error("fragment source has no fragment entry point");
    }
    let (Some(vs_index), Some(fs_index)) = (vs_index, fs_index) else {
        return Err(log.into_error());
    };

    let vs_out = entry_outputs(&vertex, vs_index);
    let fs_in = entry_inputs(&fragment, fs_index);

    if !vs_out.writes_position {
        log.error(format!(
            "vertex entry point `{}` does not write @builtin(position)",
            vertex.module.entry_points[vs_index].name
        ));
    }

    for input in &fs_in.locations {
        match vs_out.at(input.location) {
            None => log.error(format!(
                "fragment input {} is not written by the vertex stage",
                input.describe()
            )),
            Some(output) if output.inner != input.inner => log.error(format!(
                "fragment input {} does not match vertex output {} in type",
                input.describe(),
                output.describe()
            )),
            Some(_) => {}
        }
    }

    let (vs_resources, vs_problems) = active_resources(&vertex, vs_index);
    let (fs_resources, fs_problems) = active_resources(&fragment, fs_index);
    for p in vs_problems.into_iter().chain(fs_problems) {
        log.error(p);
    }
    let uniforms = merge_resources(vs_resources, fs_resources, &mut log);

    let inputs = entry_inputs(&vertex, vs_index).locations;
    let attributes: HashMap<String, u32> = inputs
        .iter()
        .filter_map(|v| Some((v.name.clone()?, v.location)))
        .collect();
    let attribute_components: HashMap<String, u32> = inputs
        .iter()
        .filter_map(|v| Some((v.name.clone()?, v.components()?)))
        .collect();

    log.finish()?;

    let vertex_entry = vertex.module.entry_points[vs_index].name.clone();
    let fragment_entry = fragment.module.entry_points[fs_index].name.clone();

    log::debug!(
        "linked program `{vertex_entry}`/`{fragment_entry}`: {} attribute(s), {} uniform(s)",
        attributes.len(),
        uniforms.len()
    );

    Ok(CompiledProgram::new(
        vertex.module,
        fragment.module,
        vertex_entry,
        fragment_entry,
        attributes,
        attribute_components,
        uniforms,
    ))
}

fn merge_resources(
    vertex: Vec<Resource>,
    fragment: Vec<Resource>,
    log: &mut LinkLog,
) -> HashMap<String, UniformSlot> {
    let mut by_name: HashMap<String, UniformSlot> = HashMap::new();
    let mut by_slot: HashMap<(u32, u32), String> = HashMap::new();

    for res in vertex.into_iter().chain(fragment) {
        let key = res.slot.key();

        if let Some(existing) = by_slot.get(&key) {
            if *existing != res.name {
                log.error(format!(
                    "@group({}) @binding({}) is `{existing}` in one stage and `{}` in the other",
                    key.0, key.1, res.name
                ));
                continue;
            }
        }

        match by_name.get(&res.name) {
            Some(prev) if prev.key() != key => log.error(format!(
                "`{}` is bound at @group({}) @binding({}) and @group({}) @binding({})",
                res.name, prev.group, prev.binding, key.0, key.1
            )),
            Some(prev) if prev.kind != res.slot.kind => log.error(format!(
                "`{}` is declared as {:?} and {:?}",
                res.name, prev.kind, res.slot.kind
            )),
            Some(_) => {}
            None => {
                by_slot.insert(key, res.name.clone());
                by_name.insert(res.name, res.slot);
            }
        }
    }

    by_name
}
