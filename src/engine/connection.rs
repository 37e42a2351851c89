//! Connection management.
//!
//! Keeps the patch graph and the signal backend in step: a cable exists in
//! the patch exactly when its edge exists in the backend. Linking happens in
//! the backend first, and nothing is recorded unless it succeeds.

use tracing::{info, warn};

use super::SignalBackend;
use crate::error::PatchError;
use crate::geometry::{self, CurveStyle, RenderSurface};
use crate::graph::{validate_connection, Cable, ModuleId};
use crate::rack::Rack;

/// Connects the source's output to the destination's input.
///
/// Validates the pair, links it in the backend, then records the cable and
/// creates its curve. If the backend refuses, the patch is left untouched and
/// `LinkRejected` is returned. Under the `Replace` input policy the cables
/// already plugged into the input are removed after the new link succeeds.
pub fn connect<S: RenderSurface, B: SignalBackend>(
    rack: &mut Rack<S, B>,
    from: ModuleId,
    to: ModuleId,
) -> Result<Cable, PatchError> {
    let plan = validate_connection(&rack.graph, from, to, rack.config.input_policy)?;

    rack.backend
        .connect(plan.output, plan.input)
        .map_err(|err| PatchError::LinkRejected(err.to_string()))?;

    if plan.replaces_existing {
        let replaced = disconnect_all_into(rack, to, plan.ends.to_port);
        info!("replaced {} cable(s) into {}", replaced.len(), to);
    }

    let curve = rack.surface.create_curve(CurveStyle::Cable);
    let cable = Cable {
        ends: plan.ends,
        curve,
    };
    rack.graph.add_cable(cable.clone());

    let style = rack.droop_style();
    let start = geometry::anchor_of(&rack.surface, &rack.graph, from, plan.ends.from_port);
    let end = geometry::anchor_of(&rack.surface, &rack.graph, to, plan.ends.to_port);
    if let (Ok(start), Ok(end)) = (start, end) {
        geometry::render_curve(&mut rack.surface, curve, start, end, style);
    }

    info!("connected {} -> {}", from, to);
    Ok(cable)
}

/// Removes every cable plugged into the given input.
///
/// A backend disconnect that fails is logged and treated as already
/// disconnected; the cable record and its curve are removed regardless.
pub fn disconnect_all_into<S: RenderSurface, B: SignalBackend>(
    rack: &mut Rack<S, B>,
    module: ModuleId,
    input: &str,
) -> Vec<Cable> {
    let removed = rack
        .graph
        .remove_cables(|c| c.ends.terminates_at(module, input));
    unplug(rack, &removed);

    if !removed.is_empty() {
        info!("removed {} cable(s) into {}.{}", removed.len(), module, input);
    }
    removed
}

/// Removes every cable touching a module, in either direction.
///
/// The module itself stays in place; deletion follows up with the node.
pub fn disconnect_module<S: RenderSurface, B: SignalBackend>(
    rack: &mut Rack<S, B>,
    module: ModuleId,
) -> Vec<Cable> {
    let removed = rack.graph.remove_cables(|c| c.ends.touches(module));
    unplug(rack, &removed);

    if !removed.is_empty() {
        info!("removed {} cable(s) touching {}", removed.len(), module);
    }
    removed
}

/// Backend and surface half of cable removal. The records are already gone.
fn unplug<S: RenderSurface, B: SignalBackend>(rack: &mut Rack<S, B>, cables: &[Cable]) {
    for cable in cables {
        let output = rack
            .graph
            .find_module(cable.ends.from)
            .and_then(|m| m.output(cable.ends.from_port));
        let input = rack
            .graph
            .find_module(cable.ends.to)
            .and_then(|m| m.input(cable.ends.to_port));

        match (output, input) {
            (Some(output), Some(input)) => {
                if let Err(err) = rack.backend.disconnect(output, input) {
                    warn!(
                        "disconnect {} -> {} failed: {}",
                        cable.ends.from, cable.ends.to, err
                    );
                }
            }
            _ => warn!("cannot resolve ports of cable {:?}", cable.ends),
        }
        rack.surface.remove_curve(cable.curve);
    }
}
