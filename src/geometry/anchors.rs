//! Port anchors and cable re-rendering.

use egui::Pos2;

use super::{CurveHandle, CurvePath, DroopStyle, ElementId, RenderSurface};
use crate::error::PatchError;
use crate::graph::{Cable, ModuleId, PatchGraph};

/// Canvas-space center of a port socket.
///
/// Fails with a not-found error if the module is gone, the kind has no such
/// port, or the surface has not rendered it. Callers skip on failure.
pub fn anchor_of<S: RenderSurface + ?Sized>(
    surface: &S,
    graph: &PatchGraph,
    module: ModuleId,
    port: &'static str,
) -> Result<Pos2, PatchError> {
    let kind = graph
        .find_module(module)
        .ok_or(PatchError::ModuleNotFound(module))?
        .kind;
    let definition = kind.port(port).ok_or(PatchError::PortNotFound { module, port })?;
    let rect = surface
        .bounding_box(ElementId::Port {
            module,
            port: definition.id,
            direction: definition.direction,
        })
        .ok_or(PatchError::PortNotFound { module, port })?;
    Ok(surface.to_canvas(rect.center()))
}

/// Sets a curve primitive to the drooping path between two canvas points.
pub fn render_curve<S: RenderSurface + ?Sized>(
    surface: &mut S,
    handle: CurveHandle,
    start: Pos2,
    end: Pos2,
    style: DroopStyle,
) {
    surface.set_curve_path(handle, CurvePath::droop(start, end, style));
}

/// Re-renders one committed cable from current module positions.
fn update_cable<S: RenderSurface + ?Sized>(
    surface: &mut S,
    graph: &PatchGraph,
    cable: &Cable,
    style: DroopStyle,
) -> Result<(), PatchError> {
    let start = anchor_of(surface, graph, cable.ends.from, cable.ends.from_port)?;
    let end = anchor_of(surface, graph, cable.ends.to, cable.ends.to_port)?;
    render_curve(surface, cable.curve, start, end, style);
    Ok(())
}

/// Re-renders every cable. Cables whose anchors cannot be resolved are
/// left as they are.
///
/// Runs on every pointer move during a module drag, so it does nothing but
/// arithmetic per cable.
///
/// Returns the number of cables updated.
pub fn batch_update<S: RenderSurface + ?Sized>(
    surface: &mut S,
    graph: &PatchGraph,
    style: DroopStyle,
) -> usize {
    let mut updated = 0;
    for cable in graph.cables() {
        match update_cable(surface, graph, cable, style) {
            Ok(()) => updated += 1,
            Err(err) => tracing::trace!("skipping cable {:?}: {}", cable.ends, err),
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CurveStyle, ModuleFrame, Scene};
    use crate::graph::{CableEnds, Module, ModuleKind};
    use crate::engine::NodeHandle;
    use egui::{Rect, Vec2};

    fn placed(
        graph: &mut PatchGraph,
        scene: &mut Scene,
        kind: ModuleKind,
        position: Pos2,
    ) -> ModuleId {
        let id = graph.allocate_id();
        scene.place_module(id, kind, position);
        graph.add_module(Module::new(id, kind, position, NodeHandle(id.0)));
        id
    }

    #[test]
    fn test_anchor_is_port_center_in_canvas_space() {
        let mut graph = PatchGraph::new();
        let mut scene = Scene::new(Rect::from_min_size(Pos2::new(40.0, 60.0), Vec2::new(800.0, 600.0)));
        scene.set_scroll_offset(Vec2::new(25.0, 10.0));
        let vca = placed(&mut graph, &mut scene, ModuleKind::Vca, Pos2::new(100.0, 200.0));

        let anchor = anchor_of(&scene, &graph, vca, "in").unwrap();
        let expected = ModuleFrame::new(ModuleKind::Vca)
            .port(Pos2::new(100.0, 200.0), "in")
            .unwrap()
            .center();
        assert!((anchor - expected).length() < 1e-3);
    }

    #[test]
    fn test_anchor_not_found() {
        let mut graph = PatchGraph::new();
        let mut scene = Scene::default();
        let vco = placed(&mut graph, &mut scene, ModuleKind::Vco, Pos2::ZERO);

        assert!(anchor_of(&scene, &graph, vco, "in").unwrap_err().is_not_found());
        assert!(anchor_of(&scene, &graph, ModuleId(77), "out").unwrap_err().is_not_found());

        // In the graph but never rendered
        let id = graph.allocate_id();
        graph.add_module(Module::new(id, ModuleKind::Vco, Pos2::ZERO, NodeHandle(9)));
        assert!(anchor_of(&scene, &graph, id, "out").is_err());
    }

    #[test]
    fn test_batch_update_follows_module_moves() {
        let mut graph = PatchGraph::new();
        let mut scene = Scene::default();
        let vco = placed(&mut graph, &mut scene, ModuleKind::Vco, Pos2::new(0.0, 0.0));
        let out = placed(&mut graph, &mut scene, ModuleKind::Output, Pos2::new(400.0, 0.0));
        let curve = scene.create_curve(CurveStyle::Cable);
        graph.add_cable(Cable {
            ends: CableEnds::new(vco, "out", out, "in"),
            curve,
        });

        assert_eq!(batch_update(&mut scene, &graph, DroopStyle::default()), 1);
        let before = scene.curve(curve).and_then(|c| c.path).unwrap();

        graph.find_module_mut(out).unwrap().position = Pos2::new(400.0, 300.0);
        scene.place_module(out, ModuleKind::Output, Pos2::new(400.0, 300.0));
        batch_update(&mut scene, &graph, DroopStyle::default());

        let after = scene.curve(curve).and_then(|c| c.path).unwrap();
        assert_eq!(before.start, after.start);
        assert!((after.end.y - before.end.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_batch_update_skips_unresolvable_cables() {
        let mut graph = PatchGraph::new();
        let mut scene = Scene::default();
        let vco = placed(&mut graph, &mut scene, ModuleKind::Vco, Pos2::ZERO);
        let out = placed(&mut graph, &mut scene, ModuleKind::Output, Pos2::new(300.0, 0.0));
        let curve = scene.create_curve(CurveStyle::Cable);
        graph.add_cable(Cable {
            ends: CableEnds::new(vco, "out", out, "in"),
            curve,
        });
        scene.remove_module(out);

        assert_eq!(batch_update(&mut scene, &graph, DroopStyle::default()), 0);
        assert!(scene.curve(curve).unwrap().path.is_none());
    }
}
