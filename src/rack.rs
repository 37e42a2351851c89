//! The rack: patch graph, rendering surface and signal backend together.
//!
//! Every core operation takes a `&mut Rack` instead of reaching for global
//! state, so several independent editors can live in one process.

use egui::Pos2;
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::engine::{self, SignalBackend};
use crate::error::PatchError;
use crate::geometry::{self, DroopStyle, RenderSurface};
use crate::graph::{Cable, Module, ModuleId, ModuleKind, PatchGraph};

/// Shared patch state.
pub struct Rack<S, B> {
    /// Modules and cables.
    pub graph: PatchGraph,
    /// Where modules and cables are drawn.
    pub surface: S,
    /// The signal graph the cables mirror.
    pub backend: B,
    /// Editor tunables.
    pub config: EditorConfig,
}

impl<S: RenderSurface, B: SignalBackend> Rack<S, B> {
    /// Creates an empty rack.
    pub fn new(surface: S, backend: B, config: EditorConfig) -> Self {
        Self {
            graph: PatchGraph::new(),
            surface,
            backend,
            config,
        }
    }

    /// Droop parameters for cable curves.
    pub fn droop_style(&self) -> DroopStyle {
        self.config.droop_style()
    }

    /// Creates a module with its backend node and renders it.
    pub fn add_module(&mut self, kind: ModuleKind, position: Pos2) -> ModuleId {
        let id = self.graph.allocate_id();
        let node = self.backend.create_node(kind);
        self.graph.add_module(Module::new(id, kind, position, node));
        self.surface.place_module(id, kind, position);
        debug!("created {} {} at ({}, {})", kind.title(), id, position.x, position.y);
        id
    }

    /// Deletes a module, its cables (in both graphs) and its rendering.
    pub fn remove_module(&mut self, id: ModuleId) -> Result<Vec<Cable>, PatchError> {
        if !self.graph.contains_module(id) {
            return Err(PatchError::ModuleNotFound(id));
        }
        let cables = engine::disconnect_module(self, id);
        if let Some((module, _)) = self.graph.remove_module(id) {
            self.backend.remove_node(module.node);
        }
        self.surface.remove_module(id);
        debug!("removed {} and {} cable(s)", id, cables.len());
        Ok(cables)
    }

    /// Moves a module and re-renders it. Cables are not refreshed.
    pub fn move_module(&mut self, id: ModuleId, position: Pos2) -> Result<(), PatchError> {
        let module = self
            .graph
            .find_module_mut(id)
            .ok_or(PatchError::ModuleNotFound(id))?;
        module.position = position;
        self.surface.place_module(id, module.kind, position);
        Ok(())
    }

    /// Re-renders every cable from current module positions.
    pub fn refresh_cables(&mut self) -> usize {
        let style = self.droop_style();
        geometry::batch_update(&mut self.surface, &self.graph, style)
    }

    /// Sets a module parameter and forwards it to the backend.
    ///
    /// Returns the clamped value that was stored.
    pub fn set_parameter(
        &mut self,
        id: ModuleId,
        index: usize,
        value: f32,
    ) -> Result<f32, PatchError> {
        let module = self
            .graph
            .find_module_mut(id)
            .ok_or(PatchError::ModuleNotFound(id))?;
        let stored = module
            .set_parameter(index, value)
            .ok_or(PatchError::ParameterNotFound { module: id, index })?;
        let node = module.node;
        if let Err(err) = self.backend.set_parameter(node, index, stored) {
            warn!("parameter {} on {} not applied: {}", index, id, err);
        }
        Ok(stored)
    }

    /// Connects `from`'s output to `to`'s input. See [`engine::connect`].
    pub fn connect(&mut self, from: ModuleId, to: ModuleId) -> Result<Cable, PatchError> {
        engine::connect(self, from, to)
    }

    /// Removes every cable into an input. See [`engine::disconnect_all_into`].
    pub fn disconnect_all_into(&mut self, module: ModuleId, input: &str) -> Vec<Cable> {
        engine::disconnect_all_into(self, module, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SignalGraph;
    use crate::geometry::{CurveStyle, Scene};

    fn rack() -> Rack<Scene, SignalGraph> {
        Rack::new(Scene::default(), SignalGraph::new(), EditorConfig::default())
    }

    #[test]
    fn test_add_module_creates_node_and_rendering() {
        let mut rack = rack();
        let id = rack.add_module(ModuleKind::Vco, Pos2::new(10.0, 20.0));
        assert_eq!(rack.graph.module_count(), 1);
        assert_eq!(rack.backend.node_count(), 1);
        assert_eq!(rack.surface.module_position(id), Some(Pos2::new(10.0, 20.0)));
    }

    #[test]
    fn test_remove_module_cascades_everywhere() {
        let mut rack = rack();
        let vco = rack.add_module(ModuleKind::Vco, Pos2::new(0.0, 0.0));
        let vca = rack.add_module(ModuleKind::Vca, Pos2::new(300.0, 0.0));
        let out = rack.add_module(ModuleKind::Output, Pos2::new(600.0, 0.0));
        rack.connect(vco, vca).unwrap();
        rack.connect(vca, out).unwrap();

        let removed = rack.remove_module(vca).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(rack.graph.cable_count(), 0);
        assert_eq!(rack.backend.edge_count(), 0);
        assert_eq!(rack.backend.node_count(), 2);
        assert_eq!(rack.surface.count_curves(CurveStyle::Cable), 0);
        assert_eq!(rack.surface.module_count(), 2);

        assert_eq!(
            rack.remove_module(vca).unwrap_err(),
            PatchError::ModuleNotFound(vca)
        );
    }

    #[test]
    fn test_remove_source_keeps_unrelated_cables() {
        let mut rack = rack();
        let a = rack.add_module(ModuleKind::Vco, Pos2::new(0.0, 0.0));
        let vca = rack.add_module(ModuleKind::Vca, Pos2::new(300.0, 0.0));
        let out = rack.add_module(ModuleKind::Output, Pos2::new(600.0, 0.0));
        rack.connect(a, vca).unwrap();
        rack.connect(vca, out).unwrap();

        rack.remove_module(a).unwrap();
        assert_eq!(rack.graph.cable_count(), 1);
        assert_eq!(rack.backend.edge_count(), 1);
        assert!(rack.graph.cables().iter().all(|c| c.ends.from == vca));
    }

    #[test]
    fn test_set_parameter_forwards_clamped_value() {
        let mut rack = rack();
        let vca = rack.add_module(ModuleKind::Vca, Pos2::ZERO);
        let node = rack.graph.find_module(vca).unwrap().node;

        assert_eq!(rack.set_parameter(vca, 0, 3.0), Ok(1.0));
        assert_eq!(rack.backend.parameter(node, 0), Some(1.0));
        assert!(rack.set_parameter(vca, 4, 0.2).is_err());
        assert!(rack.set_parameter(ModuleId(99), 0, 0.2).is_err());
    }

    #[test]
    fn test_move_module_updates_surface() {
        let mut rack = rack();
        let out = rack.add_module(ModuleKind::Output, Pos2::ZERO);
        rack.move_module(out, Pos2::new(40.0, 50.0)).unwrap();
        assert_eq!(rack.surface.module_position(out), Some(Pos2::new(40.0, 50.0)));
        assert_eq!(
            rack.graph.find_module(out).map(|m| m.position),
            Some(Pos2::new(40.0, 50.0))
        );
        assert!(rack.move_module(ModuleId(99), Pos2::ZERO).is_err());
    }
}
