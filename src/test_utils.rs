//! Shared fixtures for unit tests.

use egui::Pos2;

use crate::config::EditorConfig;
use crate::engine::SignalGraph;
use crate::geometry::{ElementId, RenderSurface, Scene};
use crate::graph::{ModuleId, PortDirection};
use crate::rack::Rack;

pub type TestRack = Rack<Scene, SignalGraph>;

/// A rack on the default scene and an in-memory signal graph.
pub fn test_rack() -> TestRack {
    Rack::new(Scene::default(), SignalGraph::new(), EditorConfig::default())
}

/// Viewport center of an element.
pub fn center_of(rack: &TestRack, element: ElementId) -> Pos2 {
    rack.surface
        .bounding_box(element)
        .map(|r| r.center())
        .expect("element is rendered")
}

/// Viewport center of a module's `out` socket.
pub fn output_of(rack: &TestRack, module: ModuleId) -> Pos2 {
    center_of(
        rack,
        ElementId::Port {
            module,
            port: "out",
            direction: PortDirection::Output,
        },
    )
}

/// Viewport center of a module's `in` socket.
pub fn input_of(rack: &TestRack, module: ModuleId) -> Pos2 {
    center_of(
        rack,
        ElementId::Port {
            module,
            port: "in",
            direction: PortDirection::Input,
        },
    )
}
