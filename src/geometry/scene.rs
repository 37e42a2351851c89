//! Retained rendering surface.
//!
//! `Scene` records module placements and curve primitives and answers
//! geometry queries from the module frame layout. The egui front-end paints
//! it every frame; tests inspect it directly.

use std::collections::{BTreeMap, HashMap};

use egui::{Pos2, Rect, Vec2};

use super::{CurveHandle, CurvePath, CurveStyle, ElementId, ModuleFrame, RenderSurface};
use crate::graph::{ModuleId, ModuleKind};

/// A curve primitive held by the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCurve {
    /// Drawing style.
    pub style: CurveStyle,
    /// Current path, `None` until first set.
    pub path: Option<CurvePath>,
}

/// A placed module.
#[derive(Clone, Copy, Debug)]
struct Placement {
    id: ModuleId,
    kind: ModuleKind,
    position: Pos2,
}

/// Retained implementation of [`RenderSurface`].
#[derive(Debug)]
pub struct Scene {
    container: Rect,
    scroll: Vec2,
    /// Placements in paint order; later entries are on top.
    modules: Vec<Placement>,
    /// Position of each placement in `modules`.
    index: HashMap<ModuleId, usize>,
    curves: BTreeMap<CurveHandle, SceneCurve>,
    next_curve: u64,
}

impl Scene {
    /// Creates an empty scene for a container occupying `container`.
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            scroll: Vec2::ZERO,
            modules: Vec::new(),
            index: HashMap::new(),
            curves: BTreeMap::new(),
            next_curve: 0,
        }
    }

    /// Updates the container rect (the host window was resized or moved).
    pub fn set_container_rect(&mut self, rect: Rect) {
        self.container = rect;
    }

    /// Updates the scroll offset.
    pub fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll = offset;
    }

    /// Looks up a curve primitive.
    pub fn curve(&self, handle: CurveHandle) -> Option<&SceneCurve> {
        self.curves.get(&handle)
    }

    /// All curve primitives in creation order.
    pub fn curves(&self) -> impl Iterator<Item = (CurveHandle, &SceneCurve)> {
        self.curves.iter().map(|(h, c)| (*h, c))
    }

    /// Number of live curve primitives.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Number of curves with the given style.
    pub fn count_curves(&self, style: CurveStyle) -> usize {
        self.curves.values().filter(|c| c.style == style).count()
    }

    /// Canvas position a module was last placed at.
    pub fn module_position(&self, id: ModuleId) -> Option<Pos2> {
        self.placement(id).map(|p| p.position)
    }

    /// Number of placed modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    fn placement(&self, id: ModuleId) -> Option<&Placement> {
        self.index.get(&id).and_then(|&i| self.modules.get(i))
    }

    fn element_rect(&self, placement: &Placement, element: ElementId) -> Option<Rect> {
        let frame = ModuleFrame::new(placement.kind);
        let origin = self.to_viewport(placement.position);
        match element {
            ElementId::Module(_) => Some(frame.body(origin)),
            ElementId::Header(_) => Some(frame.header(origin)),
            ElementId::Port {
                port, direction, ..
            } => {
                let definition = placement.kind.port(port)?;
                if definition.direction != direction {
                    return None;
                }
                frame.port(origin, port)
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Rect::from_min_size(Pos2::ZERO, Vec2::new(1280.0, 720.0)))
    }
}

impl RenderSurface for Scene {
    fn container_rect(&self) -> Rect {
        self.container
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        let placement = self.placement(element.module())?;
        self.element_rect(placement, element)
    }

    fn hit_test(&self, point: Pos2) -> Option<ElementId> {
        for placement in self.modules.iter().rev() {
            let frame = ModuleFrame::new(placement.kind);
            let origin = self.to_viewport(placement.position);
            if !frame.body(origin).contains(point) {
                continue;
            }
            for port in placement.kind.spec().ports {
                if frame.port(origin, port.id).is_some_and(|r| r.contains(point)) {
                    return Some(ElementId::Port {
                        module: placement.id,
                        port: port.id,
                        direction: port.direction,
                    });
                }
            }
            if frame.header(origin).contains(point) {
                return Some(ElementId::Header(placement.id));
            }
            return Some(ElementId::Module(placement.id));
        }
        None
    }

    fn place_module(&mut self, id: ModuleId, kind: ModuleKind, position: Pos2) {
        match self.index.get(&id).and_then(|&i| self.modules.get_mut(i)) {
            Some(placement) => placement.position = position,
            None => {
                self.index.insert(id, self.modules.len());
                self.modules.push(Placement { id, kind, position });
            }
        }
    }

    fn remove_module(&mut self, id: ModuleId) {
        let Some(index) = self.index.remove(&id) else {
            return;
        };
        self.modules.remove(index);
        for (i, later) in self.modules.iter().enumerate().skip(index) {
            self.index.insert(later.id, i);
        }
    }

    fn create_curve(&mut self, style: CurveStyle) -> CurveHandle {
        self.next_curve += 1;
        let handle = CurveHandle(self.next_curve);
        self.curves.insert(handle, SceneCurve { style, path: None });
        handle
    }

    fn set_curve_path(&mut self, handle: CurveHandle, path: CurvePath) {
        if let Some(curve) = self.curves.get_mut(&handle) {
            curve.path = Some(path);
        }
    }

    fn remove_curve(&mut self, handle: CurveHandle) {
        self.curves.remove(&handle);
    }
}
