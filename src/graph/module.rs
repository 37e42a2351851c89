//! Module kinds and module instances.
//!
//! Each [`ModuleKind`] has a static [`ModuleSpec`] describing its ports and
//! controls. Construction logic reads the table instead of matching on names.

use std::collections::HashMap;

use egui::Pos2;

use super::parameter::ParameterDefinition;
use super::port::{PortDefinition, PortDirection};
use crate::engine::{NodeHandle, PortHandle};

/// Process-wide unique identifier of a module. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub u64);

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mod_{}", self.0)
    }
}

/// Where a module sits in a signal chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleRole {
    /// Produces a signal, has no inputs.
    Source,
    /// Transforms a signal.
    Processor,
    /// Consumes a signal, has no outputs.
    Sink,
}

/// The available module types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Voltage controlled oscillator.
    Vco,
    /// Voltage controlled amplifier.
    Vca,
    /// Audio output.
    Output,
}

/// Static capability table entry for a module kind.
#[derive(Debug)]
pub struct ModuleSpec {
    /// Header title.
    pub title: &'static str,
    /// Role in the signal chain.
    pub role: ModuleRole,
    /// Ports, inputs and outputs in display order.
    pub ports: &'static [PortDefinition],
    /// Controls on the module face.
    pub parameters: &'static [ParameterDefinition],
}

/// Waveform labels of the oscillator.
pub const WAVEFORMS: &[&str] = &["sine", "square", "sawtooth", "triangle"];

static VCO_SPEC: ModuleSpec = ModuleSpec {
    title: "VCO",
    role: ModuleRole::Source,
    ports: &[PortDefinition::output("out", "Out")],
    parameters: &[
        ParameterDefinition::linear("freq", "Freq", 50.0, 2000.0, 440.0, "Hz"),
        ParameterDefinition::choice("wave", "Wave", WAVEFORMS, 2),
    ],
};

static VCA_SPEC: ModuleSpec = ModuleSpec {
    title: "VCA",
    role: ModuleRole::Processor,
    ports: &[
        PortDefinition::input("in", "In"),
        PortDefinition::output("out", "Out"),
    ],
    parameters: &[ParameterDefinition::linear("level", "Level", 0.0, 1.0, 0.5, "")],
};

static OUTPUT_SPEC: ModuleSpec = ModuleSpec {
    title: "OUTPUT",
    role: ModuleRole::Sink,
    ports: &[PortDefinition::input("in", "In")],
    parameters: &[],
};

impl ModuleKind {
    /// All kinds, in toolbar order.
    pub const ALL: [ModuleKind; 3] = [ModuleKind::Vco, ModuleKind::Vca, ModuleKind::Output];

    /// Returns the capability table entry for this kind.
    pub fn spec(&self) -> &'static ModuleSpec {
        match self {
            ModuleKind::Vco => &VCO_SPEC,
            ModuleKind::Vca => &VCA_SPEC,
            ModuleKind::Output => &OUTPUT_SPEC,
        }
    }

    /// Header title of this kind.
    pub fn title(&self) -> &'static str {
        self.spec().title
    }

    /// Role of this kind in a signal chain.
    pub fn role(&self) -> ModuleRole {
        self.spec().role
    }

    /// Iterates over the ports of the given direction.
    pub fn ports(&self, direction: PortDirection) -> impl Iterator<Item = &'static PortDefinition> {
        self.spec()
            .ports
            .iter()
            .filter(move |p| p.direction == direction)
    }

    /// Looks up a port definition by name.
    pub fn port(&self, name: &str) -> Option<&'static PortDefinition> {
        self.spec().ports.iter().find(|p| p.id == name)
    }
}

/// A module placed in the rack.
///
/// Owns the backend node it was created with. Port handles are indexed by
/// position among ports of the same direction.
#[derive(Clone, Debug)]
pub struct Module {
    /// Unique id.
    pub id: ModuleId,
    /// Kind tag.
    pub kind: ModuleKind,
    /// Top-left corner in canvas coordinates.
    pub position: Pos2,
    /// The backend node this module owns.
    pub node: NodeHandle,
    inputs: HashMap<&'static str, PortHandle>,
    outputs: HashMap<&'static str, PortHandle>,
    parameters: Vec<f32>,
}

impl Module {
    /// Creates a module and derives its port handles from the kind's table.
    pub fn new(id: ModuleId, kind: ModuleKind, position: Pos2, node: NodeHandle) -> Self {
        let inputs = kind
            .ports(PortDirection::Input)
            .enumerate()
            .map(|(index, port)| (port.id, PortHandle::new(node, index)))
            .collect();
        let outputs = kind
            .ports(PortDirection::Output)
            .enumerate()
            .map(|(index, port)| (port.id, PortHandle::new(node, index)))
            .collect();
        let parameters = kind.spec().parameters.iter().map(|p| p.default).collect();

        Self {
            id,
            kind,
            position,
            node,
            inputs,
            outputs,
            parameters,
        }
    }

    /// Backend handle of a named input.
    pub fn input(&self, name: &str) -> Option<PortHandle> {
        self.inputs.get(name).copied()
    }

    /// Backend handle of a named output.
    pub fn output(&self, name: &str) -> Option<PortHandle> {
        self.outputs.get(name).copied()
    }

    /// Name of the first input port, if the kind has one.
    pub fn primary_input(&self) -> Option<&'static str> {
        self.kind.ports(PortDirection::Input).next().map(|p| p.id)
    }

    /// Name of the first output port, if the kind has one.
    pub fn primary_output(&self) -> Option<&'static str> {
        self.kind.ports(PortDirection::Output).next().map(|p| p.id)
    }

    /// Current parameter values, in table order.
    pub fn parameters(&self) -> &[f32] {
        &self.parameters
    }

    /// Clamps and stores a parameter value.
    ///
    /// Returns the stored value, or `None` for an out-of-range index.
    pub fn set_parameter(&mut self, index: usize, value: f32) -> Option<f32> {
        let definition = self.kind.spec().parameters.get(index)?;
        let clamped = definition.clamp(value);
        self.parameters[index] = clamped;
        Some(clamped)
    }
}
