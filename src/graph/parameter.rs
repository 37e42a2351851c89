//! Parameter definitions for rack modules.
//!
//! Parameters are the controls on a module face (sliders and selectors).
//! Values are stored in their natural units and forwarded to the backend.

/// How a parameter value should be displayed and interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterDisplay {
    /// Continuous slider with a unit suffix (e.g., "Hz", "%").
    Linear { unit: &'static str },
    /// Discrete steps with named values, shown as a drop-down.
    Discrete { labels: &'static [&'static str] },
}

impl ParameterDisplay {
    /// Returns the unit string, if applicable.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Linear { unit } => Some(unit),
            Self::Discrete { .. } => None,
        }
    }

    /// Returns the labels of a discrete parameter.
    pub fn labels(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Discrete { labels } => Some(labels),
            Self::Linear { .. } => None,
        }
    }
}

/// Definition of a parameter on a module kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDefinition {
    /// Unique identifier for this parameter within the module.
    pub id: &'static str,
    /// Label shown on the module face.
    pub name: &'static str,
    /// Minimum value of the parameter.
    pub min: f32,
    /// Maximum value of the parameter.
    pub max: f32,
    /// Default value when the module is created.
    pub default: f32,
    /// How to display and interpret the parameter value.
    pub display: ParameterDisplay,
}

impl ParameterDefinition {
    /// Creates a continuous parameter.
    pub const fn linear(
        id: &'static str,
        name: &'static str,
        min: f32,
        max: f32,
        default: f32,
        unit: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            min,
            max,
            default,
            display: ParameterDisplay::Linear { unit },
        }
    }

    /// Creates a discrete choice parameter.
    pub const fn choice(
        id: &'static str,
        name: &'static str,
        labels: &'static [&'static str],
        default_index: usize,
    ) -> Self {
        Self {
            id,
            name,
            min: 0.0,
            max: (labels.len().saturating_sub(1)) as f32,
            default: default_index as f32,
            display: ParameterDisplay::Discrete { labels },
        }
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// Discrete parameters are also rounded to the nearest step.
    pub fn clamp(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        match self.display {
            ParameterDisplay::Discrete { .. } => clamped.round(),
            ParameterDisplay::Linear { .. } => clamped,
        }
    }

    /// Returns the label for a discrete value.
    pub fn label_for(&self, value: f32) -> Option<&'static str> {
        let labels = self.display.labels()?;
        labels.get(self.clamp(value) as usize).copied()
    }
}
