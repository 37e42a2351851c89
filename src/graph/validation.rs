//! Connection validation for the patch graph.
//!
//! Resolves both ends of a prospective cable against the store and checks the
//! structural rules (no self-loops, one cable per input) before anything is
//! sent to the backend.

use serde::{Deserialize, Serialize};

use super::{CableEnds, PatchGraph};
use super::ModuleId;
use crate::engine::PortHandle;
use crate::error::PatchError;

/// What happens when a cable is dropped on an input that already has one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Refuse the new cable. The old one must be removed first.
    #[default]
    Exclusive,
    /// Remove the old cable, then connect the new one.
    Replace,
    /// Allow several cables into one input.
    Permissive,
}

/// A validated connection, ready to be linked in the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionPlan {
    /// The cable that will be recorded.
    pub ends: CableEnds,
    /// Backend handle of the source output.
    pub output: PortHandle,
    /// Backend handle of the destination input.
    pub input: PortHandle,
    /// True if existing cables into the input must be removed first.
    pub replaces_existing: bool,
}

/// Validates a connection from the source's primary output to the
/// destination's primary input.
///
/// # Rules
///
/// | Check                         | Error            |
/// |-------------------------------|------------------|
/// | source == destination         | `SelfConnection` |
/// | either module missing         | `ModuleNotFound` |
/// | no output / no input port     | `PortNotFound`   |
/// | input occupied (`Exclusive`)  | `InputOccupied`  |
pub fn validate_connection(
    graph: &PatchGraph,
    from: ModuleId,
    to: ModuleId,
    policy: InputPolicy,
) -> Result<ConnectionPlan, PatchError> {
    if from == to {
        return Err(PatchError::SelfConnection);
    }

    let source = graph
        .find_module(from)
        .ok_or(PatchError::ModuleNotFound(from))?;
    let dest = graph.find_module(to).ok_or(PatchError::ModuleNotFound(to))?;

    let from_port = source
        .primary_output()
        .ok_or(PatchError::PortNotFound {
            module: from,
            port: "out",
        })?;
    let to_port = dest.primary_input().ok_or(PatchError::PortNotFound {
        module: to,
        port: "in",
    })?;

    let output = source.output(from_port).ok_or(PatchError::PortNotFound {
        module: from,
        port: from_port,
    })?;
    let input = dest.input(to_port).ok_or(PatchError::PortNotFound {
        module: to,
        port: to_port,
    })?;

    let occupied = graph.incoming(to, to_port).next().is_some();
    if occupied && policy == InputPolicy::Exclusive {
        return Err(PatchError::InputOccupied {
            module: to,
            port: to_port,
        });
    }

    Ok(ConnectionPlan {
        ends: CableEnds::new(from, from_port, to, to_port),
        output,
        input,
        replaces_existing: occupied && policy == InputPolicy::Replace,
    })
}
