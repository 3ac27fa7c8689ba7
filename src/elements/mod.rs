//! Geometric building blocks: axes, DOFs, mesh nodes and reference nodes

mod axis;
mod node;
mod reference;

pub use axis::{Axis, Dof, SortAxes};
pub use node::{MeshNode, NodeId};
pub use reference::ReferenceSlot;
