//! Interactive dependency graph component.
//!
//! Turns flat `{name, dependencies[]}` records into a force-directed graph
//! on an HTML canvas:
//! - Deduplicated node arena with directed index edges
//! - Physics layout with decaying alpha energy, re-energized by dragging
//! - Drag-to-pin and click-to-navigate pointer gestures
//!
//! The simulation is advanced by an explicit `step()` from the hosting
//! animation loop and hands each tick's positions to a [`RenderAdapter`],
//! keeping the layout math independent of any rendering technology.

pub mod adapter;
mod component;
mod error;
mod fetch;
mod graph;
mod interaction;
mod render;
mod simulation;
mod types;

pub use adapter::{EdgeSegment, Frame, NodeSprite, RenderAdapter};
pub use component::DepGraphCanvas;
pub use error::{DataShapeError, FetchError};
pub use fetch::{FetchGeneration, fetch_records, parse_payload};
pub use graph::{DependencyGraph, GraphEdge, GraphNode};
pub use interaction::InteractionController;
pub use render::CanvasRenderer;
pub use simulation::{Simulation, SimulationParams};
pub use types::DependencyRecord;
