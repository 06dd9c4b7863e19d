//! Research-map core: documents, projection, selection and live view-state.
//!
//! Nothing here touches the browser, so the whole module is testable on
//! the host.

pub mod document;
pub mod graph;
pub mod layout;
pub mod projector;
pub mod selection;
pub mod session;
pub mod view_state;

pub use document::{DocumentRecord, SectionRecord, UploadOutcome};
pub use graph::{EdgeKind, Graph, GraphEdge, GraphNode, NodeKind, Position};
pub use layout::LayoutStrategy;
pub use projector::{project, project_with};
pub use selection::SelectionSet;
pub use session::{AtlasEvent, AtlasSession, RenderFrame};
pub use view_state::{GraphChange, GraphViewState};
