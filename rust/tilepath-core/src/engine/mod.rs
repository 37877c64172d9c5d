pub mod heap;
pub mod heuristics;
pub mod search;

pub use heap::{HeapKind, PriorityHeap};
pub use heuristics::Heuristic;
pub use search::{search_graph, AStar, NeighborSource, NotFoundReason, SearchOutcome, SearchStats};
