pub mod classify;
pub mod error;
pub mod geo;
pub mod graph;
pub mod models;
pub mod prune;
pub mod search;

pub use classify::{classify, Classification, ClassifyStats};
pub use error::{ModelError, RouteError};
pub use geo::haversine_distance;
pub use graph::{EdgeId, NodeId, RoadEdge, RoadGraph};
pub use models::{Coordinate, HazardZone, TravelMode};
pub use prune::prune;
pub use search::{find_route, find_route_between, snap_to_nearest, Route};
