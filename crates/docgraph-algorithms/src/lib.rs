pub mod common;
pub mod centrality;
pub mod clustering;
pub mod pagerank;
pub mod community;

pub use common::{GraphView, NodeId};
pub use centrality::degree_centrality;
pub use clustering::clustering_coefficients;
pub use pagerank::{page_rank, PageRankConfig};
pub use community::{greedy_modularity_communities, modularity, CommunityResult};
