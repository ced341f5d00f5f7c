//! Boundary to the dependency-discovery service.

use crate::model::{Graph, GraphRequest};
use crate::Result;

/// Anything that can answer a discovery request with a graph.
///
/// The service honours `request.max_rank` and fills `warnings` when it had
/// to truncate. Failures should use `ErrorKind::UpstreamFetchFailed` or
/// `ErrorKind::Timeout`.
pub trait GraphSource {
    fn fetch(&self, request: &GraphRequest) -> Result<Graph>;
}

impl<F> GraphSource for F
where
    F: Fn(&GraphRequest) -> Result<Graph>,
{
    fn fetch(&self, request: &GraphRequest) -> Result<Graph> {
        self(request)
    }
}
