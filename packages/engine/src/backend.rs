use async_trait::async_trait;

use crate::{IseriesError, QueryResult, Value};

/// Driver boundary. Receives statements after projection markers have been inlined.
#[async_trait(?Send)]
pub trait IseriesBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, IseriesError>;
}
