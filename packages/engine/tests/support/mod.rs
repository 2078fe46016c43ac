#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use async_trait::async_trait;
use iseries_engine::{IseriesBackend, IseriesError, QueryResult, Value};

static INIT: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

pub type ExecutedLog = Rc<RefCell<Vec<(String, Vec<Value>)>>>;

/// Backend that records what reaches the driver boundary.
pub struct RecordingBackend {
    executed: ExecutedLog,
}

impl RecordingBackend {
    pub fn new() -> (Self, ExecutedLog) {
        let executed = ExecutedLog::default();
        (
            Self {
                executed: Rc::clone(&executed),
            },
            executed,
        )
    }
}

#[async_trait(?Send)]
impl IseriesBackend for RecordingBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, IseriesError> {
        self.executed
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
        Ok(QueryResult::default())
    }
}

pub fn assert_parses(sql: &str) {
    use sqlparser::dialect::GenericDialect;
    use sqlparser::parser::Parser;

    if let Err(error) = Parser::parse_sql(&GenericDialect {}, sql) {
        panic!("rewritten SQL should parse: {error}\n{sql}");
    }
}
