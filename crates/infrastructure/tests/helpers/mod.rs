#![allow(dead_code)]

pub mod a2s_server_mock;
pub mod mock_query;

pub use a2s_server_mock::{MockA2sBehavior, MockA2sServer};
pub use mock_query::MockServerQuery;

use serverwatch_domain::ServerTarget;
use std::sync::Arc;

pub const START_MS: u64 = 1_700_000_000_000;

pub fn target(id: &str, host: &str, port: u16) -> ServerTarget {
    ServerTarget::new(
        Arc::from(id),
        Arc::from(format!("{} server", id)),
        Arc::from(host),
        port,
        Arc::from("Frankfurt"),
        Arc::from(format!("steam://connect/{}:{}", host, port)),
        false,
    )
}
