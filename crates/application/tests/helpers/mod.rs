#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_ports;

pub use mock_ports::*;

use serverwatch_domain::ServerTarget;
use std::sync::Arc;
use std::time::Duration;

pub fn target(id: &str) -> ServerTarget {
    ServerTarget::new(
        Arc::from(id),
        Arc::from(format!("{} server", id)),
        Arc::from("127.0.0.1"),
        27015,
        Arc::from("Frankfurt"),
        Arc::from(format!("steam://connect/{}", id)),
        false,
    )
}

/// Polls `condition` until it holds or one second elapses.
pub async fn wait_until<F>(mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
