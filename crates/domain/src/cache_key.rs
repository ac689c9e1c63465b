pub const SERVER_STATUS_PREFIX: &str = "server_status_";

pub fn server_status_key(server_id: &str) -> String {
    format!("{}{}", SERVER_STATUS_PREFIX, server_id)
}
