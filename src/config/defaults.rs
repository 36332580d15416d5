pub const HOST: &str = "127.0.0.1";
pub const PORT: u16 = 4002;
pub const RUST_LOG: &str = "info,tower_http=info";

pub fn max_connections() -> u32 {
    10
}

pub fn min_idle() -> u32 {
    2
}

pub fn connect_timeout_secs() -> u64 {
    5
}
