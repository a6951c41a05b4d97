mod macros;

/// Version string reported by the CLI and the outgoing `User-Agent`.
pub fn contact_relay_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
