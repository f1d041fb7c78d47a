//! Utility functions for Aeris
//!
//! Common helper functions used across the codebase.

use std::net::TcpListener;

use if_addrs::IfAddr;

/// Get the local IP address
///
/// Returns the first non-loopback IPv4 address found,
/// or "127.0.0.1" as fallback.
///
/// # Examples
///
/// ```
/// use aeris_common::local_ip;
///
/// let ip = local_ip();
/// assert!(!ip.is_empty());
/// ```
pub fn local_ip() -> String {
    if_addrs::get_if_addrs()
        .ok()
        .and_then(|addrs| {
            addrs
                .into_iter()
                .find(|iface| !iface.is_loopback() && matches!(iface.addr, IfAddr::V4(_)))
                .and_then(|iface| match iface.addr {
                    IfAddr::V4(addr) => Some(addr.ip.to_string()),
                    _ => None,
                })
        })
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// Probe the OS for a free TCP port.
///
/// Binds an ephemeral listener, reads back the assigned port, and drops the
/// listener. The port is not reserved afterwards, so there is a small race
/// window before the caller binds it again.
pub fn ephemeral_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ip_returns_valid_ip() {
        let ip = local_ip();
        // Should either be a valid IP or fallback to 127.0.0.1
        assert!(
            ip == "127.0.0.1" || ip.split('.').filter_map(|s| s.parse::<u8>().ok()).count() == 4
        );
    }

    #[test]
    fn test_ephemeral_port_is_nonzero() {
        let port = ephemeral_port().unwrap();
        assert!(port > 0);
    }

    #[test]
    fn test_ephemeral_port_is_bindable() {
        let port = ephemeral_port().unwrap();
        // The port was released, so binding it again should succeed
        assert!(TcpListener::bind(("127.0.0.1", port)).is_ok());
    }
}
