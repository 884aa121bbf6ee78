use std::net::IpAddr;

use crate::models::config::Filter;
use crate::models::endpoint::Endpoint;

fn match_ip(expected: IpAddr, endpoint: &Endpoint) -> bool {
    !endpoint.is_empty() && endpoint.ip() == Some(expected)
}

fn match_port(expected: u16, endpoint: &Endpoint) -> bool {
    !endpoint.is_empty() && endpoint.port() == Some(expected)
}

/// Check a connection against the host and port criteria.
///
/// Each configured criterion must be satisfied by at least one side of the
/// connection; unset criteria accept everything.
pub fn matches(from: &Endpoint, to: &Endpoint, filter: &Filter) -> bool {
    if let Some(host) = filter.host {
        if !match_ip(host, from) && !match_ip(host, to) {
            return false;
        }
    }
    if filter.port != 0 && !match_port(filter.port, from) && !match_port(filter.port, to) {
        return false;
    }

    true
}

/// Check a value length against the configured inclusive bounds
pub fn value_size_in_range(len: usize, filter: &Filter) -> bool {
    len >= filter.value_min_size && len <= filter.value_max_size
}
