//! # Dotted-Quad Parsing
//!
//! Strict IPv4 parsing used by every validator in the crate.
//!
//! `std`'s `Ipv4Addr::from_str` rejects zero-padded octets such as `010`,
//! which the dashboard forms have always accepted, so octets are parsed by
//! hand: four `.`-separated runs of ASCII digits, each at most 255.

use std::net::Ipv4Addr;

/// Parses `s` as exactly four decimal octets.
///
/// No surrounding whitespace, signs or empty octets are accepted.
pub fn parse_ipv4(s: &str) -> Option<Ipv4Addr> {
    let mut octets: [u8; 4] = [0; 4];
    let mut parts = s.split('.');

    for octet in octets.iter_mut() {
        *octet = parse_octet(parts.next()?)?;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

pub fn is_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// Heuristic for text that was meant as an IPv6 address.
///
/// True when `s` holds at least two colons and nothing but hex digits and
/// colons (`::1`, `fe80::1`, `2001:db8::`).
pub fn looks_like_ipv6(s: &str) -> bool {
    s.matches(':').count() >= 2 && s.chars().all(|c| c == ':' || c.is_ascii_hexdigit())
}

/// True for a non-empty run of ASCII digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_octet(s: &str) -> Option<u8> {
    if !is_digits(s) {
        return None;
    }
    // Digits only, so the only parse failure left is overflow.
    s.parse::<u32>().ok().and_then(|n| u8::try_from(n).ok())
}
