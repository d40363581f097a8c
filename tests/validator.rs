use async_trait::async_trait;
use netprobe::error::ProbeError;
use netprobe::params::ProbeParams;
use netprobe::protocol::Protocol;
use netprobe::validator::{DEFAULT_COUNT, DEFAULT_TIMEOUT_SECS, Resolver, SystemResolver, validate};
use std::io;
use std::net::{IpAddr, Ipv6Addr, SocketAddr, SocketAddrV6};
use std::time::Duration;
use tokio_test::block_on;

/// Resolver returning a fixed answer, or failing like an unknown name.
struct StaticResolver(Option<Vec<SocketAddr>>);

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self, name: &str) -> io::Result<Vec<SocketAddr>> {
        match &self.0 {
            Some(ips) => Ok(ips.clone()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no such host {}", name))),
        }
    }
}

fn not_a_hostname() -> StaticResolver {
    StaticResolver(None)
}

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn resolves_to(ips: &[&str]) -> StaticResolver {
    StaticResolver(Some(ips.iter().map(|s| SocketAddr::new(ip(s), 0)).collect()))
}

#[test]
fn test_validate_applies_defaults() {
    let params = ProbeParams::new("127.0.0.1", Protocol::Udp).with_port(9);
    let request = block_on(validate(&params, &not_a_hostname())).unwrap();

    assert_eq!(request.destination, "127.0.0.1");
    assert_eq!(request.destination_port, 9);
    assert_eq!(request.resolved_address, ip("127.0.0.1"));
    assert_eq!(request.count, DEFAULT_COUNT);
    assert_eq!(request.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
fn test_validate_zero_counters_get_defaults() {
    let params = ProbeParams::new("127.0.0.1", Protocol::Udp)
        .with_port(9)
        .with_count(0)
        .with_timeout(0);
    let request = block_on(validate(&params, &not_a_hostname())).unwrap();

    assert_eq!(request.count, 3);
    assert_eq!(request.timeout, Duration::from_secs(5));
}

#[test]
fn test_validate_keeps_explicit_counters() {
    let params = ProbeParams::new("127.0.0.1", Protocol::Udp)
        .with_port(9)
        .with_count(2)
        .with_timeout(1);
    let request = block_on(validate(&params, &not_a_hostname())).unwrap();

    assert_eq!(request.count, 2);
    assert_eq!(request.timeout, Duration::from_secs(1));
}

#[test]
fn test_validate_port_range() {
    for port in [-1, 65536, 100_000] {
        let params = ProbeParams::new("127.0.0.1", Protocol::Udp).with_port(port);
        match block_on(validate(&params, &not_a_hostname())) {
            Err(ProbeError::InvalidPort { protocol, port: p }) => {
                assert_eq!(protocol, "udp");
                assert_eq!(p, port);
            }
            other => panic!("Expected InvalidPort for {}, got {:?}", port, other),
        }
    }

    let params = ProbeParams::new("127.0.0.1", Protocol::Tcp).with_port(70000);
    let err = block_on(validate(&params, &not_a_hostname())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "tcp ping requires a valid destination port between 0 and 65535, got 70000"
    );
}

#[test]
fn test_validate_accepts_port_bounds() {
    for port in [0, 65535] {
        let params = ProbeParams::new("127.0.0.1", Protocol::Udp).with_port(port);
        let request = block_on(validate(&params, &not_a_hostname())).unwrap();
        assert_eq!(i64::from(request.destination_port), port);
    }

    // A missing port is treated as 0.
    let params = ProbeParams::new("127.0.0.1", Protocol::Udp);
    let request = block_on(validate(&params, &not_a_hostname())).unwrap();
    assert_eq!(request.destination_port, 0);
}

#[test]
fn test_validate_icmp_ignores_port() {
    let params = ProbeParams::new("127.0.0.1", Protocol::Icmp).with_port(-20);
    let request = block_on(validate(&params, &not_a_hostname())).unwrap();
    assert_eq!(request.destination_port, 0);
    assert_eq!(request.protocol, Protocol::Icmp);
}

#[test]
fn test_validate_takes_first_resolved_address() {
    let resolver = resolves_to(&["192.0.2.10", "2001:db8::1"]);
    let params = ProbeParams::new("probe.example", Protocol::Udp).with_port(53);
    let request = block_on(validate(&params, &resolver)).unwrap();

    assert_eq!(request.resolved_address, ip("192.0.2.10"));
    // results keep reporting the name the caller used
    assert_eq!(request.destination, "probe.example");
    assert_eq!(request.socket_addr(), "192.0.2.10:53".parse().unwrap());
}

#[test]
fn test_validate_empty_resolution() {
    let resolver = StaticResolver(Some(Vec::new()));
    let params = ProbeParams::new("nothing.example", Protocol::Udp).with_port(53);
    let err = block_on(validate(&params, &resolver)).unwrap_err();

    assert!(matches!(err, ProbeError::EmptyResolution(ref host) if host == "nothing.example"));
    assert_eq!(err.to_string(), "FQDN nothing.example does not resolve to any known ip");
}

#[test]
fn test_validate_falls_back_to_literal() {
    let params = ProbeParams::new("::1", Protocol::Udp).with_port(53);
    let request = block_on(validate(&params, &not_a_hostname())).unwrap();
    assert_eq!(request.resolved_address, ip("::1"));
}

#[test]
fn test_validate_invalid_address() {
    let params = ProbeParams::new("not an address", Protocol::Udp).with_port(53);
    let err = block_on(validate(&params, &not_a_hostname())).unwrap_err();

    assert!(matches!(err, ProbeError::InvalidAddress(ref v) if v == "not an address"));
    assert_eq!(err.to_string(), "destination IP is invalid: not an address");
}

#[test]
fn test_validate_port_checked_before_resolution() {
    // The resolver would fail the run too; the port error must win.
    let resolver = StaticResolver(Some(Vec::new()));
    let params = ProbeParams::new("nothing.example", Protocol::Udp).with_port(-1);
    let err = block_on(validate(&params, &resolver)).unwrap_err();
    assert!(matches!(err, ProbeError::InvalidPort { .. }));
}

#[test]
fn test_validate_rejects_zoned_resolution() {
    let zoned = SocketAddr::V6(SocketAddrV6::new("fe80::1".parse::<Ipv6Addr>().unwrap(), 0, 0, 1));
    let resolver = StaticResolver(Some(vec![zoned]));
    let params = ProbeParams::new("fe80::1%lo", Protocol::Udp).with_port(9);
    let err = block_on(validate(&params, &resolver)).unwrap_err();

    assert!(matches!(err, ProbeError::InvalidAddress(ref v) if v == "fe80::1%lo"));
    assert_eq!(err.to_string(), "destination IP is invalid: fe80::1%lo");
}

#[test]
fn test_validate_accepts_unzoned_link_local() {
    let params = ProbeParams::new("fe80::1", Protocol::Udp).with_port(9);
    let request = block_on(validate(&params, &resolves_to(&["fe80::1"]))).unwrap();
    assert_eq!(request.resolved_address, ip("fe80::1"));
}

#[test]
fn test_validate_zoned_literal_with_system_resolver() {
    let params = ProbeParams::new("fe80::1%lo", Protocol::Udp)
        .with_port(9)
        .with_count(2)
        .with_timeout(1);
    let err = block_on(validate(&params, &SystemResolver)).unwrap_err();
    assert!(matches!(err, ProbeError::InvalidAddress(_)));
}
