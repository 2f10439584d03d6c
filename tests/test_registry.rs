use std::net::{IpAddr, Ipv4Addr};

use hearth::server::ClientRegistry;

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
}

#[test]
fn test_add_contains_remove() {
    let registry = ClientRegistry::new();

    assert!(!registry.contains(ip(1)));
    assert!(registry.add(ip(1)));
    assert!(registry.contains(ip(1)));
    assert!(registry.remove(ip(1)));
    assert!(!registry.contains(ip(1)));
}

#[test]
fn test_duplicate_add_reports_already_present() {
    let registry = ClientRegistry::new();

    assert!(registry.add(ip(2)));
    // A second connection from the same address is not "new".
    assert!(!registry.add(ip(2)));
}

#[test]
fn test_remove_absent_address() {
    let registry = ClientRegistry::new();
    assert!(!registry.remove(ip(3)));
}

#[test]
fn test_clones_share_state() {
    let registry = ClientRegistry::new();
    let clone = registry.clone();

    registry.add(ip(4));
    assert!(clone.contains(ip(4)));
}

#[test]
fn test_concurrent_insert_and_remove() {
    let registry = ClientRegistry::new();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                let addr = ip(i);
                assert!(registry.add(addr));
                assert!(registry.contains(addr));
                assert!(registry.remove(addr));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..32 {
        assert!(!registry.contains(ip(i)));
    }
}
