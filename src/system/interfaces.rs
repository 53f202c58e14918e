//! Local network interface discovery.
//!
//! Only interfaces that are administratively up and carry no IPv4 link-local
//! (`169.254.0.0/16`) address are offered as send interfaces: a link-local
//! address means the interface never obtained a routable lease.
use std::net::IpAddr;

use crate::error::InterfaceError;

/// One address record reported by the OS for an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    pub name: String,
    pub up: bool,
    pub addr: Option<IpAddr>,
}

/// Lists the names of interfaces usable for sending load, in discovery order.
///
/// # Errors
///
/// Returns an error when the OS interface table cannot be read.
pub fn list_interfaces() -> Result<Vec<String>, InterfaceError> {
    let entries = read_entries()?;
    Ok(usable_interfaces(&entries))
}

/// Filters raw address records down to usable interface names.
#[must_use]
pub fn usable_interfaces(entries: &[InterfaceEntry]) -> Vec<String> {
    let link_local: Vec<&str> = entries
        .iter()
        .filter(|entry| is_link_local_v4(entry.addr))
        .map(|entry| entry.name.as_str())
        .collect();

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        if !entry.up || link_local.contains(&entry.name.as_str()) {
            continue;
        }
        if names.iter().any(|name| name == &entry.name) {
            continue;
        }
        names.push(entry.name.clone());
    }
    names
}

fn is_link_local_v4(addr: Option<IpAddr>) -> bool {
    matches!(addr, Some(IpAddr::V4(v4)) if v4.is_link_local())
}

/// First address of `name`, preferring IPv4; used as the source address where
/// the platform cannot bind a socket to a device.
///
/// # Errors
///
/// Returns an error when the OS interface table cannot be read.
#[cfg(all(
    unix,
    not(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))
))]
pub fn interface_address(name: &str) -> Result<Option<IpAddr>, InterfaceError> {
    let entries = read_entries()?;
    let mut candidates = entries
        .iter()
        .filter(|entry| entry.name == name)
        .filter_map(|entry| entry.addr);
    let first = candidates.next();
    Ok(first
        .filter(IpAddr::is_ipv4)
        .or_else(|| candidates.find(IpAddr::is_ipv4))
        .or(first))
}

#[cfg(unix)]
fn read_entries() -> Result<Vec<InterfaceEntry>, InterfaceError> {
    use std::ffi::CStr;

    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
    // Safety: getifaddrs only writes the list head; we free it below.
    let rc = unsafe { libc::getifaddrs(&mut head) };
    if rc != 0 {
        return Err(InterfaceError::Enumerate {
            source: std::io::Error::last_os_error(),
        });
    }

    let up_flag = libc::IFF_UP as libc::c_uint;
    let mut entries = Vec::new();
    let mut cursor = head;
    while !cursor.is_null() {
        // Safety: cursor is a non-null node of the list returned by getifaddrs.
        let ifa = unsafe { &*cursor };
        if !ifa.ifa_name.is_null() {
            // Safety: ifa_name is a NUL-terminated string owned by the list.
            let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
                .to_string_lossy()
                .into_owned();
            // Safety: ifa_addr is null or points at a sockaddr owned by the list.
            let addr = unsafe { sockaddr_ip(ifa.ifa_addr) };
            entries.push(InterfaceEntry {
                name,
                up: ifa.ifa_flags & up_flag != 0,
                addr,
            });
        }
        cursor = ifa.ifa_next;
    }

    // Safety: head came from a successful getifaddrs call and is freed once.
    unsafe { libc::freeifaddrs(head) };
    Ok(entries)
}

#[cfg(not(unix))]
fn read_entries() -> Result<Vec<InterfaceEntry>, InterfaceError> {
    Err(InterfaceError::Unsupported)
}

/// # Safety
///
/// `addr` must be null or point at a valid, properly aligned `sockaddr` whose
/// storage matches its `sa_family`.
#[cfg(unix)]
unsafe fn sockaddr_ip(addr: *const libc::sockaddr) -> Option<IpAddr> {
    use std::net::{Ipv4Addr, Ipv6Addr};

    if addr.is_null() {
        return None;
    }
    // Safety: addr is non-null and valid per the caller contract.
    let family = i32::from(unsafe { (*addr).sa_family });
    match family {
        libc::AF_INET => {
            // Safety: AF_INET entries are backed by a sockaddr_in.
            let sin = unsafe { &*addr.cast::<libc::sockaddr_in>() };
            Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(
                sin.sin_addr.s_addr,
            ))))
        }
        libc::AF_INET6 => {
            // Safety: AF_INET6 entries are backed by a sockaddr_in6.
            let sin6 = unsafe { &*addr.cast::<libc::sockaddr_in6>() };
            Some(IpAddr::V6(Ipv6Addr::from(sin6.sin6_addr.s6_addr)))
        }
        _ => None,
    }
}
