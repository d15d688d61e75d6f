// Interfaces from getifaddrs(3) merged with <sys>/class/net/<iface> counters

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;

use nix::ifaddrs::getifaddrs;
use statio_platform::system_info::NetworkInfo;

use crate::error::{SourceError, SourceResult};
use crate::text::read_first_line;

pub fn collect_network_info(sys_root: &Path) -> Vec<NetworkInfo> {
    let addresses = match interface_addresses() {
        Ok(addresses) => addresses,
        Err(e) => {
            tracing::warn!("interface enumeration failed: {}", e);
            return Vec::new();
        }
    };

    let class_net = sys_root.join("class").join("net");
    group_interfaces(addresses)
        .into_values()
        .map(|mut entry| {
            fill_link_stats(&mut entry, &class_net);
            entry
        })
        .collect()
}

/// One `(name, ipv4)` pair per address-list entry; non-IPv4 families and
/// address-less entries carry `None`.
fn interface_addresses() -> SourceResult<Vec<(String, Option<Ipv4Addr>)>> {
    let addrs = getifaddrs().map_err(|source| SourceError::Query {
        call: "getifaddrs",
        source,
    })?;

    Ok(addrs
        .map(|ifaddr| {
            let ipv4 = ifaddr
                .address
                .as_ref()
                .and_then(|addr| addr.as_sockaddr_in())
                .map(|sin| *SocketAddrV4::from(*sin).ip());
            (ifaddr.interface_name, ipv4)
        })
        .collect())
}

/// Group address entries by interface name. Every name gets an entry, with
/// or without an address; a later IPv4 address replaces an earlier one.
pub fn group_interfaces<I>(addresses: I) -> BTreeMap<String, NetworkInfo>
where
    I: IntoIterator<Item = (String, Option<Ipv4Addr>)>,
{
    let mut by_name: BTreeMap<String, NetworkInfo> = BTreeMap::new();

    for (name, ipv4) in addresses {
        let entry = by_name
            .entry(name)
            .or_insert_with_key(|name| NetworkInfo::named(name.clone()));
        if let Some(ip) = ipv4 {
            entry.ipv4 = ip.to_string();
        }
    }

    by_name
}

/// Hardware address and byte counters from the interface's sysfs directory.
/// Each counter falls back to 0 on its own.
pub fn fill_link_stats(entry: &mut NetworkInfo, class_net: &Path) {
    let iface_dir = class_net.join(&entry.name);

    entry.mac = read_first_line(&iface_dir.join("address"));
    entry.rx_bytes = parse_counter(&read_first_line(&iface_dir.join("statistics/rx_bytes")));
    entry.tx_bytes = parse_counter(&read_first_line(&iface_dir.join("statistics/tx_bytes")));
}

fn parse_counter(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}
