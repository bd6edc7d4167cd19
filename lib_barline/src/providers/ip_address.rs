//! IPv4 address of one network adapter.

use std::net::{IpAddr, Ipv4Addr};

use local_ip_address::list_afinet_netifas;

use crate::core::block::Block;
use crate::core::color::ColorSet;
use crate::core::generator::{BlockGenerator, GenerationError, Identity};

/// Returns the first IPv4 address bound to `adapter` (matched case-insensitively).
pub fn find_ipv4(interfaces: &[(String, IpAddr)], adapter: &str) -> Option<Ipv4Addr> {
    interfaces.iter().find_map(|(name, addr)| match addr {
        IpAddr::V4(v4) if name.eq_ignore_ascii_case(adapter) => Some(*v4),
        _ => None,
    })
}

/// Shows the adapter's address in good, or `<adapter> no IP` in bad.
#[derive(Debug, Clone)]
pub struct IpAddress {
    adapter: String,
}

impl IpAddress {
    /// Block name.
    pub const NAME: &'static str = "ipAddr";

    /// Watches `adapter` (e.g. `wlp0s20f3`).
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
        }
    }

    /// Builds the block for a lookup result.
    pub fn render(&self, address: Option<Ipv4Addr>, colors: &ColorSet) -> Block {
        let block = Block::new(Self::NAME, "").with_instance(self.adapter.clone());
        match address {
            Some(address) => Block {
                full_text: address.to_string(),
                text_color: colors.good,
                ..block
            },
            None => Block {
                full_text: format!("{} no IP", self.adapter),
                short_text: "no IP".to_string(),
                text_color: colors.bad,
                ..block
            },
        }
    }
}

impl BlockGenerator for IpAddress {
    fn identity(&self) -> Identity {
        Identity::new(Self::NAME, self.adapter.clone())
    }

    fn generate(&self, colors: &ColorSet) -> Result<Option<Block>, GenerationError> {
        let interfaces =
            list_afinet_netifas().map_err(|e| GenerationError::Execution(e.to_string()))?;
        Ok(Some(self.render(find_ipv4(&interfaces, &self.adapter), colors)))
    }

    fn cadence(&self) -> Option<u32> {
        Some(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn interfaces() -> Vec<(String, IpAddr)> {
        vec![
            ("lo".into(), IpAddr::V4(Ipv4Addr::LOCALHOST)),
            ("wlp0s20f3".into(), IpAddr::V6(Ipv6Addr::LOCALHOST)),
            ("wlp0s20f3".into(), IpAddr::V4(Ipv4Addr::new(192, 168, 1, 23))),
        ]
    }

    #[test]
    fn picks_first_ipv4_of_adapter() {
        assert_eq!(
            find_ipv4(&interfaces(), "WLP0S20F3"),
            Some(Ipv4Addr::new(192, 168, 1, 23))
        );
        assert_eq!(find_ipv4(&interfaces(), "eth0"), None);
    }

    #[test]
    fn renders_address_or_warning() {
        let ip = IpAddress::new("eth0");
        let colors = ColorSet::default();

        let up = ip.render(Some(Ipv4Addr::new(10, 0, 0, 2)), &colors);
        assert_eq!(up.full_text, "10.0.0.2");
        assert_eq!(up.text_color, colors.good);
        assert_eq!(up.instance, "eth0");

        let down = ip.render(None, &colors);
        assert_eq!(down.full_text, "eth0 no IP");
        assert_eq!(down.short_text, "no IP");
        assert_eq!(down.text_color, colors.bad);
    }
}
