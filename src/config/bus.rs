//! I2C identity of this board and of its peers on the body bus

use crate::{Error, Result};

/// 7-bit I2C address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BusAddress(u8);

impl BusAddress {
    /// Panics (at compile time when used in a `const`) for anything above `0x7F`.
    pub const fn new(address: u8) -> Self {
        assert!(address <= 0x7F, "I2C addresses are 7 bits wide");
        Self(address)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Value for the TWI slave address register (address in bits 7..1).
    #[inline]
    pub const fn slave_register(self) -> u8 {
        self.0 << 1
    }
}

/// Devices the body expander shares the bus with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peer {
    /// Main Stealth controller, master of the body bus.
    StealthController,
    BodyExpander,
    DomeExpander,
    /// Rseries logics (Teensy version).
    Logics,
    MagicPanel,
    FrontPsi,
    RearPsi,
    /// FlthyHP breakout board.
    FlthyHp,
    PeriscopeLifter,
}

impl Peer {
    pub const ALL: [Peer; 9] = [
        Peer::StealthController,
        Peer::BodyExpander,
        Peer::DomeExpander,
        Peer::Logics,
        Peer::MagicPanel,
        Peer::FrontPsi,
        Peer::RearPsi,
        Peer::FlthyHp,
        Peer::PeriscopeLifter,
    ];

    pub const fn address(self) -> BusAddress {
        match self {
            Peer::StealthController => BusAddress::new(0),
            Peer::BodyExpander => BusAddress::new(9),
            Peer::DomeExpander => BusAddress::new(12),
            Peer::Logics => BusAddress::new(10),
            Peer::MagicPanel => BusAddress::new(20),
            Peer::FrontPsi => BusAddress::new(22),
            Peer::RearPsi => BusAddress::new(23),
            Peer::FlthyHp => BusAddress::new(25),
            Peer::PeriscopeLifter => BusAddress::new(32),
        }
    }

    pub fn from_address(address: u8) -> Result<Peer> {
        Peer::ALL
            .iter()
            .copied()
            .find(|peer| peer.address().get() == address)
            .ok_or(Error::UnknownPeer(address))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Peer::StealthController => "Stealth controller",
            Peer::BodyExpander => "Body servo expander",
            Peer::DomeExpander => "Dome servo expander",
            Peer::Logics => "Rseries logics",
            Peer::MagicPanel => "Magic panel",
            Peer::FrontPsi => "Front PSI",
            Peer::RearPsi => "Rear PSI",
            Peer::FlthyHp => "FlthyHP breakout",
            Peer::PeriscopeLifter => "Periscope lifter",
        }
    }
}

/// Address this board answers to.
pub const I2C_ADDRESS: BusAddress = Peer::BodyExpander.address();

const fn addresses_are_unique(peers: &[Peer]) -> bool {
    let mut i = 0;
    while i < peers.len() {
        let mut j = i + 1;
        while j < peers.len() {
            if peers[i].address().get() == peers[j].address().get() {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    addresses_are_unique(&Peer::ALL),
    "two peers share an I2C address"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_address_is_nine() {
        assert_eq!(I2C_ADDRESS.get(), 9);
        assert_eq!(I2C_ADDRESS.slave_register(), 18);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(Peer::from_address(12), Ok(Peer::DomeExpander));
        assert_eq!(Peer::from_address(0), Ok(Peer::StealthController));
        assert_eq!(Peer::from_address(11), Err(Error::UnknownPeer(11)));
    }

    #[test]
    fn every_peer_round_trips_through_its_address() {
        for peer in Peer::ALL {
            assert_eq!(Peer::from_address(peer.address().get()), Ok(peer));
        }
    }

    #[test]
    #[should_panic]
    fn eight_bit_address_is_rejected() {
        let _ = BusAddress::new(0x80);
    }
}
