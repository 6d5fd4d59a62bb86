use lazy_static::lazy_static;
use regex::Captures;
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

const BITS: u8 = 32;

/// The one way construction or parsing of a block can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CIDR block: {0}")]
pub struct InvalidCidrBlock(String);

/// One IPv4 network prefix, `a.b.c.d/mask` with `mask` in `0..=31`.
///
/// The address is kept exactly as given; host bits are not zeroed at
/// construction, so a block formats back to the text it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4CidrBlock {
    addr: Ipv4Addr,
    mask: u8,
}

impl Ipv4CidrBlock {
    pub fn new(addr: Ipv4Addr, mask: u8) -> Result<Self, InvalidCidrBlock> {
        if mask >= BITS {
            return Err(InvalidCidrBlock(format!(
                "mask {} not in 0..={}",
                mask,
                BITS - 1
            )));
        }
        Ok(Ipv4CidrBlock { addr, mask })
    }

    pub fn from_octets(a: u8, b: u8, c: u8, d: u8, mask: u8) -> Result<Self, InvalidCidrBlock> {
        Self::new(Ipv4Addr::new(a, b, c, d), mask)
    }

    pub fn address(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn octets(&self) -> [u8; 4] {
        self.addr.octets()
    }

    /// Network mask: `mask` leading one-bits, then zeros.
    pub fn netmask_bits(&self) -> u32 {
        match self.mask {
            0 => 0, // << 32 overflows u32
            mask => u32::MAX << (BITS - mask),
        }
    }

    /// Host mask: `mask` leading zero-bits, then ones.
    pub fn hostmask_bits(&self) -> u32 {
        !self.netmask_bits()
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.netmask_bits())
    }

    /// Lowest address in the block.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.netmask_bits())
    }

    /// Highest address in the block, whether or not the stored address
    /// already has its host bits zeroed.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.netmask_bits() | self.hostmask_bits())
    }

    pub fn address_count(&self) -> u64 {
        1u64 << (BITS - self.mask)
    }

    /// Addresses left after reserving network and broadcast.
    /// Not clamped: a `/31` yields 0.
    pub fn usable_address_count(&self) -> i64 {
        self.address_count() as i64 - 2
    }
}

impl FromStr for Ipv4CidrBlock {
    type Err = InvalidCidrBlock;

    /// Accepts five base-10 integer fields split by `.` or `/` in any
    /// arrangement, `a b c d mask` in order. The pattern fixes the shape
    /// only; field ranges are checked by [`Ipv4CidrBlock::from_octets`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(r"^([0-9]+)[./]([0-9]+)[./]([0-9]+)[./]([0-9]+)[./]([0-9]+)$").unwrap();
        }
        fn field<'t>(ind: usize, caps: &Captures<'t>) -> Result<u8, InvalidCidrBlock> {
            caps[ind]
                .parse()
                .map_err(|_| InvalidCidrBlock(format!("field {} out of range", &caps[ind])))
        }

        match RE.captures(s) {
            Some(ref caps) => Ipv4CidrBlock::from_octets(
                field(1, caps)?,
                field(2, caps)?,
                field(3, caps)?,
                field(4, caps)?,
                field(5, caps)?,
            ),
            _ => Err(InvalidCidrBlock(format!(
                "expected five integer fields, got {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for Ipv4CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

/// Parses `text` and renders one summary line,
/// `"{text}: {lowest} - {highest} ({count})\n"`.
pub fn range_summary(text: &str) -> Result<String, InvalidCidrBlock> {
    let block: Ipv4CidrBlock = text.parse()?;
    Ok(format!(
        "{}: {} - {} ({})\n",
        text,
        block.address(),
        block.broadcast(),
        block.address_count()
    ))
}
