use core::fmt;
use core::str::FromStr;

/// Radio hardware address, six bytes as used by ESP-NOW peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub const LEN: usize = 6;

    pub const BROADCAST: Self = Self([0xFF; 6]);

    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Reads an address from the first six bytes of `data`
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let bytes: [u8; 6] = data.get(..Self::LEN)?.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacParseError;

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid MAC address")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MacParseError {}

impl FromStr for MacAddress {
    type Err = MacParseError;

    /// Accepts `aa:bb:cc:dd:ee:ff`, `aa-bb-..` or twelve bare hex digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 6];
        let mut count = 0;
        let mut digits = s.bytes().filter(|b| *b != b':' && *b != b'-');

        loop {
            let Some(hi) = digits.next() else { break };
            let lo = digits.next().ok_or(MacParseError)?;
            if count == Self::LEN {
                return Err(MacParseError);
            }
            bytes[count] = (hex_value(hi)? << 4) | hex_value(lo)?;
            count += 1;
        }

        if count != Self::LEN {
            return Err(MacParseError);
        }
        Ok(Self(bytes))
    }
}

fn hex_value(digit: u8) -> Result<u8, MacParseError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(MacParseError),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_display_is_lowercase_colon_hex() {
        let mac = MacAddress::new([0xAA, 0xBB, 0xCC, 0x01, 0x02, 0x0F]);
        assert_eq!(mac.to_string(), "aa:bb:cc:01:02:0f");
    }

    #[test]
    fn test_parse_formats() {
        let expected = MacAddress::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!("AA:BB:CC:DD:EE:FF".parse::<MacAddress>(), Ok(expected));
        assert_eq!("aa-bb-cc-dd-ee-ff".parse::<MacAddress>(), Ok(expected));
        assert_eq!("aabbccddeeff".parse::<MacAddress>(), Ok(expected));
    }

    #[test]
    fn test_parse_errors() {
        assert!("aa:bb:cc:dd:ee".parse::<MacAddress>().is_err());
        assert!("aa:bb:cc:dd:ee:ff:00".parse::<MacAddress>().is_err());
        assert!("aa:bb:cc:dd:ee:fg".parse::<MacAddress>().is_err());
        assert!("aa:bb:cc:dd:ee:f".parse::<MacAddress>().is_err());
    }

    #[test]
    fn test_from_slice_and_broadcast() {
        assert_eq!(MacAddress::from_slice(&[1, 2, 3]), None);
        let mac = MacAddress::from_slice(&[0xFF; 8]).unwrap();
        assert!(mac.is_broadcast());
    }
}
