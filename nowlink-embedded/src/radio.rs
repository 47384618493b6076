use nowlink_api::MacAddress;

/// Connectionless packet radio (ESP-NOW or similar).
///
/// `send` only reports whether the packet was handed to the radio; it says
/// nothing about delivery to the peer.
pub trait Radio {
    type Error: core::fmt::Debug;

    fn send(&mut self, peer: &MacAddress, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<R: Radio + ?Sized> Radio for &mut R {
    type Error = R::Error;

    fn send(&mut self, peer: &MacAddress, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).send(peer, payload)
    }
}
