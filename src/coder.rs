//! Seams for contract call encoding. The client never interprets call data itself; it
//! forwards whatever an `Encoder` produces and hands raw results to a `Decoder`.

use anyhow::Result;

/// Produces hex-encoded transaction or call data for a business-level request.
pub trait Encoder {
    fn encode(&self) -> Result<String>;
}

/// Parses the hex output of a call, without its `0x` prefix, into a business-level value.
pub trait Decoder {
    type Output;

    fn decode(&self, hex: &str) -> Result<Self::Output>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn encode(&self) -> Result<String> {
        (**self).encode()
    }
}

impl<D: Decoder + ?Sized> Decoder for &D {
    type Output = D::Output;

    fn decode(&self, hex: &str) -> Result<Self::Output> {
        (**self).decode(hex)
    }
}

/// Contract creation data: the compiled bytecode, sent as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bytecode(pub String);

impl Bytecode {
    pub fn new(bytecode: impl Into<String>) -> Self {
        Self(bytecode.into())
    }
}

impl Encoder for Bytecode {
    fn encode(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Decodes call output into raw bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexBytes;

impl Decoder for HexBytes {
    type Output = Vec<u8>;

    fn decode(&self, hex: &str) -> Result<Vec<u8>> {
        Ok(hex::decode(hex)?)
    }
}
