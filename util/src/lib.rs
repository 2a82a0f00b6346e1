use std::{error::Error, fmt};

/// Byte order for every word that crosses an I/O boundary.
///
/// The image format is little-endian regardless of the host, so the whole
/// workspace funnels through this alias instead of naming an endianness
/// directly.
pub type Endian = byteorder::LittleEndian;

/// Error produced when a string does not name a known enum variant.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to parse \"{}\" as {}.",
            &self.value, &self.enum_name
        )
    }
}

impl Error for ParseEnumError {}
