//! Program image files for the tvm virtual machine.
//!
//! An image is a flat stream of 8-byte little-endian words with no header,
//! no sections and no relocation data: what the assembler emits is exactly
//! what the machine fetches, starting at byte offset zero. This crate only
//! wraps that stream in an [`Image`] container and moves it in and out of
//! readers, writers and files.
//!
//! [`Image`]: struct.Image.html

use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A complete program image.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Image {
    bytes: Vec<u8>,
}

impl Image {
    pub fn from(bytes: Vec<u8>) -> Image {
        Image { bytes }
    }

    pub fn copy_from(bytes: &[u8]) -> Image {
        Image {
            bytes: Vec::from(bytes),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Image> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(Image::from(bytes))
}

pub fn write<W: Write>(writer: &mut W, image: &Image) -> std::io::Result<()> {
    writer.write_all(&image.bytes[..])
}

pub trait ReadTviExt: Read + Sized {
    fn read_tvi(&mut self) -> std::io::Result<Image> {
        read(self)
    }
}

impl<R: Read + Sized> ReadTviExt for R {}

pub trait WriteTviExt: Write + Sized {
    fn write_tvi(&mut self, image: &Image) -> std::io::Result<()> {
        write(self, image)
    }
}

impl<W: Write + Sized> WriteTviExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Image> {
    BufReader::new(File::open(path)?).read_tvi()
}

pub fn write_file<P: AsRef<Path>>(path: P, image: &Image) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_tvi(image)?;
    writer.flush()
}
