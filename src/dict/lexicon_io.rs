use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use super::lexicon::Lexicon;
use super::toml_source::LexiconData;
use super::DictError;

pub const MAGIC: &[u8; 4] = b"SNLX";
pub const VERSION: u8 = 1;
const HEADER_SIZE: usize = 5; // 4 bytes magic + 1 byte version

fn validate_header(data: &[u8]) -> Result<(), DictError> {
    if data.len() < HEADER_SIZE {
        return Err(DictError::InvalidHeader);
    }
    if &data[..4] != MAGIC {
        return Err(DictError::InvalidMagic);
    }
    if data[4] != VERSION {
        return Err(DictError::UnsupportedVersion(data[4]));
    }
    Ok(())
}

impl Lexicon {
    /// Serialize to the compiled binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let encoded = bincode::serialize(&self.to_data()).map_err(DictError::Serialize)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + encoded.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&encoded);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        validate_header(data)?;
        let payload: LexiconData =
            bincode::deserialize(&data[HEADER_SIZE..]).map_err(DictError::Deserialize)?;
        Self::from_data(payload)
    }

    /// Open a compiled lexicon through a read-only memory map.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is only read
        // while it is decoded below; nothing borrows it afterwards.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    /// Save compiled binary to file.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }

    /// Load either a TOML source (`.toml`) or a compiled binary.
    pub fn load(path: &Path) -> Result<Self, DictError> {
        if path.extension().is_some_and(|ext| ext == "toml") {
            let text = fs::read_to_string(path)?;
            Self::from_toml(&text)
        } else {
            Self::open(path)
        }
    }
}
