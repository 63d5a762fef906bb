//! Typed access to torrent metadata.
//!
//! A `.torrent` file is one bencoded dictionary. This module decodes it and
//! lifts the conventional fields into a [`Metainfo`], computing the
//! info-hash from the canonical re-encoding of the decoded `info` value.
//! Text conversion of announce URLs, names, and paths happens here, lossily;
//! the codec itself never interprets byte strings as text.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::codec::decode;
use crate::error::MetainfoError;
use crate::hash::{INFO_HASH_LEN, InfoHash};
use crate::model::Value;

/// A single file entry in a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File length in bytes.
    pub length: u64,
    /// Path components relative to the torrent root directory.
    pub path: Vec<String>,
}

/// Parsed torrent metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metainfo {
    /// Tracker announce URL.
    pub announce: String,
    /// Suggested name for the file or directory.
    pub name: String,
    /// SHA-1 of the canonical encoding of the `info` dictionary.
    pub info_hash: InfoHash,
    /// Length of each piece in bytes.
    pub piece_length: u64,
    /// SHA-1 digest of each piece, in order.
    pub pieces: Vec<[u8; INFO_HASH_LEN]>,
    /// Total length in bytes (single-file torrents).
    pub length: Option<u64>,
    /// File entries (multi-file torrents).
    pub files: Option<Vec<FileEntry>>,
}

impl Metainfo {
    /// Parses torrent metadata from a complete bencoded buffer.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, MetainfoError> {
        let root = decode(buf)?;
        let root = root.as_dict().map_err(|_| MetainfoError::NotADictionary)?;

        let info_value = required(root, "info")?;
        let info = info_value
            .as_dict()
            .map_err(|source| MetainfoError::FieldType {
                field: "info",
                source,
            })?;
        let info_hash = InfoHash::of(info_value);

        let announce = required_string(root, "announce")?;
        let name = required_string(info, "name")?;
        let piece_length = required_u64(info, "piece length")?;

        let pieces_bytes = required(info, "pieces")?
            .as_bytes()
            .map_err(|source| MetainfoError::FieldType {
                field: "pieces",
                source,
            })?;
        if pieces_bytes.len() % INFO_HASH_LEN != 0 {
            return Err(MetainfoError::InvalidPieces {
                len: pieces_bytes.len(),
            });
        }
        let pieces = pieces_bytes
            .chunks_exact(INFO_HASH_LEN)
            .map(|chunk| {
                let mut hash = [0u8; INFO_HASH_LEN];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();

        let length = optional_u64(info, "length")?;
        let files = parse_files(info)?;
        if length.is_none() && files.is_none() {
            return Err(MetainfoError::MissingField("length"));
        }

        Ok(Metainfo {
            announce,
            name,
            info_hash,
            piece_length,
            pieces,
            length,
            files,
        })
    }

    /// Total content length across all files.
    pub fn total_length(&self) -> u64 {
        if let Some(length) = self.length {
            length
        } else {
            self.files
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|file| file.length)
                .sum()
        }
    }
}

fn required<'a>(
    dict: &'a BTreeMap<Bytes, Value>,
    field: &'static str,
) -> Result<&'a Value, MetainfoError> {
    dict.get(field.as_bytes())
        .ok_or(MetainfoError::MissingField(field))
}

fn required_string(
    dict: &BTreeMap<Bytes, Value>,
    field: &'static str,
) -> Result<String, MetainfoError> {
    let bytes = required(dict, field)?
        .as_bytes()
        .map_err(|source| MetainfoError::FieldType { field, source })?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn required_u64(dict: &BTreeMap<Bytes, Value>, field: &'static str) -> Result<u64, MetainfoError> {
    let value = required(dict, field)?
        .as_integer()
        .map_err(|source| MetainfoError::FieldType { field, source })?;
    u64::try_from(value).map_err(|_| MetainfoError::FieldRange { field })
}

fn optional_u64(
    dict: &BTreeMap<Bytes, Value>,
    field: &'static str,
) -> Result<Option<u64>, MetainfoError> {
    match dict.get(field.as_bytes()) {
        None => Ok(None),
        Some(value) => {
            let value = value
                .as_integer()
                .map_err(|source| MetainfoError::FieldType { field, source })?;
            u64::try_from(value)
                .map(Some)
                .map_err(|_| MetainfoError::FieldRange { field })
        }
    }
}

fn parse_files(
    info: &BTreeMap<Bytes, Value>,
) -> Result<Option<Vec<FileEntry>>, MetainfoError> {
    let Some(value) = info.get(b"files".as_slice()) else {
        return Ok(None);
    };
    let list = value
        .as_list()
        .map_err(|source| MetainfoError::FieldType {
            field: "files",
            source,
        })?;
    let mut entries = Vec::with_capacity(list.len());
    for entry in list {
        let entry = entry.as_dict().map_err(|source| MetainfoError::FieldType {
            field: "files",
            source,
        })?;
        let length = required_u64(entry, "length")?;
        let path_list = required(entry, "path")?
            .as_list()
            .map_err(|source| MetainfoError::FieldType {
                field: "path",
                source,
            })?;
        let mut path = Vec::with_capacity(path_list.len());
        for component in path_list {
            let component = component
                .as_bytes()
                .map_err(|source| MetainfoError::FieldType {
                    field: "path",
                    source,
                })?;
            path.push(String::from_utf8_lossy(component).into_owned());
        }
        entries.push(FileEntry { length, path });
    }
    Ok(Some(entries))
}
