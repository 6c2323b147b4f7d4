//! JSON load/save for arbitrary serde types

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

use super::error::{CodecError, Outcome, StorageError};
use super::fs::{open_text_reader, open_text_writer, strip_bom};

/// Encode/decode capability used by the persistence functions
pub trait JsonCodec {
    /// Write `value` to `writer`
    fn encode<T, W>(&self, writer: W, value: &T) -> Result<(), CodecError>
    where
        T: Serialize + ?Sized,
        W: Write;

    /// Decode `text`. Returns `Ok(None)` when there is nothing to decode.
    fn decode<T>(&self, text: &str) -> Result<Option<T>, CodecError>
    where
        T: DeserializeOwned;
}

/// [`JsonCodec`] backed by serde_json
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerdeJsonCodec {
    /// Indent output
    pub pretty: bool,
}

impl SerdeJsonCodec {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl JsonCodec for SerdeJsonCodec {
    fn encode<T, W>(&self, writer: W, value: &T) -> Result<(), CodecError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, value)
        } else {
            serde_json::to_writer(writer, value)
        };
        result.map_err(classify)
    }

    fn decode<T>(&self, text: &str) -> Result<Option<T>, CodecError>
    where
        T: DeserializeOwned,
    {
        if text.trim().is_empty() {
            return Ok(None);
        }
        // `null` decodes to None
        serde_json::from_str::<Option<T>>(text).map_err(classify)
    }
}

fn classify(err: serde_json::Error) -> CodecError {
    use serde_json::error::Category;

    match err.classify() {
        Category::Io => CodecError::Io(err.into()),
        Category::Syntax | Category::Eof => CodecError::Syntax(Box::new(err)),
        Category::Data => CodecError::Data(Box::new(err)),
    }
}

/// Save `value` as JSON at `path` with the default codec
pub fn save_json<T>(path: &Path, value: &T) -> Outcome
where
    T: Serialize + ?Sized,
{
    save_json_with(&SerdeJsonCodec::default(), path, value)
}

/// Save `value` as JSON at `path`.
///
/// Creates or truncates the file; the parent directory must exist. A failed
/// save may leave a partially written file behind.
pub fn save_json_with<C, T>(codec: &C, path: &Path, value: &T) -> Outcome
where
    C: JsonCodec,
    T: Serialize + ?Sized,
{
    let mut writer = open_text_writer(path)?;
    codec
        .encode(&mut writer, value)
        .map_err(|e| StorageError::encode(path, e))?;
    writer.flush().map_err(|e| StorageError::io(path, e))?;
    debug!("Saved {:?}", path);
    Ok(())
}

/// Load a JSON file with the default codec
pub fn load_json<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned,
{
    load_json_with(&SerdeJsonCodec::default(), path)
}

/// Load a JSON file.
///
/// A missing file is reported as [`StorageError::NotFound`], empty or `null`
/// content as [`StorageError::Empty`], and undecodable content as
/// [`StorageError::Parse`] or [`StorageError::Structure`].
pub fn load_json_with<C, T>(codec: &C, path: &Path) -> Result<T, StorageError>
where
    C: JsonCodec,
    T: DeserializeOwned,
{
    let mut text = String::new();
    open_text_reader(path)?
        .read_to_string(&mut text)
        .map_err(|e| StorageError::io(path, e))?;

    match codec.decode(strip_bom(&text)) {
        Ok(Some(value)) => {
            debug!("Loaded {:?}", path);
            Ok(value)
        }
        Ok(None) => Err(StorageError::empty(path)),
        Err(e) => Err(StorageError::decode(path, e)),
    }
}

/// Load a JSON file or fall back to `T::default()`.
///
/// The returned error is `None` when loading succeeded or the file was
/// merely missing; otherwise it explains why the defaults were used.
pub fn load_json_or_default<T>(path: &Path) -> (T, Option<StorageError>)
where
    T: DeserializeOwned + Default,
{
    match load_json(path) {
        Ok(value) => (value, None),
        Err(e) if e.is_not_found() => (T::default(), None),
        Err(e) => (T::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Catalog {
        version: u32,
        species: Vec<String>,
    }

    fn catalog() -> Catalog {
        Catalog {
            version: 3,
            species: vec!["Raptor".to_string(), "Rex".to_string()],
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");

        save_json(&path, &catalog()).unwrap();
        let loaded: Catalog = load_json(&path).unwrap();

        assert_eq!(loaded, catalog());
    }

    #[test]
    fn test_default_codec_writes_compact_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");

        save_json(&path, &catalog()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, r#"{"version":3,"species":["Raptor","Rex"]}"#);
    }

    #[test]
    fn test_pretty_codec_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        let codec = SerdeJsonCodec::pretty();

        save_json_with(&codec, &path, &catalog()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains('\n'));

        let loaded: Catalog = load_json_with(&codec, &path).unwrap();
        assert_eq!(loaded, catalog());
    }

    #[test]
    fn test_save_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, "x".repeat(1024)).unwrap();

        save_json(&path, &1u8).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1");
    }

    #[test]
    fn test_save_without_parent_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("values.json");

        let err = save_json(&path, &catalog()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.to_string().contains("values.json"));
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_save_unserializable_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "non-string key");

        let err = save_json(&path, &map).unwrap_err();
        assert!(matches!(err, StorageError::Serialize { .. }));
        assert!(err.path().is_absolute());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_json::<Catalog>(&dir.path().join("none.json")).unwrap_err();

        assert!(err.is_not_found());
        assert!(err.user_message().is_none());
    }

    #[test]
    fn test_load_null_and_empty_content() {
        let dir = tempdir().unwrap();
        for content in ["null", "", "  \n"] {
            let path = dir.path().join("values.json");
            fs::write(&path, content).unwrap();

            let err = load_json::<Catalog>(&path).unwrap_err();
            assert!(matches!(err, StorageError::Empty { .. }), "{:?}", content);
            assert!(err.user_message().unwrap().contains("no readable data"));
        }
    }

    #[test]
    fn test_load_ignores_byte_order_mark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, "\u{feff}{\"version\": 3, \"species\": [\"Rex\"]}").unwrap();

        let loaded: Catalog = load_json(&path).unwrap();
        assert_eq!(loaded.version, 3);
        assert_eq!(loaded.species, vec!["Rex".to_string()]);
    }

    #[test]
    fn test_load_byte_order_mark_only_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, "\u{feff}").unwrap();

        let err = load_json::<Catalog>(&path).unwrap_err();
        assert!(matches!(err, StorageError::Empty { .. }));
        assert!(err.user_message().unwrap().contains("no readable data"));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, "{\"version\": 3,").unwrap();

        let err = load_json::<Catalog>(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        assert!(!err.user_message().unwrap().is_empty());
    }

    #[test]
    fn test_load_wrong_structure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");
        fs::write(&path, r#"{"version": "three", "species": []}"#).unwrap();

        let err = load_json::<Catalog>(&path).unwrap_err();
        assert!(matches!(err, StorageError::Structure { .. }));
        assert!(err.to_string().contains("values.json"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.json");

        let (value, err) = load_json_or_default::<Catalog>(&path);
        assert_eq!(value, Catalog::default());
        assert!(err.is_none());

        fs::write(&path, "[1,2]").unwrap();
        let (value, err) = load_json_or_default::<Catalog>(&path);
        assert_eq!(value, Catalog::default());
        assert!(err.is_some());

        save_json(&path, &catalog()).unwrap();
        let (value, err) = load_json_or_default::<Catalog>(&path);
        assert_eq!(value, catalog());
        assert!(err.is_none());
    }

    #[test]
    fn test_decode_json_value() {
        let codec = SerdeJsonCodec::default();
        let value: Option<serde_json::Value> = codec.decode(r#"{"a": 1}"#).unwrap();
        assert_eq!(value.unwrap()["a"], serde_json::json!(1));

        let value: Option<serde_json::Value> = codec.decode("null").unwrap();
        assert!(value.is_none());
    }
}
