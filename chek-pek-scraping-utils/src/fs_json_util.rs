use std::{
    fmt::Debug,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| serde_json::from_reader(BufReader::new(File::open(&path)?)).map_err(anyhow::Error::new))()
        .with_context(|| {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        })
}

/// Like `read_json`, but a missing file yields `None` instead of an error.
pub fn read_json_if_exists<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<Option<T>> {
    let path = path.into();
    if !path.try_exists()? {
        return Ok(None);
    }
    read_json(path).map(Some)
}

/// Writes `value` indented by four spaces.
/// Non-ASCII characters are written as-is, since `serde_json` never escapes them.
pub fn write_json_pretty<P: Into<PathBuf>, T: Serialize>(
    path: P,
    value: &T,
) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{read_json, read_json_if_exists, write_json_pretty};

    #[test]
    fn pretty_json_keeps_cyrillic() {
        let dir = std::env::temp_dir().join(format!("chek-pek-utils-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let path = dir.join("pretty.json");
        write_json_pretty(&path, &vec!["Наличные"]).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "[\n    \"Наличные\"\n]"
        );
        let back: Vec<String> = read_json(&path).unwrap();
        assert_eq!(back, ["Наличные"]);

        let missing = dir.join("missing.json");
        assert!(read_json_if_exists::<_, Vec<String>>(&missing)
            .unwrap()
            .is_none());
    }
}
