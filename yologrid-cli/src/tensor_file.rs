//! Reading and writing flat `f32` tensors.
//!
//! `.json` files hold a plain array of numbers. Anything else is treated as
//! raw little-endian `f32` values with no header.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn read_tensor(path: &Path) -> Result<Vec<f32>, Box<dyn Error>> {
    if is_json(path) {
        let text = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }

    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "{}: {} bytes is not a whole number of f32 values",
            path.display(),
            bytes.len()
        )
        .into());
    }
    let mut values = vec![0.0f32; bytes.len() / 4];
    LittleEndian::read_f32_into(&bytes, &mut values);
    Ok(values)
}

pub fn write_tensor(path: &Path, values: &[f32]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if is_json(path) {
        fs::write(path, serde_json::to_string(values)?)?;
        return Ok(());
    }

    let mut out = BufWriter::new(File::create(path)?);
    for &value in values {
        out.write_f32::<LittleEndian>(value)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_tensor, write_tensor};
    use std::fs;

    #[test]
    fn binary_tensor_is_little_endian() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.bin");
        fs::write(&path, [0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x00, 0xc0]).unwrap();
        assert_eq!(read_tensor(&path).unwrap(), vec![1.0, -2.0]);
    }

    #[test]
    fn binary_and_json_files_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let values = vec![0.5f32, -3.25, 7.0];
        for name in ["nested/out.bin", "out.json"] {
            let path = dir.path().join(name);
            write_tensor(&path, &values).unwrap();
            assert_eq!(read_tensor(&path).unwrap(), values);
        }
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.bin");
        fs::write(&path, [0u8; 6]).unwrap();
        assert!(read_tensor(&path).is_err());
    }
}
