//! Writing rendered images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use lumen_renderer::ImageBuffer;

/// Save `image`, choosing the format from the file extension.
///
/// `.ppm` writes plain-text PPM; anything else goes through the `image`
/// crate (PNG by default).
pub fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        image
            .to_image()
            .save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    log::info!("Saved to {}", path.display());
    Ok(())
}

/// Write `image` as plain (P3) PPM, top row first.
pub fn write_ppm(image: &ImageBuffer, writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = image.get(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, [255, 0, 0]);
        image.set(1, 1, [1, 2, 3]);

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["P3", "2 2", "255", "255 0 0", "0 0 0", "0 0 0", "1 2 3"]);
    }

    #[test]
    fn test_save_both_formats() {
        let dir = std::env::temp_dir().join(format!("lumen-output-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, [10, 20, 30]);

        let ppm = dir.join("out.ppm");
        save(&image, &ppm).unwrap();
        assert!(std::fs::read_to_string(&ppm).unwrap().starts_with("P3\n3 2\n255\n"));

        let png = dir.join("out.png");
        save(&image, &png).unwrap();
        let bytes = std::fs::read(&png).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
