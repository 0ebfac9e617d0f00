#![forbid(unsafe_code)]

//! Binary PPM (P6) snapshots of a composited frame.

use std::io::{self, Write};
use std::path::Path;

use hearth_render::{PackedRgba, Surface};

/// Flatten `surface` over an opaque `background` and encode it as P6.
pub fn encode_ppm<W: Write>(
    surface: &Surface,
    background: PackedRgba,
    out: &mut W,
) -> io::Result<()> {
    let background = background.with_alpha(255);
    write!(out, "P6\n{} {}\n255\n", surface.width(), surface.height())?;
    let mut row = Vec::with_capacity(surface.width() as usize * 3);
    for line in surface.pixels().chunks(surface.width().max(1) as usize) {
        row.clear();
        for px in line {
            let c = px.over(background);
            row.extend_from_slice(&[c.r(), c.g(), c.b()]);
        }
        out.write_all(&row)?;
    }
    Ok(())
}

pub fn write_ppm(path: &Path, surface: &Surface, background: PackedRgba) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    encode_ppm(surface, background, &mut file)?;
    file.flush()
}
