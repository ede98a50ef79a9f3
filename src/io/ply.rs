//! Reader/writer for the ASCII PLY-style point and line interchange format.
//!
//! Only 2D and 3D points are supported, matching the original tool (which
//! silently no-ops outside that range); here that boundary surfaces as a
//! [`PlyError::Header`].

use crate::error::PlyError;
use crate::point::Point;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

fn check_dimension<const D: usize>() -> Result<(), PlyError> {
    if !(2..=3).contains(&D) {
        return Err(PlyError::Header(format!(
            "point-exchange format only supports 2 or 3 dimensional points, got {D}"
        )));
    }
    Ok(())
}

fn expect_line(lines: &mut impl Iterator<Item = std::io::Result<String>>, want: &str) -> Result<(), PlyError> {
    let line = lines
        .next()
        .ok_or_else(|| PlyError::Header(format!("expected \"{want}\", found end of file")))??;
    if line.trim() != want {
        return Err(PlyError::Header(format!("expected \"{want}\", found \"{}\"", line.trim())));
    }
    Ok(())
}

fn next_line(lines: &mut impl Iterator<Item = std::io::Result<String>>) -> Result<String, PlyError> {
    lines
        .next()
        .ok_or_else(|| PlyError::Record("unexpected end of file".to_string()))?
        .map_err(PlyError::from)
}

/// Reads a vertex block from an ASCII PLY file, returning the points it
/// declares. Color channels are read into [`Point::color`].
pub fn read_points<const D: usize>(path: impl AsRef<Path>) -> Result<Vec<Point<D>>, PlyError> {
    check_dimension::<D>()?;

    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    expect_line(&mut lines, "ply")?;
    expect_line(&mut lines, "format ascii 1.0")?;

    let mut vertex_count = None;
    loop {
        let line = next_line(&mut lines)?;
        let mut fields = line.trim().split_whitespace();
        match fields.next() {
            Some("element") => {
                if fields.next() == Some("vertex") {
                    let n = fields
                        .next()
                        .ok_or_else(|| PlyError::Header("element vertex missing count".to_string()))?;
                    vertex_count = Some(
                        n.parse::<usize>()
                            .map_err(|_| PlyError::Header(format!("invalid vertex count {n}")))?,
                    );
                }
            }
            Some("property") | Some("comment") => continue,
            Some("end_header") => break,
            _ => continue,
        }
    }

    let vertex_count = vertex_count.ok_or_else(|| PlyError::Header("missing element vertex".to_string()))?;
    let mut points = Vec::with_capacity(vertex_count);

    for i in 0..vertex_count {
        let line = lines.next().ok_or(PlyError::Truncated { expected: vertex_count, found: i })??;
        let fields: Vec<&str> = line.trim().split_whitespace().collect();
        if fields.len() < 6 {
            return Err(PlyError::Record(format!("vertex record has {} fields, need 6", fields.len())));
        }

        let parse_f32 = |s: &str| s.parse::<f32>().map_err(|_| PlyError::Record(format!("bad float {s}")));
        let parse_u8 = |s: &str| s.parse::<u8>().map_err(|_| PlyError::Record(format!("bad color byte {s}")));

        let mut coords = [0f32; D];
        coords[0] = parse_f32(fields[0])?;
        coords[1] = parse_f32(fields[1])?;
        if D == 3 {
            coords[2] = parse_f32(fields[2])?;
        }
        let color = [parse_u8(fields[3])?, parse_u8(fields[4])?, parse_u8(fields[5])?];
        points.push(Point::with_color(coords, color));
    }

    Ok(points)
}

/// Writes a vertex-only PLY document: one record per point, third coordinate
/// written as `0` for 2D points.
pub fn write_points<const D: usize>(path: impl AsRef<Path>, points: &[Point<D>]) -> Result<(), PlyError> {
    check_dimension::<D>()?;

    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "ply")?;
    writeln!(w, "format ascii 1.0")?;
    writeln!(w, "element vertex {}", points.len())?;
    writeln!(w, "property float x")?;
    writeln!(w, "property float y")?;
    writeln!(w, "property float z")?;
    writeln!(w, "property uchar diffuse_red")?;
    writeln!(w, "property uchar diffuse_green")?;
    writeln!(w, "property uchar diffuse_blue")?;
    writeln!(w, "end_header")?;
    write_vertex_records(&mut w, points)?;
    Ok(())
}

/// Writes a vertex block plus an edge block pairing up consecutive points
/// (`points[0]-points[1]`, `points[2]-points[3]`, ...), used for the
/// visualization dump's splitting-plane segments.
pub fn write_lines<const D: usize>(path: impl AsRef<Path>, points: &[Point<D>]) -> Result<(), PlyError> {
    check_dimension::<D>()?;

    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "ply")?;
    writeln!(w, "format ascii 1.0")?;
    writeln!(w, "element vertex {}", points.len())?;
    writeln!(w, "property float x")?;
    writeln!(w, "property float y")?;
    writeln!(w, "property float z")?;
    writeln!(w, "property uchar diffuse_red")?;
    writeln!(w, "property uchar diffuse_green")?;
    writeln!(w, "property uchar diffuse_blue")?;
    writeln!(w, "element edge {}", points.len() / 2)?;
    writeln!(w, "property int vertex1")?;
    writeln!(w, "property int vertex2")?;
    writeln!(w, "property uchar diffuse_red")?;
    writeln!(w, "property uchar diffuse_green")?;
    writeln!(w, "property uchar diffuse_blue")?;
    writeln!(w, "end_header")?;
    write_vertex_records(&mut w, points)?;

    for i in (0..points.len()).step_by(2) {
        writeln!(w, "{} {} 255 255 255", i, i + 1)?;
    }
    Ok(())
}

fn write_vertex_records<const D: usize>(w: &mut impl Write, points: &[Point<D>]) -> Result<(), PlyError> {
    for p in points {
        let z = if D == 3 { p.coords[2] } else { 0.0 };
        writeln!(
            w,
            "{} {} {} {} {} {}",
            p.coords[0], p.coords[1], z, p.color[0], p.color[1], p.color[2]
        )?;
    }
    Ok(())
}
