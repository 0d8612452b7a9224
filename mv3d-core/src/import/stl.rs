//! STL backends: a nom combinator parser for the ASCII variant and a direct
//! little-endian decoder for the binary layout.
//!
//! Both variants routinely ship with zeroed facet normals; those are
//! regenerated from the edge cross product so the triangle contract holds.

use glam::Vec3;
use nom::{
    IResult,
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    multi::many0,
    number::complete::float,
    sequence::preceded,
};

use super::ImportError;
use crate::mesh::Triangle;

/// Bytes before the triangle records: 80-byte comment header + u32 count.
const BINARY_HEADER_LEN: usize = 84;
/// Bytes per binary triangle record: normal + 3 vertices + attribute count.
const BINARY_TRIANGLE_LEN: usize = 50;

/// A byte stream is binary STL exactly when its declared triangle count
/// matches the file length. Content-based; the header text is ignored.
pub(super) fn matches_binary(data: &[u8]) -> bool {
    if data.len() < BINARY_HEADER_LEN {
        return false;
    }
    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    data.len() == BINARY_HEADER_LEN + count * BINARY_TRIANGLE_LEN
}

/// ASCII STL opens with a `solid` keyword.
pub(super) fn matches_ascii(data: &[u8]) -> bool {
    match std::str::from_utf8(data) {
        Ok(text) => text.trim_start().starts_with("solid"),
        Err(_) => false,
    }
}

pub(super) fn parse_binary(data: &[u8]) -> Result<Vec<Triangle>, ImportError> {
    if data.len() < BINARY_HEADER_LEN {
        return Err(ImportError::LoadFailure(
            "binary STL shorter than its 84-byte header".into(),
        ));
    }
    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;

    let mut triangles = Vec::with_capacity(count);
    let mut offset = BINARY_HEADER_LEN;
    for _ in 0..count {
        if offset + BINARY_TRIANGLE_LEN > data.len() {
            return Err(ImportError::LoadFailure(
                "binary STL truncated mid-triangle".into(),
            ));
        }
        let normal = read_vec3(data, offset);
        let vertices = [
            read_vec3(data, offset + 12),
            read_vec3(data, offset + 24),
            read_vec3(data, offset + 36),
        ];
        triangles.push(make_triangle(vertices, normal));
        // 2 trailing attribute-count bytes are skipped.
        offset += BINARY_TRIANGLE_LEN;
    }
    Ok(triangles)
}

pub(super) fn parse_ascii(data: &[u8]) -> Result<Vec<Triangle>, ImportError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| ImportError::LoadFailure(format!("ASCII STL is not valid UTF-8: {e}")))?;
    match parse_solid(text) {
        Ok((_, triangles)) => Ok(triangles),
        Err(e) => Err(ImportError::LoadFailure(format!(
            "failed to parse ASCII STL: {e:?}"
        ))),
    }
}

fn parse_solid(input: &str) -> IResult<&str, Vec<Triangle>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // Optional solid name, up to end of line.
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, triangles) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, triangles))
}

fn parse_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = parse_vec3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v0) = parse_vertex(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, make_triangle([v0, v1, v2], normal)))
}

fn parse_vertex(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vec3(input)
}

fn parse_vec3(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn make_triangle(vertices: [Vec3; 3], normal: Vec3) -> Triangle {
    if normal.length_squared() > f32::EPSILON {
        Triangle::new(vertices, normal.normalize())
    } else {
        Triangle::from_vertices(vertices)
    }
}

fn read_vec3(data: &[u8], offset: usize) -> Vec3 {
    Vec3::new(
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    )
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
