//! Reading mesh collections from plain nested data.
//!
//! A runtime hands back meshes as nested arrays and objects. Here the
//! "a number means a reference" convention of descriptions is turned into
//! explicit [`FieldValue`] variants, so nothing downstream inspects value
//! shapes again.

use linemesh_decode::{
    ColorScheme, ColorTable, Colors, FieldValue, MeshDescription, Segment, Selector, Vertex,
};
use serde_json::{Map, Value};
use thiserror::Error;

/// A value in the description did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: expected {expected}")]
pub struct DescriptionError {
    /// Location of the value, e.g. `meshes[1].segments[3]`.
    pub path: String,
    pub expected: &'static str,
}

fn expected<T>(path: impl Into<String>, expected: &'static str) -> Result<T, DescriptionError> {
    Err(DescriptionError {
        path: path.into(),
        expected,
    })
}

/// Read a mesh collection from nested data.
///
/// Accepts either a bare array of meshes or an object whose `meshes` key
/// holds that array. Each mesh is an object with required `vertexes` and
/// `segments` fields and an optional `colors` field. A field given as a
/// number references the same-named field of the mesh at that index.
///
/// `colors` is either a compressed scheme (an object mapping a color key,
/// decimal or `0x` hex, to a list of indices and `[start, end]` ranges) or
/// a dense array with one color (or `null`) per vertex.
pub fn collection_from_value(value: &Value) -> Result<Vec<MeshDescription>, DescriptionError> {
    let meshes = match value {
        Value::Object(root) => match root.get("meshes") {
            Some(Value::Array(meshes)) => meshes,
            _ => return expected("meshes", "an array of meshes"),
        },
        Value::Array(meshes) => meshes,
        _ => return expected("meshes", "an array of meshes"),
    };

    meshes
        .iter()
        .enumerate()
        .map(|(i, mesh)| read_mesh(&format!("meshes[{i}]"), mesh))
        .collect()
}

fn read_mesh(path: &str, value: &Value) -> Result<MeshDescription, DescriptionError> {
    let Value::Object(mesh) = value else {
        return expected(path, "a mesh object");
    };

    let vertexes = read_field(path, mesh, "vertexes", |path, value| {
        read_list(path, value, read_vertex)
    })?
    .ok_or_else(|| missing(path, "vertexes"))?;
    let segments = read_field(path, mesh, "segments", |path, value| {
        read_list(path, value, read_segment)
    })?
    .ok_or_else(|| missing(path, "segments"))?;
    let colors = read_field(path, mesh, "colors", read_colors)?;

    Ok(MeshDescription {
        vertexes,
        segments,
        colors,
    })
}

fn missing(path: &str, field: &str) -> DescriptionError {
    DescriptionError {
        path: format!("{path}.{field}"),
        expected: "a value",
    }
}

/// Read an optional field that may be a reference. `null` counts as absent.
fn read_field<T>(
    path: &str,
    mesh: &Map<String, Value>,
    name: &str,
    read: impl Fn(&str, &Value) -> Result<T, DescriptionError>,
) -> Result<Option<FieldValue<T>>, DescriptionError> {
    let path = format!("{path}.{name}");
    match mesh.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(number @ Value::Number(_)) => {
            read_reference(&path, number).map(|target| Some(FieldValue::Reference(target)))
        }
        Some(value) => read(&path, value).map(|v| Some(FieldValue::Direct(v))),
    }
}

fn read_list<T>(
    path: &str,
    value: &Value,
    read: impl Fn(&str, &Value) -> Result<T, DescriptionError>,
) -> Result<Vec<T>, DescriptionError> {
    let Value::Array(items) = value else {
        return expected(path, "an array");
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| read(&format!("{path}[{i}]"), item))
        .collect()
}

fn read_vertex(path: &str, value: &Value) -> Result<Vertex, DescriptionError> {
    read_list(path, value, |path, coordinate| {
        coordinate
            .as_f64()
            .map_or_else(|| expected(path, "a number"), Ok)
    })
}

fn read_segment(path: &str, value: &Value) -> Result<Segment, DescriptionError> {
    read_list(path, value, read_index)
}

fn read_index(path: &str, value: &Value) -> Result<usize, DescriptionError> {
    as_integer(value)
        .and_then(|index| usize::try_from(index).ok())
        .map_or_else(|| expected(path, "a non-negative integer index"), Ok)
}

/// Read a mesh reference. A negative target names no mesh, so it is kept
/// as `usize::MAX` and resolution reports it as out of range.
fn read_reference(path: &str, value: &Value) -> Result<usize, DescriptionError> {
    as_integer(value)
        .map(|target| usize::try_from(target).unwrap_or(usize::MAX))
        .map_or_else(|| expected(path, "an integer mesh index"), Ok)
}

/// Integral value of a number, including floats such as `3.0`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .or_else(|| {
            value
                .as_f64()
                .filter(|n| n.is_finite() && n.fract() == 0.0)
                .map(|n| n as i128)
        })
}

fn read_colors(path: &str, value: &Value) -> Result<Colors, DescriptionError> {
    match value {
        Value::Object(scheme) => read_scheme(path, scheme).map(Colors::Compressed),
        Value::Array(_) => read_list(path, value, |path, entry| match entry {
            Value::Null => Ok(None),
            _ => read_color(path, entry).map(Some),
        })
        .map(|table| Colors::Dense(ColorTable::from(table))),
        _ => expected(path, "a color scheme object or a color array"),
    }
}

fn read_scheme(path: &str, scheme: &Map<String, Value>) -> Result<ColorScheme, DescriptionError> {
    let mut colors = ColorScheme::new();
    for (key, selectors) in scheme {
        let path = format!("{path}[{key:?}]");
        let Some(color) = parse_color_key(key) else {
            return expected(path, "a color key (decimal or 0x hex)");
        };
        let selectors = read_list(&path, selectors, read_selector)?;
        colors.entries.push((color, selectors));
    }
    Ok(colors)
}

fn read_selector(path: &str, value: &Value) -> Result<Selector, DescriptionError> {
    match value {
        Value::Array(bounds) if bounds.len() == 2 => Ok(Selector::Range(
            read_index(&format!("{path}[0]"), &bounds[0])?,
            read_index(&format!("{path}[1]"), &bounds[1])?,
        )),
        Value::Number(_) => read_index(path, value).map(Selector::Index),
        _ => expected(path, "an index or a [start, end] range"),
    }
}

/// Read a packed `0xRRGGBBAA` color.
///
/// Scripts compute colors arithmetically, so non-integral values are
/// truncated toward zero as long as they fit in 32 bits.
fn read_color(path: &str, value: &Value) -> Result<u32, DescriptionError> {
    value
        .as_u64()
        .and_then(|color| u32::try_from(color).ok())
        .or_else(|| value.as_f64().and_then(truncate_color))
        .map_or_else(|| expected(path, "a 32-bit packed color"), Ok)
}

fn parse_color_key(key: &str) -> Option<u32> {
    let key = key.trim();
    if let Some(hex) = key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).ok();
    }
    key.parse::<u32>()
        .ok()
        .or_else(|| key.parse::<f64>().ok().and_then(truncate_color))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_color(color: f64) -> Option<u32> {
    (color.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&color)).then_some(color as u32)
}
