//! Untyped region descriptors as received from a host document.
//!
//! A descriptor list is typically a JSON array such as
//!
//! ```json
//! [{"id": "face", "shape": "rectangle", "unit": "pixel",
//!   "imageWidth": 4000, "imageHeight": 3000,
//!   "x": 1200, "y": 400, "width": 800, "height": 800}]
//! ```
//!
//! Every field is optional and may be a number or a string. Nothing here
//! validates geometry; see [`normalize`](crate::normalize).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One region as described by the host, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionDescriptor {
    /// Region id. Generated when absent.
    pub id: Option<Value>,
    /// Shape name. Only `rectangle` is supported.
    pub shape: Option<Value>,
    /// `relative` or `pixel`. Inferred when absent.
    pub unit: Option<Value>,
    /// Width of the image the pixel coordinates refer to.
    pub image_width: Option<Value>,
    /// Height of the image the pixel coordinates refer to.
    pub image_height: Option<Value>,
    /// Left edge.
    pub x: Option<Value>,
    /// Top edge.
    pub y: Option<Value>,
    /// Extent to the right of `x`.
    pub width: Option<Value>,
    /// Extent below `y`.
    pub height: Option<Value>,
}

impl RegionDescriptor {
    /// Rectangle in relative coordinates (fractions of the image size).
    pub fn relative(id: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Some(Value::from(id)),
            shape: Some(Value::from("rectangle")),
            unit: Some(Value::from("relative")),
            x: Some(Value::from(x)),
            y: Some(Value::from(y)),
            width: Some(Value::from(width)),
            height: Some(Value::from(height)),
            ..Self::default()
        }
    }

    /// Rectangle in pixels of an image of `image_width` × `image_height`.
    pub fn pixel(
        id: &str,
        (image_width, image_height): (f64, f64),
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            unit: Some(Value::from("pixel")),
            image_width: Some(Value::from(image_width)),
            image_height: Some(Value::from(image_height)),
            ..Self::relative(id, x, y, width, height)
        }
    }

    /// The id as text, if one was given. Numeric ids are rendered.
    pub fn id_text(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Error for a descriptor list that cannot be read at all.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Not valid JSON.
    #[error("region list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON, but not an array.
    #[error("region list must be a JSON array, got {found}")]
    NotAnArray {
        /// JSON type that was found instead.
        found: &'static str,
    },
}

/// Parse a JSON array of region descriptors.
///
/// Array items that are not objects (or whose fields don't deserialize) are
/// skipped with a warning; the rest of the list is kept. Blank input is an
/// empty list.
pub fn parse_region_list(json: &str) -> Result<Vec<RegionDescriptor>, DescriptorError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items,
        other => {
            return Err(DescriptorError::NotAnArray {
                found: json_type_name(&other),
            });
        }
    };

    let mut descriptors = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(index, found = json_type_name(&item), "region entry is not an object, skipping");
            continue;
        }
        match serde_json::from_value::<RegionDescriptor>(item) {
            Ok(d) => descriptors.push(d),
            Err(e) => warn!(index, error = %e, "unreadable region entry, skipping"),
        }
    }
    Ok(descriptors)
}

/// Interpret a descriptor field as a number.
///
/// Numbers are taken as-is; strings are read by their longest leading
/// decimal prefix (`"12.5px"` is 12.5). Returns `None` for anything else,
/// and for non-finite results.
pub(crate) fn field_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_leading_f64(s)?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Interpret a descriptor field as a lowercase keyword.
pub(crate) fn field_keyword(value: &Value) -> Option<String> {
    value.as_str().map(str::to_ascii_lowercase)
}

/// Whether a field counts as given: present and not `0`, `""` or `false`.
pub(crate) fn field_is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Parse the longest prefix of `s` (after leading whitespace) that forms a
/// decimal number: optional sign, digits with an optional fraction, and an
/// optional exponent.
fn parse_leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
