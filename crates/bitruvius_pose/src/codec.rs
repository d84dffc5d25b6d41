//! Compact pose strings
//!
//! A pose is written as `;`-separated `key:value` tokens using short keys,
//! with the root as `r:x,y`:
//!
//! ```text
//! r:0,600;br:0;w:0;t:0;c:0;h:0;rs:90;re:0;...
//! ```
//!
//! Values are rounded to two decimals. Decoding is forgiving: each value is
//! read as its longest leading number (`12px` reads as 12), unknown keys and
//! values with no leading number are skipped, so any string decodes to some
//! (possibly empty) partial pose.

use bitruvius_core::{PartName, Pose, Vec2};

/// A field addressable by a short key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseField {
    Root,
    BodyRotation,
    Part(PartName),
}

/// Short keys in canonical encoding order
pub const SHORT_KEYS: [(&str, PoseField); 18] = [
    ("r", PoseField::Root),
    ("br", PoseField::BodyRotation),
    ("w", PoseField::Part(PartName::Waist)),
    ("t", PoseField::Part(PartName::Torso)),
    ("c", PoseField::Part(PartName::Collar)),
    ("h", PoseField::Part(PartName::Head)),
    ("rs", PoseField::Part(PartName::RShoulder)),
    ("re", PoseField::Part(PartName::RElbow)),
    ("rw", PoseField::Part(PartName::RWrist)),
    ("ls", PoseField::Part(PartName::LShoulder)),
    ("le", PoseField::Part(PartName::LElbow)),
    ("lw", PoseField::Part(PartName::LWrist)),
    ("rt", PoseField::Part(PartName::RThigh)),
    ("rc", PoseField::Part(PartName::RShin)),
    ("ra", PoseField::Part(PartName::RAnkle)),
    ("lt", PoseField::Part(PartName::LThigh)),
    ("lc", PoseField::Part(PartName::LShin)),
    ("la", PoseField::Part(PartName::LAnkle)),
];

impl PoseField {
    pub fn from_short_key(key: &str) -> Option<Self> {
        SHORT_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, field)| *field)
    }

    pub fn short_key(self) -> &'static str {
        SHORT_KEYS
            .iter()
            .find(|(_, field)| *field == self)
            .map(|(k, _)| *k)
            .unwrap_or("")
    }
}

/// Round to two decimals, folding negative zero into zero
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Encode the fields a pose specifies
///
/// Anchor offsets are never part of the string form.
pub fn encode(pose: &Pose) -> String {
    let mut out = String::new();
    for (key, field) in SHORT_KEYS {
        let token = match field {
            PoseField::Root => pose
                .root
                .map(|r| format!("{}:{},{}", key, round2(r.x), round2(r.y))),
            PoseField::BodyRotation => pose.body_rotation.map(|v| format!("{}:{}", key, round2(v))),
            PoseField::Part(part) => pose.rotation(part).map(|v| format!("{}:{}", key, round2(v))),
        };
        if let Some(token) = token {
            if !out.is_empty() {
                out.push(';');
            }
            out.push_str(&token);
        }
    }
    out
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// Longest leading decimal number in `text`, ignoring leading whitespace
///
/// Trailing garbage is dropped. Non-finite results are rejected.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = skip_digits(bytes, end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode a pose string, skipping anything malformed
pub fn decode(encoded: &str) -> Pose {
    let mut pose = Pose::new();

    for token in encoded.split(';') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let Some((key, value)) = token.split_once(':') else {
            tracing::debug!("pose codec: skipping token without ':' {:?}", token);
            continue;
        };

        let Some(field) = PoseField::from_short_key(key.trim()) else {
            tracing::debug!("pose codec: skipping unknown key {:?}", key);
            continue;
        };

        match field {
            PoseField::Root => {
                let mut fields = value.split(',');
                let parsed = fields
                    .next()
                    .and_then(parse_number)
                    .zip(fields.next().and_then(parse_number))
                    .map(|(x, y)| Vec2::new(x, y));
                match parsed {
                    Some(root) => pose.root = Some(root),
                    None => tracing::debug!("pose codec: skipping bad root {:?}", value),
                }
            }
            PoseField::BodyRotation => match parse_number(value) {
                Some(v) => pose.body_rotation = Some(v),
                None => tracing::debug!("pose codec: skipping bad value for {}: {:?}", key, value),
            },
            PoseField::Part(part) => match parse_number(value) {
                Some(v) => *pose.rotation_mut(part) = Some(v),
                None => tracing::debug!("pose codec: skipping bad value for {}: {:?}", key, value),
            },
        }
    }

    pose
}
