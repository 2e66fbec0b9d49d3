use serde_json::{Map, Value};

use crate::foundation::color::Rgb8;
use crate::foundation::path::{NodePath, PathElem};

/// Which paint property a node carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintRole {
    Fill,
    Stroke,
}

impl PaintRole {
    /// Map a Lottie shape `ty` tag to a role. Gradient fills/strokes (`gf`/`gs`) are not paint.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "fl" => Some(Self::Fill),
            "st" => Some(Self::Stroke),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Fill => "fl",
            Self::Stroke => "st",
        }
    }
}

/// Shape-level view of one JSON value in a Lottie tree.
#[derive(Debug)]
pub enum LottieNode<'a> {
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
    /// A fill/stroke object; `color` is its raw `c.k` value, `fields` the whole object.
    Paint {
        role: PaintRole,
        color: &'a Value,
        fields: &'a Map<String, Value>,
    },
    Scalar,
}

impl<'a> LottieNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items),
            Value::Object(fields) => match paint_of(fields) {
                Some((role, color)) => Self::Paint {
                    role,
                    color,
                    fields,
                },
                None => Self::Mapping(fields),
            },
            _ => Self::Scalar,
        }
    }
}

fn paint_of(fields: &Map<String, Value>) -> Option<(PaintRole, &Value)> {
    let role = fields.get("ty").and_then(Value::as_str).and_then(PaintRole::from_tag)?;
    let k = fields.get("c")?.get("k")?;
    if k.is_null() {
        return None;
    }
    Some((role, k))
}

/// Resolve a paint `c.k` value to RGB.
///
/// Keyframed colors use the start value (`s`) of their first keyframe. Anything that does
/// not end up as an array of at least three numbers yields `None`. Returns the color and
/// whether it came from a keyframe.
pub fn resolve_color(k: &Value) -> Option<(Rgb8, bool)> {
    let (channels, keyframed) = match k.as_array()?.first() {
        Some(Value::Object(first)) => (first.get("s")?.as_array()?, true),
        _ => (k.as_array()?, false),
    };
    if channels.len() < 3 {
        return None;
    }
    let r = channels[0].as_f64()?;
    let g = channels[1].as_f64()?;
    let b = channels[2].as_f64()?;
    Some((Rgb8::from_unit(r, g, b), keyframed))
}

/// A fill/stroke node whose color resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PaintSite {
    pub role: PaintRole,
    pub rgb: Rgb8,
    pub keyframed: bool,
    pub path: NodePath,
}

/// Depth-first pre-order walk calling `visit` for every resolvable paint node.
pub fn walk(root: &Value, visit: &mut impl FnMut(&PaintSite)) {
    let mut path = NodePath::root();
    walk_inner(root, &mut path, visit);
}

fn walk_inner(value: &Value, path: &mut NodePath, visit: &mut impl FnMut(&PaintSite)) {
    match LottieNode::classify(value) {
        LottieNode::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(PathElem::Index(i));
                walk_inner(item, path, visit);
                path.pop();
            }
        }
        LottieNode::Mapping(fields) => walk_fields(fields, path, visit),
        LottieNode::Paint {
            role,
            color,
            fields,
        } => {
            match resolve_color(color) {
                Some((rgb, keyframed)) => visit(&PaintSite {
                    role,
                    rgb,
                    keyframed,
                    path: path.clone(),
                }),
                None => tracing::trace!(%path, "skipping paint node with unresolvable color"),
            }
            walk_fields(fields, path, visit);
        }
        LottieNode::Scalar => {}
    }
}

fn walk_fields(
    fields: &Map<String, Value>,
    path: &mut NodePath,
    visit: &mut impl FnMut(&PaintSite),
) {
    for (key, child) in fields {
        path.push(PathElem::Field(key.clone()));
        walk_inner(child, path, visit);
        path.pop();
    }
}

/// Same traversal and selection as [`walk`], handing the paint object to `visit` mutably.
///
/// `visit` runs before the node's children are visited.
pub fn walk_mut(
    root: &mut Value,
    visit: &mut impl FnMut(&PaintSite, &mut Map<String, Value>),
) {
    let mut path = NodePath::root();
    walk_mut_inner(root, &mut path, visit);
}

fn walk_mut_inner(
    value: &mut Value,
    path: &mut NodePath,
    visit: &mut impl FnMut(&PaintSite, &mut Map<String, Value>),
) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                path.push(PathElem::Index(i));
                walk_mut_inner(item, path, visit);
                path.pop();
            }
        }
        Value::Object(fields) => {
            let site = paint_of(fields).and_then(|(role, color)| {
                resolve_color(color).map(|(rgb, keyframed)| PaintSite {
                    role,
                    rgb,
                    keyframed,
                    path: path.clone(),
                })
            });
            if let Some(site) = site {
                visit(&site, fields);
            }
            for (key, child) in fields.iter_mut() {
                path.push(PathElem::Field(key.clone()));
                walk_mut_inner(child, path, visit);
                path.pop();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/node.rs"]
mod tests;
