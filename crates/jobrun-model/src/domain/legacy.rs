use std::fmt;

use crate::Props;

/// Layered configuration in the shape older job implementations expect.
///
/// A `LegacyProps` value is tagged with one of the names from
/// [`crate::LEGACY_WRAPPER_TYPES`], holds an optional parent and a list of
/// local layers. Lookups check local layers newest first, then the parent chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyProps {
    type_name: &'static str,
    parent: Option<Box<LegacyProps>>,
    layers: Vec<Props>,
}

impl LegacyProps {
    /// Wrap raw configuration layers, optionally on top of a parent.
    pub fn wrap(type_name: &'static str, parent: Option<LegacyProps>, layers: &[Props]) -> Self {
        Self {
            type_name,
            parent: parent.map(Box::new),
            layers: layers.to_vec(),
        }
    }

    /// Wrapper type name this value was built as.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn parent(&self) -> Option<&LegacyProps> {
        self.parent.as_deref()
    }

    /// Resolve a key through local layers, then the parent chain.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(key))
            .or_else(|| self.parent.as_ref().and_then(|p| p.get(key)))
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Flatten into plain [`Props`]; parent entries first, local layers on top.
    pub fn to_properties(&self) -> Props {
        let mut out = match &self.parent {
            Some(parent) => parent.to_properties(),
            None => Props::new(),
        };
        for layer in &self.layers {
            out = out.merged(layer);
        }
        out
    }
}

impl fmt::Display for LegacyProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(layers={}, parent={})",
            self.type_name,
            self.layers.len(),
            self.parent.is_some()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LEGACY_WRAPPER_TYPES;

    fn props(pairs: &[(&str, &str)]) -> Props {
        pairs.iter().copied().collect()
    }

    #[test]
    fn lookup_prefers_newest_layer_then_parent() {
        let parent = LegacyProps::wrap(
            LEGACY_WRAPPER_TYPES[0],
            None,
            &[props(&[("a", "parent"), ("p", "only-parent")])],
        );
        let child = LegacyProps::wrap(
            LEGACY_WRAPPER_TYPES[0],
            Some(parent),
            &[props(&[("a", "old")]), props(&[("a", "new")])],
        );

        assert_eq!(child.get("a"), Some("new"));
        assert_eq!(child.get("p"), Some("only-parent"));
        assert_eq!(child.get("missing"), None);
        assert_eq!(child.get_or("missing", "d"), "d");
    }

    #[test]
    fn to_properties_flattens_parent_first() {
        let parent = LegacyProps::wrap(
            LEGACY_WRAPPER_TYPES[1],
            None,
            &[props(&[("x", "1"), ("y", "2")])],
        );
        let child = LegacyProps::wrap(
            LEGACY_WRAPPER_TYPES[1],
            Some(parent),
            &[props(&[("y", "3"), ("z", "4")])],
        );

        let flat = child.to_properties();
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(flat.get("y"), Some("3"));
    }

    #[test]
    fn display_names_wrapper_type() {
        let wrapped = LegacyProps::wrap(LEGACY_WRAPPER_TYPES[0], None, &[Props::new()]);
        assert_eq!(
            wrapped.to_string(),
            "jobrun.utils.Props(layers=1, parent=false)"
        );
    }
}
