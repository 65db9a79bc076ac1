//! The live inline style declaration of an element.
//!
//! [CSSOM § 6.6 CSSStyleDeclaration](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
//!
//! "A CSS declaration block is an ordered collection of CSS properties with
//! their associated values, also named CSS declarations."
//!
//! Values are kept as strings; interpreting them is the style crate's job.
//! Every committed write produces a [`StyleChange`] so the owner can route it.

use std::collections::HashMap;

/// One committed style write.
///
/// Absent values are encoded as the empty string on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleChange {
    /// The property name, lowercased.
    pub name: String,
    /// The value before the write, or `""`.
    pub old: String,
    /// The value after the write, or `""` when removed.
    pub new: String,
    /// Whether the write came from an animation rather than from an author.
    pub is_animation: bool,
}

/// Map of property names to string values.
#[derive(Debug, Clone, Default)]
pub struct StyleDeclaration {
    values: HashMap<String, String>,
}

impl StyleDeclaration {
    /// Create an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get a property value, or `""` when unset.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Whether the property has a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set a property. An empty value removes it.
    ///
    /// Returns the change to dispatch, or `None` if the value did not change.
    pub fn set(&mut self, name: &str, value: &str) -> Option<StyleChange> {
        self.write(name, value, false)
    }

    /// Set a property from an animation tick.
    pub fn set_animated(&mut self, name: &str, value: &str) -> Option<StyleChange> {
        self.write(name, value, true)
    }

    /// Remove a property.
    pub fn remove(&mut self, name: &str) -> Option<StyleChange> {
        self.write(name, "", false)
    }

    /// Iterate over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of set properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no properties are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn write(&mut self, name: &str, value: &str, is_animation: bool) -> Option<StyleChange> {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        let old = if value.is_empty() {
            self.values.remove(&name)
        } else {
            self.values.insert(name.clone(), value.to_string())
        }
        .unwrap_or_default();

        if old == value {
            return None;
        }
        Some(StyleChange {
            name,
            old,
            new: value.to_string(),
            is_animation,
        })
    }
}
