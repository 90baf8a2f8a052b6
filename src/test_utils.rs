//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock implementations for [`Transform`](crate::traits::Transform)
//! - Fixture types with private fields and nested pointers
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use crate::traits::MockTransform;

/// Create a mock transform that wraps text in brackets and expects exactly
/// `calls` invocations.
///
/// # Example
///
/// ```ignore
/// let mock = mock_bracket_transform(2);
/// let copy = GraphCopier::new(mock).copy(&vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(copy.unwrap(), vec!["[a]", "[b]"]);
/// ```
#[must_use]
pub fn mock_bracket_transform(calls: usize) -> MockTransform {
    let mut mock = MockTransform::new();
    mock.expect_transform()
        .times(calls)
        .returning(|text| format!("[{text}]"));
    mock
}

/// Create a mock transform that fails the test if it is ever called.
#[must_use]
pub fn mock_unused_transform() -> MockTransform {
    let mut mock = MockTransform::new();
    mock.expect_transform().never();
    mock
}

/// A postal address; every field is private.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    city: String,
    zip: u32,
}

crate::impl_deep_copy!(Address { city, zip });

impl Address {
    /// The city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The postal code.
    pub const fn zip(&self) -> u32 {
        self.zip
    }
}

/// A user profile mixing strings, numbers, an optional boxed struct and a
/// map; every field is private.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    tags: Vec<String>,
    address: Option<Box<Address>>,
    links: BTreeMap<String, String>,
    score: f64,
}

crate::impl_deep_copy!(Profile {
    name,
    tags,
    address,
    links,
    score
});

impl Profile {
    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The address, if known.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_deref()
    }

    /// Named links.
    pub const fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    /// A numeric score.
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Mutable access to the tags, to check detachment.
    pub fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }
}

/// A profile with four string leaves: name, one tag, the city and one link.
#[must_use]
pub fn sample_profile() -> Profile {
    Profile {
        name: "hello".to_string(),
        tags: vec!["rust".to_string()],
        address: Some(Box::new(Address {
            city: "Oslo".to_string(),
            zip: 150,
        })),
        links: BTreeMap::from([("home".to_string(), "https://a.example".to_string())]),
        score: 0.1 + 0.2,
    }
}

/// A profile without an address.
#[must_use]
pub fn homeless_profile() -> Profile {
    Profile {
        address: None,
        ..sample_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copier::GraphCopier;
    use crate::sanitizer::Suffix;

    #[test]
    fn test_sample_profile_copied() {
        let original = sample_profile();
        let copy = GraphCopier::new(Suffix::new("_updated"))
            .copy(&original)
            .unwrap();

        assert_eq!(copy.name(), "hello_updated");
        assert_eq!(copy.tags(), ["rust_updated".to_string()]);
        assert_eq!(copy.address().unwrap().city(), "Oslo_updated");
        assert_eq!(copy.address().unwrap().zip(), 150);
        assert_eq!(copy.links()["home"], "https://a.example_updated");
        assert_eq!(copy.score().to_bits(), original.score().to_bits());
    }

    #[test]
    fn test_mock_bracket_transform() {
        let copy = GraphCopier::new(mock_bracket_transform(4))
            .copy(&sample_profile())
            .unwrap();
        assert_eq!(copy.name(), "[hello]");
    }

    #[test]
    fn test_mock_unused_transform_on_scalars() {
        let copier = GraphCopier::new(mock_unused_transform());
        assert_eq!(copier.copy(&vec![1_u8, 2, 3]).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_homeless_profile() {
        let mut original = homeless_profile();
        let copy = GraphCopier::new(mock_bracket_transform(3))
            .copy(&original)
            .unwrap();
        assert!(copy.address().is_none());

        original.tags_mut().push("more".to_string());
        assert_eq!(copy.tags().len(), 1);
    }
}
