//! The renderer-agnostic variable map produced by a resolution.
//!
//! A [`VarMap`] is assembled fresh on every resolution and handed to a
//! renderer; it has no identity beyond the current call. List values are
//! stored sorted and deduplicated so two resolutions over the same inputs
//! compare equal regardless of the order packages were visited in.

use std::collections::{BTreeMap, BTreeSet};

/// A single resolved variable: either one string or a sorted list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Scalar(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarMap(BTreeMap<String, VarValue>);

impl VarMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), VarValue::Scalar(value.into()));
    }

    /// Store a list value, sorted and deduplicated.
    pub fn set_list<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        self.0
            .insert(name.into(), VarValue::List(sorted.into_iter().collect()));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(VarValue::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name) {
            Some(VarValue::List(l)) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterate variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_are_sorted_and_deduplicated() {
        let mut varmap = VarMap::new();
        varmap.set_list("pkgs", ["zlib", "gcc", "zlib", "make"]);

        assert_eq!(
            varmap.list("pkgs").unwrap(),
            &["gcc".to_string(), "make".to_string(), "zlib".to_string()]
        );
    }

    #[test]
    fn scalar_and_list_accessors_do_not_cross() {
        let mut varmap = VarMap::new();
        varmap.set_scalar("packaging_command", "apt-get");
        varmap.set_list("pkgs", ["gcc"]);

        assert_eq!(varmap.scalar("packaging_command"), Some("apt-get"));
        assert_eq!(varmap.scalar("pkgs"), None);
        assert_eq!(varmap.list("packaging_command"), None);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut varmap = VarMap::new();
        varmap.set_scalar("b", "2");
        varmap.set_scalar("a", "1");
        varmap.set_scalar("c", "3");

        let names: Vec<&str> = varmap.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn insertion_order_does_not_affect_equality() {
        let mut one = VarMap::new();
        one.set_scalar("x", "1");
        one.set_list("pkgs", ["b", "a"]);

        let mut two = VarMap::new();
        two.set_list("pkgs", ["a", "b"]);
        two.set_scalar("x", "1");

        assert_eq!(one, two);
    }
}
