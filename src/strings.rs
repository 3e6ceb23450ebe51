//! StringList: a plain ordered list of strings (duplicates allowed).

use crate::collection::Collection;
use crate::text::Text;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList {
    items: Vec<String>,
}

impl StringList {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        items.into_iter().collect()
    }

    pub fn add(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    pub fn join(&self, sep: &str) -> Text {
        Text::new(self.items.join(sep))
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|s| s == item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.items.is_empty()
    }

    /// First item, or `""` when the list is empty.
    pub fn first_or_empty(&self) -> &str {
        self.items.first().map(String::as_str).unwrap_or_default()
    }

    pub fn list(&self) -> &[String] {
        &self.items
    }

    /// Returns a new list with every item surrounded by `wrapper`.
    pub fn wrap(&self, wrapper: &str) -> StringList {
        self.items
            .iter()
            .map(|s| format!("{wrapper}{s}{wrapper}"))
            .collect()
    }
}

impl<T: Into<String>> FromIterator<T> for StringList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Collection for StringList {
    type Item = String;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn list(&self) -> &[String] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_quotes_each_item() {
        let strs = StringList::new(["a", "b", "c"]);
        assert_eq!(strs.wrap("'").list(), &["'a'", "'b'", "'c'"]);
    }

    #[test]
    fn first_and_join() {
        let mut strs = StringList::default();
        assert_eq!(strs.first_or_empty(), "");
        assert_eq!(Collection::first(&strs), None);
        strs.add("id");
        strs.add("name");
        assert_eq!(strs.first_or_empty(), "id");
        assert_eq!(strs.join(", ").as_str(), "id, name");
        assert!(strs.contains("name"));
        assert!(!strs.contains("nam"));
    }
}
