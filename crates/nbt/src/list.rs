//! Homogeneous list tag.

use std::fmt;

use crate::error::TagError;
use crate::tag::Tag;
use crate::tag_type::TagType;

/// An ordered list of tags that all share one declared element kind.
///
/// Every insertion or assignment is checked against the element kind;
/// mismatches are rejected with [`TagError::ElementKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
    element_kind: TagType,
    items: Vec<Tag>,
}

impl TagList {
    pub fn new(element_kind: TagType) -> Self {
        Self {
            element_kind,
            items: Vec::new(),
        }
    }

    /// Builds a list from `items`, validating each against `element_kind`.
    pub fn with_items(element_kind: TagType, items: Vec<Tag>) -> Result<Self, TagError> {
        for item in &items {
            check_kind(element_kind, item)?;
        }
        Ok(Self {
            element_kind,
            items,
        })
    }

    /// Builds a list whose element kind is taken from the first item, or
    /// `End` when `items` is empty.
    pub fn from_items(items: Vec<Tag>) -> Result<Self, TagError> {
        let kind = items.first().map_or(TagType::End, Tag::kind);
        Self::with_items(kind, items)
    }

    pub fn element_kind(&self) -> TagType {
        self.element_kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.items
    }

    pub fn push(&mut self, item: impl Into<Tag>) -> Result<(), TagError> {
        let item = item.into();
        check_kind(self.element_kind, &item)?;
        self.items.push(item);
        Ok(())
    }

    pub fn insert(&mut self, index: usize, item: impl Into<Tag>) -> Result<(), TagError> {
        let item = item.into();
        check_kind(self.element_kind, &item)?;
        if index > self.items.len() {
            return Err(TagError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: impl Into<Tag>) -> Result<Tag, TagError> {
        let item = item.into();
        check_kind(self.element_kind, &item)?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(TagError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag, TagError> {
        if index >= self.items.len() {
            return Err(TagError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Switches the element kind. The list is emptied when the kind changes.
    pub fn change_element_kind(&mut self, kind: TagType) {
        if kind != self.element_kind {
            self.items.clear();
            self.element_kind = kind;
        }
    }

    /// Moves all elements out, leaving the list empty with its kind intact.
    pub fn take_items(&mut self) -> Vec<Tag> {
        std::mem::take(&mut self.items)
    }

    pub fn into_items(self) -> Vec<Tag> {
        self.items
    }

    /// Owned, fully independent copy.
    pub fn deep_copy(&self) -> TagList {
        self.clone()
    }
}

fn check_kind(expected: TagType, item: &Tag) -> Result<(), TagError> {
    let found = item.kind();
    if found == expected {
        Ok(())
    } else {
        Err(TagError::ElementKind { expected, found })
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_wrong_kind() {
        let mut list = TagList::new(TagType::Int);
        list.push(1).unwrap();
        let err = list.push("nope").unwrap_err();
        assert_eq!(
            err,
            TagError::ElementKind {
                expected: TagType::Int,
                found: TagType::String,
            }
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn set_and_insert_are_checked() {
        let mut list = TagList::with_items(TagType::Int, vec![Tag::Int(1), Tag::Int(2)]).unwrap();
        assert!(list.set(0, Tag::Long(1)).is_err());
        assert_eq!(list.set(0, 7).unwrap(), Tag::Int(1));
        assert!(matches!(
            list.insert(5, 3),
            Err(TagError::IndexOutOfRange { index: 5, len: 2 })
        ));
        list.insert(1, 3).unwrap();
        assert_eq!(list.as_slice(), &[Tag::Int(7), Tag::Int(3), Tag::Int(2)]);
    }

    #[test]
    fn with_items_validates_every_element() {
        assert!(TagList::with_items(TagType::Int, vec![Tag::Int(1), Tag::Byte(1)]).is_err());
        let empty = TagList::from_items(vec![]).unwrap();
        assert_eq!(empty.element_kind(), TagType::End);
    }

    #[test]
    fn change_element_kind_clears_items() {
        let mut list = TagList::from_items(vec![Tag::Int(1)]).unwrap();
        list.change_element_kind(TagType::Int);
        assert_eq!(list.len(), 1);
        list.change_element_kind(TagType::String);
        assert!(list.is_empty());
        list.push("ok").unwrap();
    }

    #[test]
    fn display_lists_elements() {
        let list = TagList::from_items(vec![Tag::from("a"), Tag::from("b")]).unwrap();
        assert_eq!(list.to_string(), r#"["a", "b"]"#);
    }
}
