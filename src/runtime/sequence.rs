//! Uniform view over the sequenceable kinds.
//!
//! Strings and lists are the only kinds that support indexing, slicing, and
//! `for`-iteration. A [`Sequence`] wraps either one behind a shared API;
//! string positions are Unicode codepoints, and indexing a string yields a
//! single-codepoint string.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::object::Object;

pub enum Sequence {
    List(Rc<RefCell<Vec<Object>>>),
    Str(Vec<char>),
}

impl Sequence {
    /// Wraps a sequenceable object; `None` for every other kind.
    pub fn of(object: &Object) -> Option<Sequence> {
        match object {
            Object::List(elements) => Some(Sequence::List(elements.clone())),
            Object::Str(value) => Some(Sequence::Str(value.chars().collect())),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Sequence::List(elements) => elements.borrow().len(),
            Sequence::Str(chars) => chars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Object> {
        match self {
            Sequence::List(elements) => elements.borrow().get(index).cloned(),
            Sequence::Str(chars) => chars.get(index).map(|c| Object::str(c.to_string())),
        }
    }

    /// The `[start, end)` sub-sequence; caller has validated the bounds.
    pub fn slice(&self, start: usize, end: usize) -> Object {
        match self {
            Sequence::List(elements) => Object::list(elements.borrow()[start..end].to_vec()),
            Sequence::Str(chars) => Object::str(chars[start..end].iter().collect::<String>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_sequence_indexes_and_slices() {
        let list = Object::list(vec![Object::Int(10), Object::Int(20), Object::Int(30)]);
        let seq = Sequence::of(&list).expect("list is sequenceable");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(1).map(|v| v.to_output()), Some("20".into()));
        assert!(seq.get(3).is_none());
        assert_eq!(seq.slice(1, 3).to_output(), "[20, 30]");
    }

    #[test]
    fn string_sequence_yields_codepoint_strings() {
        let text = Object::str("héllo");
        let seq = Sequence::of(&text).expect("string is sequenceable");
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.get(1).map(|v| v.to_output()), Some("é".into()));
        assert_eq!(seq.slice(0, 2).to_output(), "hé");
    }

    #[test]
    fn empty_slice_of_empty_sequence() {
        let seq = Sequence::of(&Object::str("")).expect("string is sequenceable");
        assert_eq!(seq.slice(0, 0).to_output(), "");
    }

    #[test]
    fn only_strings_and_lists_are_sequenceable() {
        assert!(Sequence::of(&Object::str("ab")).is_some());
        assert!(Sequence::of(&Object::list(Vec::new())).is_some());
        assert!(Sequence::of(&Object::Int(3)).is_none());
        assert!(
            Sequence::of(&Object::dict(crate::runtime::dict::DictObject::new())).is_none()
        );
        assert!(Sequence::of(&Object::Nil).is_none());
    }
}
