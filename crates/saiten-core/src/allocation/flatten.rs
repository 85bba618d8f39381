//! Depth-first enumeration of criteria

use indexmap::map::Iter;

use super::path::CriterionPath;
use super::{AllocationNode, Criterion};

/// Lazy depth-first, insertion-order walk over every criterion of a schema.
///
/// Each call to `AllocationSchema::flatten` starts a fresh walk, so the
/// sequence can be enumerated as many times as needed.
#[derive(Clone)]
pub struct Flatten<'a> {
    stack: Vec<Iter<'a, String, AllocationNode>>,
    prefix: Vec<&'a str>,
}

impl<'a> Flatten<'a> {
    pub(super) fn new(root: Iter<'a, String, AllocationNode>) -> Self {
        Self {
            stack: vec![root],
            prefix: Vec::new(),
        }
    }

    fn path_to(&self, label: &str) -> CriterionPath {
        let mut labels: Vec<String> = self.prefix.iter().map(|s| s.to_string()).collect();
        labels.push(label.to_string());
        CriterionPath::new(labels)
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (CriterionPath, &'a Criterion);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    // The root iterator has no prefix entry, so this is a no-op for it.
                    self.stack.pop();
                    self.prefix.pop();
                }
                Some((label, AllocationNode::Criterion(criterion))) => {
                    return Some((self.path_to(label), criterion));
                }
                Some((label, AllocationNode::Group(children))) => {
                    self.prefix.push(label);
                    self.stack.push(children.iter());
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Flatten<'_> {}
