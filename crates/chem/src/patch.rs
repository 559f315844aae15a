//! apply and view patches
//!
//! A patch is an [Object] shaped like the part of a document it refers to.
//!
//! [apply_patch] merges it into a document:
//!
//! | document value | patch value  | [Mutation::Set]     | [Mutation::Unset] |
//! |----------------|--------------|---------------------|-------------------|
//! | missing        | any          | insert              | nothing           |
//! | object         | object       | recurse             | recurse           |
//! | array          | array        | append patch values | remove key        |
//! | equal          | equal        | nothing             | remove key        |
//! | anything else  | anything else| overwrite           | remove key        |
//!
//! Arrays are never descended into, even when they contain objects.
//! Type conflicts are not errors: `set` overwrites and `unset` removes.
//!
//! [view_patch] only follows the shape of a patch and reports what the document holds at its end.
use crate::value::{Object, Value};

/// What to do with an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// create or overwrite
    #[default]
    Set,
    /// delete
    Unset,
    /// read-only query
    Get,
}

impl Action {
    /// The document mutation for this action, `None` for queries
    pub fn mutation(self) -> Option<Mutation> {
        match self {
            Action::Set => Some(Mutation::Set),
            Action::Unset => Some(Mutation::Unset),
            Action::Get => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Set => f.write_str("set"),
            Action::Unset => f.write_str("unset"),
            Action::Get => f.write_str("get"),
        }
    }
}

/// Actions that change a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Set,
    Unset,
}

/// Merge `patch` into `document`
///
/// Takes ownership of the document and returns it after merging. `patch` is left untouched.
pub fn apply_patch(mut document: Object, patch: &Object, mutation: Mutation) -> Object {
    merge(&mut document, patch, mutation, &mut Vec::new());
    document
}

fn merge<'p>(current: &mut Object, patch: &'p Object, mutation: Mutation, path: &mut Vec<&'p str>) {
    for (key, patch_value) in patch {
        path.push(key);

        let Some(current_value) = current.get_mut(key) else {
            if mutation == Mutation::Set {
                tracing::debug!(path = %path.join("."), "insert");
                current.insert(key.clone(), patch_value.clone());
            }
            path.pop();
            continue;
        };

        let remove = match (current_value, patch_value) {
            // the only case where we go deeper
            (Value::Object(current_object), Value::Object(patch_object)) => {
                merge(current_object, patch_object, mutation, path);
                false
            }
            (Value::Array(current_array), Value::Array(patch_array)) => match mutation {
                Mutation::Unset => true,
                Mutation::Set => {
                    tracing::debug!(path = %path.join("."), count = patch_array.len(), "append");
                    current_array.extend(patch_array.iter().cloned());
                    false
                }
            },
            (current_value, patch_value) => match mutation {
                Mutation::Unset => true,
                Mutation::Set if current_value == patch_value => {
                    tracing::trace!(path = %path.join("."), "unchanged");
                    false
                }
                Mutation::Set => {
                    tracing::debug!(
                        path = %path.join("."),
                        from = current_value.kind(),
                        to = patch_value.kind(),
                        "overwrite"
                    );
                    *current_value = patch_value.clone();
                    false
                }
            },
        };

        if remove {
            tracing::debug!(path = %path.join("."), "remove");
            current.shift_remove(key);
        }

        path.pop();
    }
}

/// Result of a successful [view_patch]
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct Lookup {
    /// Keys in traversal order
    pub path: Vec<String>,
    /// Document value at the end of the path
    pub value: Value,
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.join("."), self.value)
    }
}

/// Follow the shape of `patch` through `document`
///
/// Patch values at the end of the chain are ignored, only keys matter.
/// Returns `None` when a key along the way is missing or the document has
/// no object where the patch continues with one.
///
/// Only the first key of each level is followed.
pub fn view_patch(document: &Object, patch: &Object) -> Option<Lookup> {
    let mut path = Vec::new();
    let mut current = document;
    let mut patch = patch;

    loop {
        let (key, patch_value) = patch.first()?;
        let Some(current_value) = current.get(key) else {
            tracing::debug!(path = %path.join("."), %key, "key not found");
            return None;
        };
        path.push(key.clone());

        match (current_value, patch_value) {
            (Value::Object(current_object), Value::Object(patch_object)) => {
                current = current_object;
                patch = patch_object;
            }
            (_, Value::Object(_)) => {
                tracing::debug!(path = %path.join("."), found = current_value.kind(), "not an object");
                return None;
            }
            (current_value, _) => return Some(Lookup::new(path, current_value.clone())),
        }
    }
}
