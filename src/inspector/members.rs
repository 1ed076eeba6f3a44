//! Member collection for class instances and callables
//!
//! Instances list their own properties followed by everything their type
//! ancestry declares. The ancestry walk is a [`MemberWalker`] strategy so other
//! object models can describe their own levels.

use crate::value::{ClassDef, Value};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Upper bound on ancestry levels visited, guards against malformed chains
pub const MAX_ANCESTRY_DEPTH: usize = 64;

/// Intrinsic callable properties that are never listed
pub const FUNCTION_INTRINSICS: [&str; 5] = ["length", "name", "arguments", "caller", "prototype"];

/// Describes one level of a type's ancestry at a time
pub trait MemberWalker {
    /// Members declared at exactly this level
    fn own_members(&self, level: &ClassDef) -> Vec<(String, Value)>;

    /// Next level up, or `None` once the generic base type is reached
    fn parent(&self, level: &ClassDef) -> Option<Rc<ClassDef>>;
}

/// Default walker following [`ClassDef::parent`] links
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassChainWalker;

impl MemberWalker for ClassChainWalker {
    fn own_members(&self, level: &ClassDef) -> Vec<(String, Value)> {
        level.members.clone()
    }

    fn parent(&self, level: &ClassDef) -> Option<Rc<ClassDef>> {
        level.parent.clone()
    }
}

/// Own properties first, then inherited members ordered furthest ancestor first.
///
/// Names are de-duplicated; the value bound to a name is the nearest one, so an
/// own property shadows a member and a subclass member shadows its parent's.
pub fn instance_members(
    own: &[(String, Value)],
    class: Option<&Rc<ClassDef>>,
    walker: &dyn MemberWalker,
) -> Vec<(String, Value)> {
    let mut levels = Vec::new();
    let mut current = class.cloned();
    while let Some(level) = current {
        if levels.len() == MAX_ANCESTRY_DEPTH {
            tracing::warn!(class = %level.name, "ancestry deeper than {MAX_ANCESTRY_DEPTH} levels, truncated");
            break;
        }
        levels.push(walker.own_members(&level));
        current = walker.parent(&level);
    }

    let mut members: Vec<(String, Value)> = Vec::new();
    let mut position: FxHashMap<String, usize> = FxHashMap::default();

    for (name, value) in own {
        if !position.contains_key(name) {
            position.insert(name.clone(), members.len());
            members.push((name.clone(), value.clone()));
        }
    }
    let own_count = members.len();

    for level in levels.into_iter().rev() {
        for (name, value) in level {
            match position.get(&name) {
                Some(&i) if i < own_count => {}
                Some(&i) => members[i].1 = value,
                None => {
                    position.insert(name.clone(), members.len());
                    members.push((name, value));
                }
            }
        }
    }

    members
}

/// Own properties of a callable minus the intrinsic set
pub fn function_members(own: &[(String, Value)]) -> Vec<(String, Value)> {
    own.iter()
        .filter(|(name, _)| !FUNCTION_INTRINSICS.contains(&name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(members: &[(String, Value)]) -> Vec<&str> {
        members.iter().map(|(n, _)| n.as_str()).collect()
    }

    fn animal_chain() -> Rc<ClassDef> {
        let animal = Rc::new(ClassDef::new("Animal").with_method("speak").with_method("eat"));
        let dog = Rc::new(
            ClassDef::new("Dog")
                .with_method("bark")
                .with_member("speak", Value::from("woof"))
                .extends(animal),
        );
        Rc::new(ClassDef::new("Puppy").with_method("play").extends(dog))
    }

    #[test]
    fn test_furthest_ancestor_first() {
        let own = vec![("age".to_string(), Value::from(1))];
        let members = instance_members(&own, Some(&animal_chain()), &ClassChainWalker);
        assert_eq!(names(&members), ["age", "speak", "eat", "bark", "play"]);
    }

    #[test]
    fn test_nearest_definition_wins() {
        let members = instance_members(&[], Some(&animal_chain()), &ClassChainWalker);
        let speak = members.iter().find(|(n, _)| n == "speak").unwrap();
        assert!(matches!(&speak.1, Value::String(s) if s == "woof"));
    }

    #[test]
    fn test_own_property_shadows_member() {
        let own = vec![("bark".to_string(), Value::from(true))];
        let members = instance_members(&own, Some(&animal_chain()), &ClassChainWalker);
        assert_eq!(names(&members).iter().filter(|n| **n == "bark").count(), 1);
        assert!(matches!(members[0].1, Value::Bool(true)));
    }

    #[test]
    fn test_no_class_lists_own_only() {
        let own = vec![("k".to_string(), Value::from("v"))];
        assert_eq!(names(&instance_members(&own, None, &ClassChainWalker)), ["k"]);
    }

    struct Looping(Rc<ClassDef>);

    impl MemberWalker for Looping {
        fn own_members(&self, level: &ClassDef) -> Vec<(String, Value)> {
            level.members.clone()
        }

        fn parent(&self, _level: &ClassDef) -> Option<Rc<ClassDef>> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_walk_is_bounded() {
        let class = Rc::new(ClassDef::new("Loop").with_method("spin"));
        let members = instance_members(&[], Some(&class), &Looping(class.clone()));
        assert_eq!(names(&members), ["spin"]);
    }

    #[test]
    fn test_function_intrinsics_filtered() {
        let own = vec![
            ("length".to_string(), Value::from(2)),
            ("name".to_string(), Value::from("f")),
            ("prototype".to_string(), Value::object::<&str, _>([])),
            ("cache".to_string(), Value::map([])),
        ];
        assert_eq!(names(&function_members(&own)), ["cache"]);
    }
}
