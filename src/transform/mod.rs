//! Structural analysis of a class before emission.

mod selector;

pub use selector::{
    Category, FieldModifier, GroupLabel, MemberGroup, MethodModifier, Selection, classify,
    select_members,
};
