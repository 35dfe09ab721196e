// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::*;
use crate::parts::stub::stub_instruction;

fn program(paths: &[&str]) -> Program {
    Program::from_instructions(paths.iter().map(|p| stub_instruction(p).unwrap()).collect())
}

#[test]
fn remainder_has_expected_length_and_instructions() {
    let source = program(&["a", "b", "c", "d"]);
    for i in 0..=source.len() {
        let remainder = source.remainder_from(i);
        assert_eq!(remainder.len(), source.len() - i);
        assert_eq!(remainder.instructions(), &source.instructions()[i..]);
    }
}

#[test]
fn remainder_past_the_end_is_empty() {
    let source = program(&["a", "b"]);
    assert!(source.remainder_from(2).is_empty());
    assert!(source.remainder_from(99).is_empty());
    assert!(!source.remainder_from(99).is_valid());
}

#[test]
fn remainder_is_a_copy_not_a_view() {
    let source = program(&["a", "b", "c"]);
    let remainder = source.remainder_from(1);
    assert!(!remainder.shares_instructions_with(&source));
    assert_eq!(source.len(), 3);
    assert_eq!(remainder.visual(), source.visual());

    let clone = source.clone();
    assert!(clone.shares_instructions_with(&source));
}

#[test]
fn display_string_joins_ids() {
    assert_eq!(
        program(&["glyph_touch", "glyph_jump"]).display_string(),
        "spellbook:glyph_touch -> spellbook:glyph_jump"
    );
    assert_eq!(Program::default().display_string(), "<empty>");
}

#[test]
fn only_non_empty_programs_are_valid() {
    assert!(!Program::default().is_valid());
    assert!(program(&["a"]).is_valid());
}

#[test]
fn visual_params_deserialize_with_defaults() {
    let visual: VisualParams = serde_json::from_str(r#"{"style": {"trail": "smoke"}}"#).unwrap();
    assert_eq!(visual.color, ParticleColor::default());
    assert_eq!(visual.style.len(), 1);
}
