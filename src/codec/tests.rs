// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::*;
use crate::parts::StandardParts;
use crate::program::ParticleColor;
use crate::proto::spell_v1::{ProgramFrame, VisualFrame};
use prost::Message;
use std::io::Write;

fn codec() -> ProgramCodec {
    ProgramCodec::new(StandardParts::registry(), 4)
}

fn paths(program: &Program) -> Vec<&str> {
    program.iter().map(|i| i.id().path()).collect()
}

#[test]
fn yaml_document_resolves_against_registry() {
    let program = codec()
        .decode_yaml(
            r#"
instructions:
  - glyph_mark
  - spellbook:glyph_delay
  - glyph_jump
visual:
  color: { red: 40, green: 120, blue: 255 }
  style:
    trail: sparkle
"#,
        )
        .unwrap();

    assert_eq!(paths(&program), vec!["glyph_mark", "glyph_delay", "glyph_jump"]);
    assert_eq!(program.visual().color, ParticleColor::new(40, 120, 255));
    assert_eq!(program.visual().style["trail"], serde_json::json!("sparkle"));
}

#[test]
fn missing_visual_uses_defaults() {
    let program = codec().decode_json(r#"{"instructions": ["glyph_jump"]}"#).unwrap();
    assert_eq!(program.visual(), &VisualParams::default());
}

#[test]
fn unknown_instruction_is_rejected() {
    let result = codec().decode_yaml("instructions: [glyph_jump, \"ars:glyph_fireball\"]");
    match result {
        Err(CodecError::UnknownInstruction(id)) => assert_eq!(id, "ars:glyph_fireball"),
        other => panic!("expected unknown instruction, got {:?}", other.map(|p| p.len())),
    }
}

#[test]
fn invalid_identifier_is_rejected() {
    let frame = ProgramFrame {
        instructions: vec!["Glyph Jump".to_string()],
        visual: None,
    };
    let result = codec().decode_network(&frame.encode_to_vec());
    assert!(matches!(result, Err(CodecError::InvalidIdentifier(_))));
}

#[test]
fn program_length_limit_is_enforced() {
    let result = codec().decode_yaml("instructions: [glyph_jump, glyph_jump, glyph_jump, glyph_jump, glyph_jump]");
    assert!(matches!(
        result,
        Err(CodecError::ProgramTooLong { length: 5, limit: 4 })
    ));
}

#[test]
fn network_form_keeps_ids_and_visuals() {
    let codec = codec();
    let mut program = codec.decode_yaml("instructions: [glyph_ward, glyph_echo, glyph_jump]").unwrap();
    let mut visual = program.visual().clone();
    visual.color = ParticleColor::new(1, 2, 3);
    visual.style.insert("shape".to_string(), serde_json::json!({"kind": "ring", "size": 2}));
    program = Program::new(program.instructions().to_vec(), visual);

    let decoded = codec.decode_network(&encode_network(&program).unwrap()).unwrap();
    assert_eq!(decoded, program);
    assert!(decoded.get(0).unwrap().cancel_observer().is_some());
    assert!(decoded.get(1).unwrap().manipulator().is_some());
}

#[test]
fn missing_visual_frame_and_wide_channels() {
    let bare = ProgramFrame {
        instructions: vec!["glyph_jump".to_string()],
        visual: None,
    };
    let decoded = codec().decode_network(&bare.encode_to_vec()).unwrap();
    assert_eq!(decoded.visual(), &VisualParams::default());

    let wide = ProgramFrame {
        instructions: vec!["glyph_jump".to_string()],
        visual: Some(VisualFrame {
            red: 300,
            green: 7,
            blue: 0,
            style_json: String::new(),
        }),
    };
    let decoded = codec().decode_network(&wide.encode_to_vec()).unwrap();
    assert_eq!(decoded.visual().color, ParticleColor::new(255, 7, 0));
}

#[test]
fn bad_style_json_and_garbage_bytes() {
    let frame = ProgramFrame {
        instructions: vec!["glyph_jump".to_string()],
        visual: Some(VisualFrame {
            red: 0,
            green: 0,
            blue: 0,
            style_json: "{not json".to_string(),
        }),
    };
    assert!(matches!(
        codec().decode_network(&frame.encode_to_vec()),
        Err(CodecError::InvalidStyle(_))
    ));
    assert!(matches!(
        codec().decode_network(&[0xff, 0xff, 0xff]),
        Err(CodecError::MalformedFrame(_))
    ));
}

#[test]
fn decoded_context_is_dehydrated() {
    let codec = codec();
    let program = codec.decode_yaml("instructions: [glyph_mark, glyph_jump]").unwrap();
    let ctx = codec
        .decode_context_persistent(encode_persistent(&program))
        .unwrap();

    assert_eq!(ctx.counter(), 0);
    assert!(ctx.caster().is_none());
    assert!(ctx.casting_site().is_none());
    assert!(ctx.previous_context().is_none());
    assert!(!ctx.is_canceled());
    assert!(ctx.has_next());
}

#[test]
fn yaml_and_json_encodings_decode_back() {
    let codec = codec();
    let program = codec.decode_yaml("instructions: [glyph_delay, glyph_jump]").unwrap();
    assert_eq!(codec.decode_yaml(&encode_yaml(&program).unwrap()).unwrap(), program);
    assert_eq!(codec.decode_json(&encode_json(&program).unwrap()).unwrap(), program);
}

#[test]
fn load_file_picks_format_by_extension() {
    let codec = codec();

    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(json, r#"{{"instructions": ["glyph_jump", "glyph_mark"]}}"#).unwrap();
    assert_eq!(paths(&codec.load_file(json.path()).unwrap()), vec!["glyph_jump", "glyph_mark"]);

    let mut yaml = tempfile::Builder::new().suffix(".spell.yaml").tempfile().unwrap();
    write!(yaml, "instructions:\n  - glyph_ward\n").unwrap();
    assert_eq!(paths(&codec.load_file(yaml.path()).unwrap()), vec!["glyph_ward"]);

    assert!(matches!(
        codec.load_file("/definitely/not/here.yaml"),
        Err(CodecError::Io(_))
    ));
}

#[test]
fn registry_debug_lists_sorted_ids() {
    let rendered = format!("{:?}", StandardParts::registry());
    let delay = rendered.find("spellbook:glyph_delay").unwrap();
    let ward = rendered.find("spellbook:glyph_ward").unwrap();
    assert!(delay < ward);
}
