// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::CodecError;
use crate::identifier::Identifier;
use crate::program::{ParticleColor, Program, VisualParams};
use crate::proto::spell_v1::{ProgramFrame, VisualFrame};
use prost::Message;
use std::collections::BTreeMap;

pub(super) fn to_frame(program: &Program) -> Result<ProgramFrame, CodecError> {
    let visual = program.visual();
    let style_json = if visual.style.is_empty() {
        String::new()
    } else {
        serde_json::to_string(&visual.style).map_err(CodecError::InvalidStyle)?
    };
    Ok(ProgramFrame {
        instructions: program
            .iter()
            .map(|instruction| instruction.id().to_string())
            .collect(),
        visual: Some(VisualFrame {
            red: visual.color.red.into(),
            green: visual.color.green.into(),
            blue: visual.color.blue.into(),
            style_json,
        }),
    })
}

/// Encode a program into its network form.
pub fn encode_network(program: &Program) -> Result<Vec<u8>, CodecError> {
    Ok(to_frame(program)?.encode_to_vec())
}

/// Split a frame into instruction ids and visual parameters.
///
/// A missing visual frame yields default visuals. Out-of-range colour channels
/// saturate at 255.
pub(super) fn from_frame(frame: ProgramFrame) -> Result<(Vec<Identifier>, VisualParams), CodecError> {
    let ids = frame
        .instructions
        .iter()
        .map(|raw| raw.parse::<Identifier>())
        .collect::<Result<Vec<_>, _>>()?;

    let visual = match frame.visual {
        Some(visual) => {
            let style: BTreeMap<String, serde_json::Value> = if visual.style_json.is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&visual.style_json).map_err(CodecError::InvalidStyle)?
            };
            VisualParams {
                color: ParticleColor::new(
                    channel(visual.red),
                    channel(visual.green),
                    channel(visual.blue),
                ),
                style,
            }
        }
        None => VisualParams::default(),
    };
    Ok((ids, visual))
}

pub(super) fn decode_frame(bytes: &[u8]) -> Result<ProgramFrame, CodecError> {
    Ok(ProgramFrame::decode(bytes)?)
}

fn channel(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
