// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

// Network form of a program, kept wire-compatible with spell.v1:
//
//   message VisualFrame  { uint32 red = 1; uint32 green = 2; uint32 blue = 3; string style_json = 4; }
//   message ProgramFrame { repeated string instructions = 1; VisualFrame visual = 2; }
pub mod spell_v1 {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct VisualFrame {
        #[prost(uint32, tag = "1")]
        pub red: u32,
        #[prost(uint32, tag = "2")]
        pub green: u32,
        #[prost(uint32, tag = "3")]
        pub blue: u32,
        #[prost(string, tag = "4")]
        pub style_json: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ProgramFrame {
        #[prost(string, repeated, tag = "1")]
        pub instructions: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
        #[prost(message, optional, tag = "2")]
        pub visual: ::core::option::Option<VisualFrame>,
    }
}

pub use spell_v1::{ProgramFrame, VisualFrame};
