// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::*;
use crate::identifier::Identifier;
use crate::program::VisualParams;
use crate::parts::stub::{manipulator_instruction, observer_instruction, stub_instruction, Journal};
use crate::traits::{BlockPos, Position};
use crate::world::{SandboxSite, SandboxWorld};
use std::sync::atomic::{AtomicU32, Ordering};

fn program(paths: &[&str]) -> Program {
    Program::from_instructions(paths.iter().map(|p| stub_instruction(p).unwrap()).collect())
}

fn id(path: &str) -> Identifier {
    Identifier::from_path(path).unwrap()
}

#[test]
fn jump_jump_scenario() {
    let mut ctx = ExecutionContext::dehydrated(program(&["glyph_jump", "glyph_jump"]));
    assert!(ctx.has_next());

    let first = ctx.advance().unwrap();
    assert_eq!(first.id().path(), "glyph_jump");
    assert_eq!(ctx.counter(), 1);
    assert!(ctx.has_next());

    let second = ctx.advance().unwrap();
    assert_eq!(second.id().path(), "glyph_jump");
    assert_eq!(ctx.counter(), 2);
    assert!(!ctx.has_next());
}

#[test]
fn advance_yields_each_instruction_then_none_forever() {
    let source = program(&["a", "b", "c"]);
    let mut ctx = ExecutionContext::dehydrated(source.clone());
    for expected in source.iter() {
        assert_eq!(&ctx.advance().unwrap(), expected);
    }
    for _ in 0..3 {
        assert!(ctx.advance().is_none());
    }
    assert!(!ctx.has_next());
}

#[test]
fn out_of_bounds_counter_is_recovered() {
    let mut ctx = ExecutionContext::dehydrated(program(&["a"]));
    ctx.set_counter(7);
    assert!(!ctx.has_next());
    assert!(ctx.advance().is_none());
    assert_eq!(ctx.counter(), 8);
    assert!(ctx.remainder().is_empty());
}

#[test]
fn has_next_is_false_after_cancel_or_terminate() {
    let mut canceled = ExecutionContext::dehydrated(program(&["a", "b"]));
    assert!(canceled.cancel(CancelReason::NewContext));
    assert!(!canceled.has_next());
    assert_eq!(canceled.cancel_reason(), Some(&CancelReason::NewContext));

    let mut terminated = ExecutionContext::dehydrated(program(&["a", "b"]));
    terminated.advance();
    terminated.terminate();
    assert!(!terminated.has_next());
    assert!(terminated.is_canceled());
    assert_eq!(terminated.cancel_reason(), Some(&CancelReason::Terminated));
}

#[test]
fn cancel_reason_only_set_when_canceled() {
    let ctx = ExecutionContext::dehydrated(program(&["a"]));
    assert!(!ctx.is_canceled());
    assert!(ctx.cancel_reason().is_none());
}

#[test]
fn cancel_walk_stops_at_first_false() {
    let journal = Journal::new();
    let mut ctx = ExecutionContext::dehydrated(Program::from_instructions(vec![
        observer_instruction("a", true, &journal).unwrap(),
        observer_instruction("b", false, &journal).unwrap(),
        observer_instruction("c", true, &journal).unwrap(),
    ]));

    ctx.cancel(CancelReason::Custom(id("fizzle")));
    assert_eq!(
        journal.entries(),
        vec!["canceled:a".to_string(), "canceled:b".to_string()]
    );
}

#[test]
fn cancel_walk_covers_only_the_remainder() {
    let journal = Journal::new();
    let mut ctx = ExecutionContext::dehydrated(Program::from_instructions(vec![
        observer_instruction("done", true, &journal).unwrap(),
        stub_instruction("plain").unwrap(),
        observer_instruction("pending", true, &journal).unwrap(),
    ]));
    ctx.advance();

    ctx.cancel(CancelReason::NewContext);
    assert_eq!(journal.entries(), vec!["canceled:pending".to_string()]);
}

#[test]
fn terminate_runs_no_walk() {
    let journal = Journal::new();
    let mut ctx = ExecutionContext::dehydrated(Program::from_instructions(vec![
        observer_instruction("a", true, &journal).unwrap(),
    ]));
    ctx.terminate();
    assert!(journal.entries().is_empty());
}

#[test]
fn reset_rearms_a_canceled_exhausted_context() {
    let mut ctx = ExecutionContext::dehydrated(program(&["a", "b"]));
    ctx.advance();
    ctx.advance();
    ctx.cancel(CancelReason::Custom(id("fizzle")));
    assert!(!ctx.has_next());

    ctx.reset();
    assert!(ctx.has_next());
    assert_eq!(ctx.counter(), 0);
    assert!(!ctx.is_canceled());
    assert_eq!(ctx.cancel_reason(), Some(&CancelReason::Custom(id("fizzle"))));
}

#[test]
fn suspension_blocks_only_while_positive() {
    let mut ctx = ExecutionContext::dehydrated(program(&["a"]));
    ctx.delay(1);
    assert!(ctx.is_suspended());
    assert!(!ctx.has_next());

    ctx.suspension_mut().unwrap().tick();
    assert!(!ctx.is_suspended());
    assert!(ctx.has_next());

    ctx.delay(-3);
    assert!(ctx.has_next());
    assert_eq!(ctx.take_suspension().unwrap().remaining(), -3);
    assert!(ctx.suspension().is_none());
}

#[test]
fn clone_owns_its_mutable_state() {
    let mut world = SandboxWorld::new();
    let caster: Arc<dyn LivingEntity> = world.spawn_entity("Steve");
    let wand = ItemStack::new(id("wand"), 1);
    let mut original = ExecutionContext::from_entity(program(&["a"]), &caster, &wand);
    original.tag_mut().insert("charge".to_string(), 3.into());
    original.attachments_mut().insert(id("hits"), AtomicU32::new(1));

    let mut clone = original.clone();
    clone.tag_mut().insert("charge".to_string(), 9.into());
    clone.attachments_mut().insert(id("extra"), 1u8);
    clone.attachments_mut().remove(&id("hits"));
    clone.caster_tool_mut().count = 64;
    clone.set_colors(ParticleColor::new(0, 0, 0));
    clone.advance();

    assert_eq!(original.tag().get("charge"), Some(&serde_json::Value::from(3)));
    assert!(original.attachments().contains(&id("hits")));
    assert!(!original.attachments().contains(&id("extra")));
    assert_eq!(original.caster_tool().count, 1);
    assert_eq!(original.colors(), ParticleColor::default());
    assert_eq!(original.counter(), 0);
    assert!(clone.program().shares_instructions_with(original.program()));
}

#[test]
fn clone_shares_caster_and_attachment_values() {
    let mut world = SandboxWorld::new();
    let caster: Arc<dyn LivingEntity> = world.spawn_entity("Steve");
    let mut original = ExecutionContext::dehydrated(program(&["a"])).with_caster(&caster);
    original.attachments_mut().insert(id("hits"), AtomicU32::new(1));

    let clone = original.clone();
    original
        .caster()
        .unwrap()
        .set_position(Position::new(5.0, 70.0, 5.0));
    assert_eq!(clone.caster().unwrap().position(), Position::new(5.0, 70.0, 5.0));

    clone
        .attachments()
        .get::<AtomicU32>(&id("hits"))
        .unwrap()
        .store(2, Ordering::Relaxed);
    assert_eq!(
        original
            .attachments()
            .get::<AtomicU32>(&id("hits"))
            .unwrap()
            .load(Ordering::Relaxed),
        2
    );

    original.set_caster(None);
    assert!(original.caster().is_none());
    assert!(clone.caster().is_some());
}

#[test]
fn fork_prefers_first_eligible_manipulator() {
    let journal = Journal::new();
    let proposal = program(&["x"]);
    let mut ctx = ExecutionContext::dehydrated(Program::from_instructions(vec![
        stub_instruction("split").unwrap(),
        manipulator_instruction("m1", false, None, &journal).unwrap(),
        manipulator_instruction("m2", true, Some(proposal.clone()), &journal).unwrap(),
        manipulator_instruction("m3", true, Some(program(&["y"])), &journal).unwrap(),
    ]));
    ctx.advance();

    let parent_id = ContextId::from_raw(11);
    let child = ctx.make_child(parent_id);
    assert_eq!(child.program(), &proposal);
    assert_eq!(child.previous_context(), Some(parent_id));
    assert_eq!(child.tag().get("proposed_by").unwrap(), "m2");
    assert!(!journal.entries().iter().any(|e| e.ends_with(":m3")));
}

#[test]
fn default_fork_runs_remainder_from_zero() {
    let journal = Journal::new();
    let mut world = SandboxWorld::new();
    let caster: Arc<dyn LivingEntity> = world.spawn_entity("Steve");
    let mut ctx = ExecutionContext::dehydrated(Program::from_instructions(vec![
        stub_instruction("split").unwrap(),
        manipulator_instruction("pushes_nothing", true, None, &journal).unwrap(),
        stub_instruction("tail").unwrap(),
    ]))
    .with_caster(&caster);
    ctx.tag_mut().insert("charge".to_string(), 1.into());
    ctx.advance();

    let child = ctx.make_child(ContextId::from_raw(3));
    assert_eq!(child.counter(), 0);
    assert_eq!(child.program(), &ctx.remainder());
    assert_eq!(child.previous_context(), Some(ContextId::from_raw(3)));
    assert_eq!(child.tag().get("charge"), ctx.tag().get("charge"));
    assert_eq!(
        child.caster().unwrap().entity_id(),
        caster.entity_id()
    );
}

#[test]
fn resolve_caster_prefers_caster_then_site_then_placeholder() {
    let mut world = SandboxWorld::new();
    let caster: Arc<dyn LivingEntity> = world.spawn_entity("Steve");
    let site: Arc<dyn CastingSite> = Arc::new(SandboxSite::new(BlockPos::new(0, 10, 0), "turret"));

    let with_both = ExecutionContext::dehydrated(Program::default())
        .with_caster(&caster)
        .with_casting_site(&site);
    assert_eq!(with_both.resolve_caster(&world).entity_id(), caster.entity_id());

    let site_only = ExecutionContext::dehydrated(Program::default()).with_casting_site(&site);
    let stand_in = site_only.resolve_caster(&world);
    assert_eq!(stand_in.entity_id(), world.placeholder().entity_id());
    assert_eq!(stand_in.position(), Position::new(0.0, 10.0, 0.0));

    world.placeholder().set_position(Position::new(9.0, 9.0, 9.0));
    let bare = ExecutionContext::dehydrated(Program::default()).resolve_caster(&world);
    assert_eq!(bare.position(), Position::new(9.0, 9.0, 9.0));
}

#[test]
fn colors_follow_program_visuals() {
    let visual = VisualParams {
        color: ParticleColor::new(10, 20, 30),
        ..VisualParams::default()
    };
    let ctx = ExecutionContext::dehydrated(Program::new(Vec::new(), visual));
    assert_eq!(ctx.colors(), ParticleColor::new(10, 20, 30));
}

#[test]
fn debug_describes_caster_and_site() {
    let site: Arc<dyn CastingSite> = Arc::new(SandboxSite::new(BlockPos::new(1, 2, 3), "rune"));
    let ctx = ExecutionContext::dehydrated(program(&["a"])).with_casting_site(&site);
    let rendered = format!("{:?}", ctx);
    assert!(rendered.contains("rune @ 1,2,3"));
    assert!(rendered.contains("<none>"));
}
