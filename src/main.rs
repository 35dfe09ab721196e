// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use std::env;
use std::sync::Arc;
use std::time::Instant;
use the_spellbook::codec::ProgramCodec;
use the_spellbook::config::{load_config, EngineConfig};
use the_spellbook::context::{ExecutionContext, ItemStack};
use the_spellbook::engine::SpellScheduler;
use the_spellbook::identifier::Identifier;
use the_spellbook::parts::StandardParts;
use the_spellbook::traits::LivingEntity;
use the_spellbook::world::SandboxWorld;
use tracing_subscriber::EnvFilter;

const CASTER_NAME: &str = "Apprentice";
const CASTER_TOOL: &str = "spell_book";

fn init_tracing(config: &EngineConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.logging.get_filter())
            .context("invalid logging filter")?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <engine-config.yaml|toml> <spell-file> [spell-file ...]", args[0]);
        eprintln!("Example: {} configs/engine.yaml spells/hop.yaml", args[0]);
        std::process::exit(1);
    }

    let config = load_config(&args[1])
        .with_context(|| format!("failed to load engine config '{}'", args[1]))?;
    init_tracing(&config)?;

    let codec = ProgramCodec::new(
        StandardParts::registry(),
        config.limits.get_max_program_length(),
    );
    let mut world = SandboxWorld::new();
    let caster: Arc<dyn LivingEntity> = world.spawn_entity(CASTER_NAME);
    let tool = ItemStack::new(Identifier::from_path(CASTER_TOOL)?, 1);
    let mut scheduler = SpellScheduler::from_config(&config);

    println!("📖 The Spellbook");
    println!("═══════════════════════════════════");
    println!("Config: {}", args[1]);
    println!("Known instructions: {:?}", StandardParts::list_available_implementations());
    println!();

    for spell_file in &args[2..] {
        let program = codec
            .load_file(spell_file)
            .with_context(|| format!("failed to decode spell '{}'", spell_file))?;
        if !program.is_valid() {
            bail!("spell '{}' has no instructions", spell_file);
        }
        println!("✨ {}: {}", spell_file, program.display_string());
        let cast_id = scheduler.cast(ExecutionContext::from_entity(program, &caster, &tool));
        println!("   registered as {}", cast_id);
    }

    let start = Instant::now();
    let interval = scheduler.tick_interval();
    let outcomes = scheduler.drive(&mut world, interval).await;
    let elapsed = start.elapsed();

    println!();
    println!("📊 Results ({:.2?})", elapsed);
    println!("───────────────────────────────────");
    for outcome in &outcomes {
        let status = match &outcome.cancel_reason {
            Some(reason) => format!("canceled ({})", reason),
            None => "completed".to_string(),
        };
        println!(
            "  {} {}: {} step(s), {} fork(s), {} tick(s)",
            outcome.cast_id, status, outcome.steps, outcome.forks, outcome.ticks
        );
    }

    let position = caster.position();
    let velocity = caster.velocity();
    println!();
    println!("🧙 {} after casting:", caster.name());
    println!("   position: ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);
    println!("   velocity: ({:.2}, {:.2}, {:.2})", velocity.x, velocity.y, velocity.z);
    Ok(())
}
