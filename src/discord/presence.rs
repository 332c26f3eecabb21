// This module handles bot presence and lifecycle events.
//
// Everything here is Discord-layer glue: pick a status line from the core
// string pool and push it through the SDK's presence primitives.

use crate::core::strings::StringPool;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;

/// How long the rotator sleeps between presence updates.
const ROTATION_INTERVAL: Duration = Duration::from_secs(30);

/// Set the presence to a random line from the status pool.
pub fn set_random_status(ctx: &serenity::Context, strings: &StringPool) {
    let status = strings.random_status();
    ctx.set_presence(
        Some(serenity::ActivityData::custom(status)),
        serenity::OnlineStatus::Idle,
    );
}

/// Called once the gateway is ready: announce an initial status, then keep
/// rotating it for the lifetime of the process.
pub fn on_ready(ctx: &serenity::Context, strings: Arc<StringPool>) {
    set_random_status(ctx, &strings);

    let ctx = ctx.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(ROTATION_INTERVAL).await;
            set_random_status(&ctx, &strings);
        }
    });
}
