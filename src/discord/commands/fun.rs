// Fun commands: dice and coins.

use crate::discord::{Context, Error};
use rand::Rng;

/// Roll a die.
#[poise::command(prefix_command, category = "Fun", aliases("dice"))]
pub async fn roll(
    ctx: Context<'_>,
    #[description = "Number of sides (default 6)"] sides: Option<u32>,
) -> Result<(), Error> {
    let sides = sides.unwrap_or(6);
    if sides < 2 {
        ctx.say("A die needs at least 2 sides.").await?;
        return Ok(());
    }

    // Pick before the await; the RNG handle can't cross it.
    let rolled = rand::thread_rng().gen_range(1..=sides);
    ctx.say(format!("🎲 You rolled a **{}** (d{}).", rolled, sides))
        .await?;
    Ok(())
}

/// Flip a coin.
#[poise::command(prefix_command, category = "Fun", aliases("flip"))]
pub async fn coinflip(ctx: Context<'_>) -> Result<(), Error> {
    let heads = rand::thread_rng().gen_bool(0.5);
    let side = if heads { "Heads" } else { "Tails" };
    ctx.say(format!("🪙 **{}**!", side)).await?;
    Ok(())
}
