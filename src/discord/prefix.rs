// Dynamic prefix hook. The framework hands us every inbound message; we
// resolve the guild's effective prefix list through the settings service and
// return the matched prefix plus the remaining text, or `None` to ignore the
// message entirely.

use crate::core::commands::router;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

pub async fn stripped_dynamic_prefix<'a>(
    _ctx: &'a serenity::Context,
    message: &'a serenity::Message,
    data: &'a Data,
) -> Result<Option<(&'a str, &'a str)>, Error> {
    let prefixes = match message.guild_id {
        Some(guild_id) => {
            let guild_id = guild_id.get();
            let custom = data.settings.custom_prefix(guild_id).await;
            let use_defaults = data.settings.use_default_prefix(guild_id).await;
            router::resolve_prefixes(
                custom.as_deref(),
                use_defaults,
                &data.config.default_prefixes,
            )
        }
        // Direct messages always accept the full default list.
        None => data.config.default_prefixes.clone(),
    };

    Ok(router::match_prefix(&message.content, &prefixes))
}
