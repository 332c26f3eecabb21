// Permission checks as explicit middleware: every check is a pure function
// from an invoker profile to an outcome, and the platform layer decides how
// to deliver denials. Handlers never see a denied invocation.

use std::collections::HashSet;

/// What the platform layer knows about the user behind an invocation.
#[derive(Debug, Clone)]
pub struct InvokerProfile {
    /// String form of the user's snowflake, so it compares directly against
    /// the configured bot-master list.
    pub user_id: String,
    pub in_guild: bool,
    pub is_guild_owner: bool,
    /// Capability names the user effectively holds, lowercase snake_case
    /// (e.g. "manage_messages"). Empty when the set could not be computed.
    pub capabilities: HashSet<String>,
}

impl InvokerProfile {
    /// Profile for an invocation with no guild context (direct message).
    pub fn direct_message(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            in_guild: false,
            is_guild_owner: false,
            capabilities: HashSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Denial {
    /// Capabilities the invoker is missing, in declaration order.
    MissingCapabilities(Vec<String>),
    BotMasterOnly,
    /// The check could not be evaluated (no guild context); fails closed.
    NoGuildContext,
}

impl Denial {
    /// The single human-readable line sent back to the user.
    pub fn message(&self) -> String {
        match self {
            Denial::MissingCapabilities(missing) if missing.len() > 1 => {
                let listed = missing
                    .iter()
                    .map(|c| format_capability(c))
                    .collect::<Vec<_>>()
                    .join("`, `");
                format!(
                    "You need the following permissions to use this command:\n`{}`",
                    listed
                )
            }
            Denial::MissingCapabilities(_) | Denial::NoGuildContext => {
                "You don't have permission to use this command.".to_string()
            }
            Denial::BotMasterOnly => {
                "This command is only available to bot developers.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Allowed,
    Denied(Denial),
}

/// Process-wide permission policy. Bot masters come from configuration at
/// construction time; everything else comes in through the invoker profile.
pub struct PermissionPolicy {
    bot_masters: HashSet<String>,
}

impl PermissionPolicy {
    pub fn new(bot_masters: impl IntoIterator<Item = String>) -> Self {
        Self {
            bot_masters: bot_masters.into_iter().collect(),
        }
    }

    pub fn is_bot_master(&self, user_id: &str) -> bool {
        self.bot_masters.contains(user_id)
    }

    /// The invoker must hold every capability in `required`. Bot masters and
    /// guild owners bypass the check entirely.
    pub fn check_capabilities(&self, invoker: &InvokerProfile, required: &[&str]) -> CheckOutcome {
        if required.is_empty() || self.is_bot_master(&invoker.user_id) {
            return CheckOutcome::Allowed;
        }

        if !invoker.in_guild {
            return CheckOutcome::Denied(Denial::NoGuildContext);
        }

        if invoker.is_guild_owner {
            return CheckOutcome::Allowed;
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|cap| !invoker.capabilities.contains(**cap))
            .map(|cap| cap.to_string())
            .collect();

        if missing.is_empty() {
            CheckOutcome::Allowed
        } else {
            CheckOutcome::Denied(Denial::MissingCapabilities(missing))
        }
    }

    /// Membership in the bot-master set. No owner bypass here.
    pub fn check_bot_master(&self, invoker: &InvokerProfile) -> CheckOutcome {
        if self.is_bot_master(&invoker.user_id) {
            CheckOutcome::Allowed
        } else {
            CheckOutcome::Denied(Denial::BotMasterOnly)
        }
    }
}

/// "manage_messages" -> "Manage Messages", for user-facing denial text and
/// help embeds.
pub fn format_capability(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(caps: &[&str]) -> InvokerProfile {
        InvokerProfile {
            user_id: "1000".to_string(),
            in_guild: true,
            is_guild_owner: false,
            capabilities: caps.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn bot_master_bypasses_capability_check() {
        let policy = PermissionPolicy::new(vec!["1000".to_string()]);

        // An ordinary user without manage_messages is denied...
        let ordinary = InvokerProfile {
            user_id: "2000".to_string(),
            ..member(&[])
        };
        assert!(matches!(
            policy.check_capabilities(&ordinary, &["manage_messages"]),
            CheckOutcome::Denied(_)
        ));

        // ...but the same check passes for a configured bot master.
        assert_eq!(
            policy.check_capabilities(&member(&[]), &["manage_messages"]),
            CheckOutcome::Allowed
        );
    }

    #[test]
    fn guild_owner_bypasses_capability_check() {
        let policy = PermissionPolicy::new(vec![]);
        let owner = InvokerProfile {
            is_guild_owner: true,
            ..member(&[])
        };
        assert_eq!(
            policy.check_capabilities(&owner, &["ban_members"]),
            CheckOutcome::Allowed
        );
    }

    #[test]
    fn missing_one_capability_uses_singular_phrasing() {
        let policy = PermissionPolicy::new(vec![]);
        match policy.check_capabilities(&member(&[]), &["manage_messages"]) {
            CheckOutcome::Denied(denial) => {
                assert_eq!(
                    denial.message(),
                    "You don't have permission to use this command."
                );
            }
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[test]
    fn missing_several_capabilities_lists_them() {
        let policy = PermissionPolicy::new(vec![]);
        match policy.check_capabilities(&member(&["kick_members"]), &["manage_messages", "ban_members", "kick_members"]) {
            CheckOutcome::Denied(Denial::MissingCapabilities(missing)) => {
                assert_eq!(missing, vec!["manage_messages", "ban_members"]);
                let message = Denial::MissingCapabilities(missing).message();
                assert!(message.contains("`Manage Messages`, `Ban Members`"));
            }
            other => panic!("expected missing capabilities, got {:?}", other),
        }
    }

    #[test]
    fn holder_of_all_capabilities_is_allowed() {
        let policy = PermissionPolicy::new(vec![]);
        assert_eq!(
            policy.check_capabilities(&member(&["manage_messages"]), &["manage_messages"]),
            CheckOutcome::Allowed
        );
    }

    #[test]
    fn no_guild_context_fails_closed() {
        let policy = PermissionPolicy::new(vec![]);
        let dm = InvokerProfile::direct_message("3000");
        assert_eq!(
            policy.check_capabilities(&dm, &["manage_messages"]),
            CheckOutcome::Denied(Denial::NoGuildContext)
        );
        // Surfaced as an ordinary denial, not an internal error.
        assert_eq!(
            Denial::NoGuildContext.message(),
            "You don't have permission to use this command."
        );
    }

    #[test]
    fn bot_master_check_has_no_owner_bypass() {
        let policy = PermissionPolicy::new(vec!["1".to_string()]);
        let owner = InvokerProfile {
            user_id: "2".to_string(),
            is_guild_owner: true,
            ..member(&[])
        };
        assert_eq!(
            policy.check_bot_master(&owner),
            CheckOutcome::Denied(Denial::BotMasterOnly)
        );
    }

    #[test]
    fn formats_capability_names() {
        assert_eq!(format_capability("manage_messages"), "Manage Messages");
        assert_eq!(format_capability("administrator"), "Administrator");
    }
}
