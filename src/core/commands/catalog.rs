// Read-only registry metadata for help and discovery. Populated once at
// startup from the registered framework commands and immutable afterwards.

use std::collections::BTreeMap;

/// Categories that exist for event plumbing, never shown in listings.
const INTERNAL_CATEGORIES: &[&str] = &["Events", "Tracking"];

/// Well-known categories come first in the overview, in this order; anything
/// else follows alphabetically.
const CATEGORY_ORDER: &[&str] = &["Admin", "Moderation", "Fun", "Casual", "Help"];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate command name or alias: {0}")]
    DuplicateName(String),
}

/// Everything discovery needs to know about one registered command.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    pub name: String,
    pub aliases: Vec<String>,
    pub category: String,
    pub hidden: bool,
    /// Full help text; the first line doubles as the summary in listings.
    pub help: String,
    /// Positional signature, e.g. "purge <count>".
    pub signature: String,
    /// Capability names the permission gate demands for this command.
    pub required_capabilities: Vec<String>,
    pub bot_master_only: bool,
}

impl CommandEntry {
    pub fn summary(&self) -> &str {
        self.help.lines().next().unwrap_or("No description available")
    }
}

/// One category as the invoker sees it: runnable commands sorted by name,
/// plus how many commands the listing is not naming.
pub struct CategoryView<'a> {
    pub name: &'a str,
    pub visible: Vec<&'a CommandEntry>,
    pub hidden: usize,
}

pub struct CommandCatalog {
    entries: Vec<CommandEntry>,
}

impl CommandCatalog {
    /// Build the catalog, rejecting any name/alias collision: both mappings
    /// must stay injective or dispatch would be ambiguous.
    pub fn new(entries: Vec<CommandEntry>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            for token in std::iter::once(&entry.name).chain(entry.aliases.iter()) {
                if !seen.insert(token.clone()) {
                    return Err(CatalogError::DuplicateName(token.clone()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Resolve a command by name or alias.
    pub fn find(&self, token: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|e| e.name == token || e.aliases.iter().any(|a| a == token))
    }

    /// Resolve a category by name, case-insensitively, so "?help moderation"
    /// works as well as "?help Moderation". Internal categories don't resolve.
    pub fn category_matching(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .map(|e| e.category.as_str())
            .filter(|c| !INTERNAL_CATEGORIES.contains(c))
            .find(|c| c.eq_ignore_ascii_case(token))
    }

    /// The invoker's view of one category. Hidden commands are counted but
    /// never named; commands the invoker cannot run are dropped entirely.
    pub fn category_view<'a, F>(&'a self, category: &'a str, can_run: F) -> CategoryView<'a>
    where
        F: Fn(&CommandEntry) -> bool,
    {
        let mut visible = Vec::new();
        let mut hidden = 0;

        for entry in self.entries.iter().filter(|e| e.category == category) {
            if entry.hidden {
                hidden += 1;
                continue;
            }
            if can_run(entry) {
                visible.push(entry);
            }
        }

        visible.sort_by(|a, b| a.name.cmp(&b.name));

        CategoryView {
            name: category,
            visible,
            hidden,
        }
    }

    /// Every category the invoker should see, well-known ones first, the
    /// rest alphabetically. Categories with nothing visible are skipped.
    pub fn overview<'a, F>(&'a self, can_run: F) -> Vec<CategoryView<'a>>
    where
        F: Fn(&CommandEntry) -> bool,
    {
        // BTreeMap gives the alphabetical tail for free.
        let mut by_category: BTreeMap<&str, ()> = BTreeMap::new();
        for entry in &self.entries {
            if !INTERNAL_CATEGORIES.contains(&entry.category.as_str()) {
                by_category.insert(entry.category.as_str(), ());
            }
        }

        let mut ordered: Vec<&str> = CATEGORY_ORDER
            .iter()
            .copied()
            .filter(|c| by_category.contains_key(c))
            .collect();
        for category in by_category.keys() {
            if !ordered.contains(category) {
                ordered.push(*category);
            }
        }

        ordered
            .into_iter()
            .map(|category| self.category_view(category, &can_run))
            .filter(|view| !view.visible.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, aliases: &[&str], category: &str, hidden: bool) -> CommandEntry {
        CommandEntry {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category: category.to_string(),
            hidden,
            help: format!("{} does a thing.\nLonger explanation.", name),
            signature: name.to_string(),
            required_capabilities: Vec::new(),
            bot_master_only: false,
        }
    }

    fn catalog() -> CommandCatalog {
        CommandCatalog::new(vec![
            entry("help", &["h"], "Help", false),
            entry("commands", &["cmds", "cmd"], "Help", false),
            entry("purge", &["clear"], "Moderation", false),
            entry("kick", &[], "Moderation", false),
            entry("config", &["settings"], "Admin", false),
            entry("setstatus", &[], "Admin", true),
            entry("roll", &["dice"], "Fun", false),
            entry("ping", &[], "Casual", false),
            entry("track_messages", &[], "Tracking", false),
        ])
        .unwrap()
    }

    #[test]
    fn finds_commands_by_name_and_alias() {
        let catalog = catalog();
        assert_eq!(catalog.find("purge").unwrap().name, "purge");
        assert_eq!(catalog.find("clear").unwrap().name, "purge");
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn rejects_duplicate_names_and_aliases() {
        let result = CommandCatalog::new(vec![
            entry("purge", &["clear"], "Moderation", false),
            entry("wipe", &["clear"], "Moderation", false),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "clear"));
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.category_matching("moderation"), Some("Moderation"));
        assert_eq!(catalog.category_matching("MODERATION"), Some("Moderation"));
        assert_eq!(catalog.category_matching("Nowhere"), None);
    }

    #[test]
    fn hidden_commands_are_counted_but_never_named() {
        let catalog = catalog();
        let view = catalog.category_view("Admin", |_| true);

        assert_eq!(view.hidden, 1);
        assert!(view.visible.iter().all(|e| e.name != "setstatus"));
        assert_eq!(view.visible.len(), 1);
    }

    #[test]
    fn unpermitted_commands_are_filtered_not_counted() {
        let catalog = catalog();
        let view = catalog.category_view("Moderation", |e| e.name != "purge");

        assert_eq!(view.hidden, 0);
        assert_eq!(view.visible.len(), 1);
        assert_eq!(view.visible[0].name, "kick");
    }

    #[test]
    fn category_commands_are_sorted_by_name() {
        let catalog = catalog();
        let view = catalog.category_view("Moderation", |_| true);
        let names: Vec<_> = view.visible.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["kick", "purge"]);
    }

    #[test]
    fn overview_orders_known_categories_first_and_skips_internal_ones() {
        let catalog = catalog();
        let overview = catalog.overview(|_| true);
        let names: Vec<_> = overview.iter().map(|v| v.name).collect();

        assert_eq!(names, vec!["Admin", "Moderation", "Fun", "Casual", "Help"]);
        assert!(!names.contains(&"Tracking"));
    }

    #[test]
    fn overview_drops_categories_with_nothing_visible() {
        let catalog = catalog();
        let overview = catalog.overview(|e| e.category != "Fun");
        assert!(overview.iter().all(|v| v.name != "Fun"));
    }
}
