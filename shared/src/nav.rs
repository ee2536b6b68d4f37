/// Role that sees every menu entry regardless of the entry's own role.
pub const PRIVILEGED_ROLE: &str = "sudo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: &'static str,
    pub role: &'static str,
    pub path: &'static str,
}

pub const MENU: [MenuEntry; 4] = [
    MenuEntry { title: "Summary", role: "manager", path: "/summary" },
    MenuEntry { title: "Calendar", role: "manager", path: "/calendar" },
    MenuEntry { title: "Orders", role: "manager", path: "/orders" },
    MenuEntry { title: "Add Users", role: "sudo", path: "/sudo/users/add" },
];

/// Menu entries available to `role`, in menu order, minus the page titled `current`.
pub fn visible_entries(role: &str, current: &str) -> Vec<&'static MenuEntry> {
    MENU.iter()
        .filter(|entry| entry.role == role || role == PRIVILEGED_ROLE)
        .filter(|entry| entry.title != current)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(entries: Vec<&MenuEntry>) -> Vec<&'static str> {
        entries.into_iter().map(|e| e.title).collect()
    }

    #[test]
    fn test_manager_on_summary_page() {
        assert_eq!(titles(visible_entries("manager", "Summary")), vec!["Calendar", "Orders"]);
    }

    #[test]
    fn test_sudo_sees_everything() {
        assert_eq!(
            titles(visible_entries("sudo", "")),
            vec!["Summary", "Calendar", "Orders", "Add Users"]
        );
        assert_eq!(titles(visible_entries("sudo", "Add Users")).len(), 3);
    }

    #[test]
    fn test_unknown_role_sees_nothing() {
        assert!(visible_entries("guest", "").is_empty());
        assert!(visible_entries("", "").is_empty());
    }
}
