//! Check registry for managing and creating check instances

use super::*;
use crate::config::RenamerConfig;
use std::collections::HashSet;

/// Get all valid configuration tokens (check ids and category prefixes)
pub fn get_all_valid_tokens() -> HashSet<String> {
    let mut tokens = HashSet::new();

    for check in create_all_checks() {
        tokens.insert(check.category().prefix().to_string());
        tokens.insert(check.id().to_string());
    }

    tokens
}

/// Ids of the checks that configuration cannot disable
pub fn mandatory_check_ids() -> Vec<&'static str> {
    vec!["CNT001", "NAM001", "NAM002", "FS001"]
}

/// Create all enabled checks based on configuration
pub fn create_enabled_checks(config: &RenamerConfig) -> Vec<Box<dyn PlanCheck>> {
    create_all_checks()
        .into_iter()
        .filter(|check| check.mandatory() || config.is_check_enabled(check.id()))
        .collect()
}

/// Create instances of all available checks
pub fn create_all_checks() -> Vec<Box<dyn PlanCheck>> {
    vec![
        Box::new(cnt001_count_mismatch::CountMismatchCheck),
        Box::new(nam001_empty_target::EmptyTargetCheck),
        Box::new(nam002_duplicate_target::DuplicateTargetCheck),
        Box::new(nam003_truncated_target::TruncatedTargetCheck),
        Box::new(nam004_unchanged_target::UnchangedTargetCheck),
        Box::new(fs001_target_collision::TargetCollisionCheck),
        Box::new(cel001_empty_cell_value::EmptyCellValueCheck),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_ids_match_checks() {
        let mut from_checks: Vec<String> = create_all_checks()
            .iter()
            .filter(|c| c.mandatory())
            .map(|c| c.id().to_string())
            .collect();
        from_checks.sort();
        let mut listed: Vec<String> = mandatory_check_ids().iter().map(|s| s.to_string()).collect();
        listed.sort();
        assert_eq!(from_checks, listed);
    }

    #[test]
    fn test_mandatory_checks_stay_enabled() {
        let mut config = RenamerConfig::default();
        config.checks.disabled.insert("NAM".to_string());
        let ids: Vec<String> = create_enabled_checks(&config)
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert!(ids.contains(&"NAM001".to_string()));
        assert!(ids.contains(&"NAM002".to_string()));
        assert!(!ids.contains(&"NAM003".to_string()));
        assert!(!ids.contains(&"NAM004".to_string()));
    }

    #[test]
    fn test_tokens() {
        let tokens = get_all_valid_tokens();
        for token in ["CNT", "NAM", "FS", "CEL", "CNT001", "FS001", "CEL001"] {
            assert!(tokens.contains(token), "missing token {token}");
        }
    }
}
