//! Rule and alias name validation

use crate::error::{Result, RuleshareError};

/// Names that would shadow a source grammar prefix
pub const RESERVED_ALIASES: [&str; 4] = ["github", "http", "https", "file"];

const INVALID_RULE_CHARS: [char; 8] = ['\\', ':', '*', '?', '"', '<', '>', '|'];

/// Validate a rule name
///
/// `/` is allowed: bulk-add derives nested names like `sub/guide` from
/// repository paths. Dots are rejected (the synced file's extension is
/// appended to the name).
pub fn validate_rule_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid_rule(name, "name cannot be empty"));
    }

    if name.contains(INVALID_RULE_CHARS) || name.contains('.') {
        return Err(invalid_rule(
            name,
            "contains invalid characters (avoid: \\ : * ? \" < > | .)",
        ));
    }

    if name.starts_with(['.', '-', '/']) {
        return Err(invalid_rule(name, "cannot start with '.', '-' or '/'"));
    }

    Ok(())
}

/// Validate a source alias name
pub fn validate_alias_name(alias: &str) -> Result<()> {
    if alias.trim().is_empty() {
        return Err(RuleshareError::InvalidAliasName {
            alias: alias.to_string(),
            reason: "alias cannot be empty".to_string(),
        });
    }

    if RESERVED_ALIASES.contains(&alias.to_lowercase().as_str()) {
        return Err(RuleshareError::ReservedAlias {
            alias: alias.to_string(),
        });
    }

    if alias.contains(':') {
        return Err(RuleshareError::InvalidAliasName {
            alias: alias.to_string(),
            reason: "alias cannot contain ':'".to_string(),
        });
    }

    Ok(())
}

fn invalid_rule(name: &str, reason: &str) -> RuleshareError {
    RuleshareError::InvalidRuleName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
