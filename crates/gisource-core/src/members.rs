//! Group member directory — name → email routing for notifications.

use std::path::Path;

use crate::error::{GisourceError, Result};

/// Read-only directory of group members, in file order. File order matters:
/// the first entry is the fallback recipient when a name is unknown.
#[derive(Debug, Clone, Default)]
pub struct GroupMembers {
    entries: Vec<(String, String)>,
}

impl GroupMembers {
    /// Parse a directory file: one "name,email" per line, first comma splits.
    /// Lines without a comma are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GisourceError::Config(format!(
                "Failed to read group members file {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| {
                let (name, email) = line.trim().split_once(',')?;
                Some((name.trim().to_string(), email.trim().to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, email)| email.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// First entry's email, the fallback address for unknown recipients.
    pub fn first_email(&self) -> Option<&str> {
        self.entries.first().map(|(_, email)| email.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory() {
        let members = GroupMembers::parse("张三, zhangsan@example.com\n李四,lisi@example.com\nnot a pair\n");
        assert_eq!(members.get("张三"), Some("zhangsan@example.com"));
        assert_eq!(members.get("李四"), Some("lisi@example.com"));
        assert_eq!(members.get("王五"), None);
        assert_eq!(members.first_email(), Some("zhangsan@example.com"));
    }

    #[test]
    fn test_email_with_comma_keeps_remainder() {
        // Only the first comma splits.
        let members = GroupMembers::parse("a,b,c\n");
        assert_eq!(members.get("a"), Some("b,c"));
    }
}
