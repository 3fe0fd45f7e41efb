//! Icon identifiers and normalization.
//!
//! 永続化された `iconName` は自由テキストになり得るので、読み込み・書き込みの
//! たびに固定の列挙型へ正規化する。外れ値は `Activity` に落とす（ログは出すが
//! 処理は止めない）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic icon name shown next to a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconName {
    Database,
    #[default]
    Activity,
    Server,
    Mail,
    Shield,
    User,
}

impl IconName {
    pub const ALL: [IconName; 6] = [
        IconName::Database,
        IconName::Activity,
        IconName::Server,
        IconName::Mail,
        IconName::Shield,
        IconName::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IconName::Database => "Database",
            IconName::Activity => "Activity",
            IconName::Server => "Server",
            IconName::Mail => "Mail",
            IconName::Shield => "Shield",
            IconName::User => "User",
        }
    }

    /// Exact (already title-cased) lookup.
    pub fn lookup(name: &str) -> Option<Self> {
        IconName::ALL.into_iter().find(|icon| icon.as_str() == name)
    }

    /// Normalize free text into an icon.
    ///
    /// # アルゴリズム
    /// 1. trim
    /// 2. 先頭を大文字、残りを小文字に（`"DATABASE"` -> `"Database"`）
    /// 3. 列挙型に含まれるか確認。含まれなければ `Activity`
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::warn!("missing iconName, defaulting to Activity");
            return IconName::Activity;
        };

        let candidate = title_case(raw.trim());
        match IconName::lookup(&candidate) {
            Some(icon) => icon,
            None => {
                tracing::warn!(
                    icon = %raw,
                    normalized = %candidate,
                    "icon not recognized, defaulting to Activity"
                );
                IconName::Activity
            }
        }
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("database", IconName::Database)]
    #[case("DATABASE", IconName::Database)]
    #[case("Database", IconName::Database)]
    #[case("", IconName::Activity)]
    #[case("unknown", IconName::Activity)]
    #[case("  shield\t", IconName::Shield)]
    #[case("mAIL", IconName::Mail)]
    fn normalize_maps_free_text_into_the_icon_set(
        #[case] raw: &str,
        #[case] expected: IconName,
    ) {
        assert_eq!(IconName::normalize(Some(raw)), expected);
    }

    #[test]
    fn normalize_missing_value_is_activity() {
        assert_eq!(IconName::normalize(None), IconName::Activity);
    }

    #[test]
    fn every_icon_round_trips_through_its_name() {
        for icon in IconName::ALL {
            assert_eq!(IconName::normalize(Some(icon.as_str())), icon);
        }
    }
}
