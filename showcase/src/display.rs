use crate::types::RepositoryDescriptor;

const DEFAULT_BADGE_CLASS: &str = "bg-gray-400";

const LANGUAGE_BADGE_CLASSES: [(&str, &str); 15] = [
    ("JavaScript", "bg-yellow-400"),
    ("TypeScript", "bg-blue-600"),
    ("Python", "bg-blue-500"),
    ("HTML", "bg-red-500"),
    ("CSS", "bg-purple-500"),
    ("Java", "bg-orange-500"),
    ("C", "bg-gray-500"),
    ("C++", "bg-pink-500"),
    ("C#", "bg-green-600"),
    ("Ruby", "bg-red-600"),
    ("PHP", "bg-indigo-400"),
    ("Swift", "bg-orange-600"),
    ("Go", "bg-cyan-500"),
    ("Kotlin", "bg-purple-600"),
    ("Rust", "bg-brown-500"),
];

/// Colour of the language dot on a repository card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageBadge {
    /// Colour reported by the upstream, e.g. `#f1e05a`.
    Hex(String),
    /// Stylesheet class from the built-in table.
    Class(&'static str),
}

impl LanguageBadge {
    pub fn css_class(&self) -> String {
        match self {
            LanguageBadge::Hex(hex) => format!("bg-[{}]", hex),
            LanguageBadge::Class(class) => (*class).to_string(),
        }
    }
}

pub fn language_badge(language: &str, color: Option<&str>) -> LanguageBadge {
    if let Some(color) = color.filter(|c| !c.is_empty()) {
        return LanguageBadge::Hex(color.to_string());
    }

    let class = LANGUAGE_BADGE_CLASSES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, class)| *class)
        .unwrap_or(DEFAULT_BADGE_CLASS);
    LanguageBadge::Class(class)
}

/// `None` when the repository has no known language and no dot is drawn.
pub fn descriptor_badge(repo: &RepositoryDescriptor) -> Option<LanguageBadge> {
    repo.has_language().then(|| {
        language_badge(
            &repo.primary_language_name,
            repo.primary_language_color.as_deref(),
        )
    })
}

pub fn format_size(kilobytes: u64) -> String {
    if kilobytes < 1024 {
        format!("{:.1} KB", kilobytes as f64)
    } else {
        format!("{:.1} MB", kilobytes as f64 / 1024.0)
    }
}

/// One-line summary used by text renderers. Zero counts are omitted.
pub fn summary_line(repo: &RepositoryDescriptor) -> String {
    let mut parts = vec![repo.name.clone()];
    if repo.has_language() {
        parts.push(repo.primary_language_name.clone());
    }
    if repo.star_count > 0 {
        parts.push(format!("★ {}", repo.star_count));
    }
    if repo.fork_count > 0 {
        parts.push(format!("forks {}", repo.fork_count));
    }
    parts.push(format_size(repo.size_in_kilobytes));
    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_repositories;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.0 KB");
        assert_eq!(format_size(1023), "1023.0 KB");
        assert_eq!(format_size(1024), "1.0 MB");
        assert_eq!(format_size(22806), "22.3 MB");
    }

    #[test]
    fn test_language_badge_prefers_explicit_color() {
        assert_eq!(
            language_badge("JavaScript", Some("#f1e05a")),
            LanguageBadge::Hex("#f1e05a".to_string())
        );
        assert_eq!(
            language_badge("Go", None),
            LanguageBadge::Class("bg-cyan-500")
        );
        assert_eq!(
            language_badge("Zig", None).css_class(),
            DEFAULT_BADGE_CLASS
        );
        assert_eq!(
            language_badge("CSS", Some("#563d7c")).css_class(),
            "bg-[#563d7c]"
        );
    }

    #[test]
    fn test_descriptor_badge_hidden_without_language() {
        let repo = RepositoryDescriptor::new("anixane", "Plain");
        assert_eq!(descriptor_badge(&repo), None);
    }

    #[test]
    fn test_summary_line() {
        let repos = fallback_repositories();
        assert_eq!(
            summary_line(&repos[0]),
            "Google-Store-Locator  JavaScript  ★ 2  22.3 MB"
        );
        assert_eq!(
            summary_line(&repos[5]),
            "Amazon-ReactJS-Clone  JavaScript  20.6 MB"
        );
    }
}
