use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// How wire names are derived from internal names for properties without
/// an explicit rename.
///
/// Words are split on `_`, `-`, and case boundaries, so `user_id`,
/// `userId` and `UserID` all give the words `user` and `id`.
///
/// # Examples
///
/// ```
/// use vc_serializer::NamingStrategy;
///
/// assert_eq!(NamingStrategy::CamelCase.apply("created_at"), "createdAt");
/// assert_eq!(NamingStrategy::KebabCase.apply("HTTPServer"), "http-server");
/// assert_eq!(NamingStrategy::Identity.apply("As_Is"), "As_Is");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingStrategy {
    #[default]
    Identity,
    CamelCase,
    PascalCase,
    SnakeCase,
    KebabCase,
    ScreamingSnakeCase,
}

impl NamingStrategy {
    /// Returns the strategy for a serde-style name such as `"camelCase"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "identity" => Self::Identity,
            "camelCase" => Self::CamelCase,
            "PascalCase" => Self::PascalCase,
            "snake_case" => Self::SnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            _ => return None,
        })
    }

    pub fn apply(self, name: &str) -> String {
        if self == Self::Identity {
            return name.to_string();
        }

        let words = split_words(name);
        let mut out = String::with_capacity(name.len() + words.len());
        for (index, word) in words.iter().enumerate() {
            match self {
                Self::Identity => unreachable!(),
                Self::SnakeCase | Self::KebabCase | Self::ScreamingSnakeCase if index > 0 => {
                    out.push(if self == Self::KebabCase { '-' } else { '_' });
                }
                _ => {}
            }
            match self {
                Self::ScreamingSnakeCase => out.push_str(&word.to_uppercase()),
                Self::CamelCase if index == 0 => out.push_str(&word.to_lowercase()),
                Self::CamelCase | Self::PascalCase => capitalize(word, &mut out),
                _ => out.push_str(&word.to_lowercase()),
            }
        }
        out
    }
}

fn capitalize(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut start = None;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if let Some(begin) = start.take() {
                words.push(&name[begin..offset]);
            }
            continue;
        }

        let Some(begin) = start else {
            start = Some(offset);
            continue;
        };

        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);
        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
        if boundary {
            words.push(&name[begin..offset]);
            start = Some(offset);
        }
    }

    if let Some(begin) = start {
        words.push(&name[begin..]);
    }
    words
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{NamingStrategy, split_words};

    #[test]
    fn words() {
        assert_eq!(split_words("user_id"), ["user", "id"]);
        assert_eq!(split_words("userId"), ["user", "Id"]);
        assert_eq!(split_words("UserID"), ["User", "ID"]);
        assert_eq!(split_words("HTTPServer2Go"), ["HTTP", "Server2", "Go"]);
        assert_eq!(split_words("__a--b__"), ["a", "b"]);
    }

    #[test]
    fn strategies() {
        let name = "first_name";
        assert_eq!(NamingStrategy::CamelCase.apply(name), "firstName");
        assert_eq!(NamingStrategy::PascalCase.apply(name), "FirstName");
        assert_eq!(NamingStrategy::SnakeCase.apply("FirstName"), "first_name");
        assert_eq!(NamingStrategy::KebabCase.apply(name), "first-name");
        assert_eq!(NamingStrategy::ScreamingSnakeCase.apply(name), "FIRST_NAME");
        assert_eq!(
            NamingStrategy::from_name("kebab-case"),
            Some(NamingStrategy::KebabCase)
        );
        assert_eq!(NamingStrategy::from_name("Title Case"), None);
    }
}
