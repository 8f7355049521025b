use serde::{Deserialize, Serialize};

/// Prefix the store uses for user-labelled categories.
pub(crate) const CUSTOM_PREFIX: &str = "Other: ";

static FIXED: [Category; 5] = [
    Category::Groceries,
    Category::Utilities,
    Category::Rent,
    Category::Entertainment,
    Category::Transport,
];

/// Spending category of a transaction or budget.
///
/// The store only knows plain strings. The mapping to and from that string
/// form lives in the `From` impls below and is applied by serde, so every
/// comparison in the crate works on this enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Groceries,
    Utilities,
    Rent,
    Entertainment,
    Transport,
    /// Bare `Other`, chosen but not yet labelled.
    Other,
    /// `Other: <label>`, label kept verbatim.
    Custom(String),
    /// A stored value outside the known forms, kept verbatim.
    Unlisted(String),
}

impl Category {
    /// The closed set of categories, in display order.
    pub fn fixed() -> &'static [Category] {
        &FIXED
    }

    /// The fixed set joined for help and error text.
    pub fn fixed_names() -> String {
        FIXED.iter().map(Category::to_string).collect::<Vec<_>>().join(", ")
    }

    /// Parse the stored string form. Never fails: unknown values become
    /// `Unlisted` so they still compare equal to themselves.
    pub fn parse(s: &str) -> Self {
        match s {
            "Groceries" => Self::Groceries,
            "Utilities" => Self::Utilities,
            "Rent" => Self::Rent,
            "Entertainment" => Self::Entertainment,
            "Transport" => Self::Transport,
            "Other" => Self::Other,
            _ => match s.strip_prefix(CUSTOM_PREFIX) {
                Some(label) => Self::Custom(label.to_string()),
                None => Self::Unlisted(s.to_string()),
            },
        }
    }

    /// The user's label for `Custom`, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Custom(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other | Self::Custom(_))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Groceries => write!(f, "Groceries"),
            Self::Utilities => write!(f, "Utilities"),
            Self::Rent => write!(f, "Rent"),
            Self::Entertainment => write!(f, "Entertainment"),
            Self::Transport => write!(f, "Transport"),
            Self::Other => write!(f, "Other"),
            Self::Custom(label) => write!(f, "{CUSTOM_PREFIX}{label}"),
            Self::Unlisted(raw) => write!(f, "{raw}"),
        }
    }
}
