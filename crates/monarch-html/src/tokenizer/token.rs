use core::fmt;

/// An attribute on a start tag token.
///
/// Names are case-folded by the tokenizer; values keep their case with one
/// layer of matching quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Case-folded attribute name.
    pub name: String,
    /// Attribute value, empty for bare attributes like `disabled`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The tokenizer emits tokens of these types to the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A maximal run of characters outside any tag.
    Text(String),

    /// `<name attr=value ...>`. A trailing `/` has already been stripped.
    StartTag {
        /// Case-folded tag name.
        name: String,
        /// Attributes in source order. Later duplicates win when the element
        /// is built.
        attributes: Vec<Attribute>,
    },

    /// `</name>`.
    EndTag {
        /// Case-folded tag name, possibly empty for `</>`.
        name: String,
    },

    /// `<!...>`: doctypes and comments. The tree builder discards these.
    Declaration(String),
}

impl Token {
    /// Returns true if this token carries no meaning for tree construction.
    #[must_use]
    pub const fn is_declaration(&self) -> bool {
        matches!(self, Self::Declaration(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::StartTag { name, attributes } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    if attr.value.is_empty() {
                        write!(f, " {}", attr.name)?;
                    } else {
                        write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                    }
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Declaration(body) => write!(f, "<{body}>"),
        }
    }
}
