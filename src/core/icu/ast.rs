/// One element of a parsed ICU message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcuElement {
    /// Literal text, with ICU apostrophe quoting already resolved.
    Literal(String),
    /// `{name}`
    Argument { name: String },
    /// `{name, number}`, `{name, date, short}`, ...
    Simple {
        name: String,
        kind: SimpleKind,
        style: Option<String>,
    },
    /// `{name, plural, ...}` or `{name, selectordinal, ...}`
    Plural {
        name: String,
        ordinal: bool,
        offset: i64,
        options: Vec<IcuOption>,
    },
    /// `{name, select, ...}`
    Select { name: String, options: Vec<IcuOption> },
    /// `#` inside a plural branch.
    Pound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKind {
    Number,
    Date,
    Time,
}

impl SimpleKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "number" => Some(SimpleKind::Number),
            "date" => Some(SimpleKind::Date),
            "time" => Some(SimpleKind::Time),
            _ => None,
        }
    }
}

/// A branch of a plural or select element, e.g. `=0 {no items}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcuOption {
    pub selector: String,
    pub value: Vec<IcuElement>,
}

/// Names of all arguments referenced by a message, in first-seen order.
pub fn argument_names(elements: &[IcuElement]) -> Vec<String> {
    fn walk(elements: &[IcuElement], names: &mut Vec<String>) {
        for element in elements {
            let name = match element {
                IcuElement::Argument { name }
                | IcuElement::Simple { name, .. }
                | IcuElement::Plural { name, .. }
                | IcuElement::Select { name, .. } => Some(name),
                IcuElement::Literal(_) | IcuElement::Pound => None,
            };
            if let Some(name) = name
                && !names.contains(name)
            {
                names.push(name.clone());
            }
            match element {
                IcuElement::Plural { options, .. } | IcuElement::Select { options, .. } => {
                    for option in options {
                        walk(&option.value, names);
                    }
                }
                _ => {}
            }
        }
    }

    let mut names = Vec::new();
    walk(elements, &mut names);
    names
}
