//! Builders for in-memory query results.

use prost::Message;

use crate::query::proto::{Attribute, QueryResult, Rule, Target, attribute, target};

/// A string-typed attribute.
pub fn string_attr(name: &str, value: &str) -> Attribute {
    Attribute {
        name: name.to_string(),
        r#type: attribute::Discriminator::String as i32,
        string_value: Some(value.to_string()),
    }
}

/// A label-typed attribute, used to exercise the type check.
pub fn label_attr(name: &str) -> Attribute {
    // Label values live in a field the decoder never reads
    Attribute {
        name: name.to_string(),
        r#type: attribute::Discriminator::Label as i32,
        string_value: None,
    }
}

/// Fluent builder for a [`Rule`].
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleBuilder {
    /// A rule of `class` labelled `//external:<name>`. The `name` attribute is only added
    /// when `name` is non-empty.
    pub fn new(class: &str, name: &str) -> Self {
        let mut attribute = Vec::new();
        if !name.is_empty() {
            attribute.push(string_attr("name", name));
        }
        Self {
            rule: Rule {
                name: format!("//external:{name}"),
                rule_class: class.to_string(),
                location: None,
                attribute,
            },
        }
    }

    /// A rule of `class` with an explicit label and no attributes.
    pub fn labelled(class: &str, label: &str) -> Self {
        Self {
            rule: Rule {
                name: label.to_string(),
                rule_class: class.to_string(),
                location: None,
                attribute: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn string(self, name: &str, value: &str) -> Self {
        self.attribute(string_attr(name, value))
    }

    #[must_use]
    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.rule.attribute.push(attr);
        self
    }

    pub fn build(self) -> Rule {
        self.rule
    }

    /// Wrap the rule in a `RULE` target.
    pub fn target(self) -> Target {
        Target {
            r#type: target::Discriminator::Rule as i32,
            rule: Some(self.rule),
        }
    }
}

/// A `SOURCE_FILE` target, which the decoder must skip.
pub fn source_file_target() -> Target {
    Target {
        r#type: target::Discriminator::SourceFile as i32,
        rule: None,
    }
}

pub fn query_result(targets: Vec<Target>) -> QueryResult {
    QueryResult {
        target: targets,
    }
}

/// Encode targets the way `bazel query --output=proto` would.
pub fn query_bytes(targets: Vec<Target>) -> Vec<u8> {
    query_result(targets).encode_to_vec()
}
