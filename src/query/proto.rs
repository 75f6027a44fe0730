//! Protobuf messages for `bazel query --output=proto`.
//!
//! This is the subset of Bazel's `src/main/protobuf/build.proto` that the decoder reads.
//! Field numbers and enum values match upstream so a full query result decodes cleanly;
//! fields not declared here are skipped by prost.

/// Top-level result of `bazel query --output=proto`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryResult {
    /// All targets matched by the query expression, in query output order
    #[prost(message, repeated, tag = "1")]
    pub target: Vec<Target>,
}

/// A single target: a rule, a source file, a generated file, ...
#[derive(Clone, PartialEq, prost::Message)]
pub struct Target {
    #[prost(enumeration = "target::Discriminator", required, tag = "1")]
    pub r#type: i32,
    /// Present when `type` is `RULE`
    #[prost(message, optional, tag = "2")]
    pub rule: Option<Rule>,
}

/// Nested types for [`Target`].
pub mod target {
    /// Kind of target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Discriminator {
        Rule = 1,
        SourceFile = 2,
        GeneratedFile = 3,
        PackageGroup = 4,
        EnvironmentGroup = 5,
    }

    impl Discriminator {
        /// Upstream enum value name, as printed by bazel.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::Rule => "RULE",
                Self::SourceFile => "SOURCE_FILE",
                Self::GeneratedFile => "GENERATED_FILE",
                Self::PackageGroup => "PACKAGE_GROUP",
                Self::EnvironmentGroup => "ENVIRONMENT_GROUP",
            }
        }
    }
}

/// A rule instance, e.g. a `go_repository(...)` declaration.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Rule {
    /// Fully qualified label, e.g. `//external:com_github_pkg_errors`
    #[prost(string, required, tag = "1")]
    pub name: String,
    /// Rule kind, e.g. `go_repository`
    #[prost(string, required, tag = "2")]
    pub rule_class: String,
    #[prost(string, optional, tag = "3")]
    pub location: Option<String>,
    #[prost(message, repeated, tag = "4")]
    pub attribute: Vec<Attribute>,
}

/// A single rule attribute. Only string values are modelled.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Attribute {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(enumeration = "attribute::Discriminator", required, tag = "2")]
    pub r#type: i32,
    #[prost(string, optional, tag = "5")]
    pub string_value: Option<String>,
}

/// Nested types for [`Attribute`].
pub mod attribute {
    /// Declared type of an attribute value.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Discriminator {
        Integer = 1,
        String = 2,
        Label = 3,
        Output = 4,
        StringList = 5,
        LabelList = 6,
        OutputList = 7,
        DistributionSet = 8,
        License = 9,
        StringDict = 10,
        FilesetEntryList = 11,
        LabelListDict = 12,
        StringListDict = 13,
        Boolean = 14,
        Tristate = 15,
        IntegerList = 16,
        DeprecatedStringDictUnary = 17,
        Unknown = 18,
        LabelDictUnary = 19,
        SelectorList = 20,
        LabelKeyedStringDict = 21,
    }

    impl Discriminator {
        /// Upstream enum value name, as printed by bazel.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::Integer => "INTEGER",
                Self::String => "STRING",
                Self::Label => "LABEL",
                Self::Output => "OUTPUT",
                Self::StringList => "STRING_LIST",
                Self::LabelList => "LABEL_LIST",
                Self::OutputList => "OUTPUT_LIST",
                Self::DistributionSet => "DISTRIBUTION_SET",
                Self::License => "LICENSE",
                Self::StringDict => "STRING_DICT",
                Self::FilesetEntryList => "FILESET_ENTRY_LIST",
                Self::LabelListDict => "LABEL_LIST_DICT",
                Self::StringListDict => "STRING_LIST_DICT",
                Self::Boolean => "BOOLEAN",
                Self::Tristate => "TRISTATE",
                Self::IntegerList => "INTEGER_LIST",
                Self::DeprecatedStringDictUnary => "DEPRECATED_STRING_DICT_UNARY",
                Self::Unknown => "UNKNOWN",
                Self::LabelDictUnary => "LABEL_DICT_UNARY",
                Self::SelectorList => "SELECTOR_LIST",
                Self::LabelKeyedStringDict => "LABEL_KEYED_STRING_DICT",
            }
        }
    }
}

/// Render a raw discriminator value for error messages, tolerating values this build
/// does not know about.
pub(crate) fn target_type_name(value: i32) -> String {
    target::Discriminator::try_from(value)
        .map(|d| d.as_str_name().to_string())
        .unwrap_or_else(|_| format!("UNKNOWN({value})"))
}

pub(crate) fn attribute_type_name(value: i32) -> String {
    attribute::Discriminator::try_from(value)
        .map(|d| d.as_str_name().to_string())
        .unwrap_or_else(|_| format!("UNKNOWN({value})"))
}
