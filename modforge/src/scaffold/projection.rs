//! Field projection engine
//!
//! Pure derivation functions that project the ordered field list into the text
//! fragments substituted into templates. Each function collects one line per
//! included field and joins them in a single formatting pass: every line but the
//! last gets the separator, every line but the first gets the continuation
//! indent of the template it lands in.
//!
//! Common fields (`id`, `created_at`, `updated_at`, `deleted_at`) are handled
//! per function:
//!
//! | fragment                    | common fields            |
//! |-----------------------------|--------------------------|
//! | [`mutable_fields`]          | excluded                 |
//! | [`validation_rules`]        | excluded                 |
//! | [`constructor`]             | included                 |
//! | [`array_fields`]            | included                 |
//! | [`documentation`]           | `include_common_fields`  |

use super::field_type::{FieldDescriptor, SemanticType};
use chrono::{DateTime, SecondsFormat, Utc};

/// Separator and continuation indent of one fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    /// Appended to every line except the last
    pub separator: &'static str,
    /// Prepended to every line except the first
    pub continuation: &'static str,
}

/// `$fillable` entries and DTO properties sit two levels deep
pub const MEMBER_LIST: LineStyle = LineStyle {
    separator: ",",
    continuation: "        ",
};

/// Constructor arguments, array mappings and rules sit three levels deep
pub const NESTED_LIST: LineStyle = LineStyle {
    separator: ",",
    continuation: "            ",
};

/// Annotation properties continue inside a `/** ... */` block
pub const DOC_BLOCK: LineStyle = LineStyle {
    separator: ",",
    continuation: " *      ",
};

/// Join line records into one fragment
///
/// An empty list renders to an empty string.
#[must_use]
pub fn join_lines(lines: &[String], style: LineStyle) -> String {
    lines.join(&format!("{}\n{}", style.separator, style.continuation))
}

fn mutable(fields: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    fields.iter().filter(|field| !field.is_common())
}

/// Quoted names of user-mutable fields, for a model's `$fillable` list
#[must_use]
pub fn mutable_fields(fields: &[FieldDescriptor]) -> String {
    let lines: Vec<_> = mutable(fields)
        .map(|field| format!("'{}'", field.name))
        .collect();
    join_lines(&lines, MEMBER_LIST)
}

/// `'name' => $this->name` mappings for every field, in order
#[must_use]
pub fn array_fields(fields: &[FieldDescriptor]) -> String {
    let lines: Vec<_> = fields.iter().map(array_mapping).collect();
    join_lines(&lines, NESTED_LIST)
}

fn array_mapping(field: &FieldDescriptor) -> String {
    format!("'{name}' => $this->{name}", name = field.name)
}

/// The three index-aligned views of a DTO constructor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorFragments {
    /// Typed property declarations with defaults
    pub properties: String,
    /// Named arguments read from the input mapping
    pub params: String,
    /// Output mapping re-exposing each property
    pub array_fields: String,
}

/// Build the DTO constructor views in one pass over every field
#[must_use]
pub fn constructor(fields: &[FieldDescriptor]) -> ConstructorFragments {
    let mut properties = Vec::with_capacity(fields.len());
    let mut params = Vec::with_capacity(fields.len());
    let mut mappings = Vec::with_capacity(fields.len());

    for field in fields {
        let literal = field.default_value.to_literal();
        let nullable = if field.nullable { "?" } else { "" };

        properties.push(format!(
            "public {nullable}{ty} ${name} = {literal}",
            ty = field.semantic_type.declared_type(),
            name = field.name,
        ));
        params.push(format!(
            "{name}: $data['{name}'] ?? {literal}",
            name = field.name
        ));
        mappings.push(array_mapping(field));
    }

    ConstructorFragments {
        properties: join_lines(&properties, MEMBER_LIST),
        params: join_lines(&params, NESTED_LIST),
        array_fields: join_lines(&mappings, NESTED_LIST),
    }
}

/// Pipe-joined validation rule for one field
///
/// Segment order: nullability, type (with decimal precision), length bound,
/// email heuristic.
///
/// # Examples
///
/// ```
/// # use modforge::{DefaultValue, FieldDescriptor, SemanticType};
/// # use modforge::scaffold::projection::rule_expression;
/// let field = FieldDescriptor {
///     name: "email_address".into(),
///     semantic_type: SemanticType::String,
///     nullable: false,
///     max_length: 120,
///     precision: 0,
///     default_value: DefaultValue::String(String::new()),
/// };
/// assert_eq!(rule_expression(&field), "required|string|min:1|max:120|email");
/// ```
#[must_use]
pub fn rule_expression(field: &FieldDescriptor) -> String {
    let mut segments = Vec::with_capacity(4);

    segments.push(if field.nullable { "nullable" } else { "required" }.to_string());

    segments.push(match field.semantic_type {
        SemanticType::String => "string".to_string(),
        SemanticType::Real => format!("decimal:{}", field.precision),
        SemanticType::Integer => "integer".to_string(),
        SemanticType::Timestamp => "datetime".to_string(),
        SemanticType::Boolean => "boolean".to_string(),
    });

    if field.semantic_type == SemanticType::String && field.max_length > 0 {
        segments.push(format!("min:1|max:{}", field.max_length));
    }

    if field.name.contains("mail") {
        segments.push("email".to_string());
    }

    segments.join("|")
}

/// `'name' => 'rules'` lines for every user-mutable field
#[must_use]
pub fn validation_rules(fields: &[FieldDescriptor]) -> String {
    let lines: Vec<_> = mutable(fields)
        .map(|field| format!("'{}' => '{}'", field.name, rule_expression(field)))
        .collect();
    join_lines(&lines, NESTED_LIST)
}

/// Options for the documentation fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocOptions {
    /// Include `id` and the audit timestamps
    pub include_common_fields: bool,
    /// Emit length/range bounds and collect required names
    pub include_validation_metadata: bool,
    /// Example value for timestamp properties
    pub example_timestamp: DateTime<Utc>,
}

/// API documentation annotations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    /// One `@OA\Property(...)` per included field
    pub properties: String,
    /// Quoted names of non-nullable fields, comma separated
    pub required: String,
}

/// Build the documentation property block and the required-name list
#[must_use]
pub fn documentation(fields: &[FieldDescriptor], options: &DocOptions) -> Documentation {
    let mut properties = Vec::with_capacity(fields.len());
    let mut required = Vec::new();

    for field in fields {
        if !options.include_common_fields && field.is_common() {
            continue;
        }

        if options.include_validation_metadata && !field.nullable {
            required.push(format!("\"{}\"", field.name));
        }

        properties.push(doc_property(field, options));
    }

    Documentation {
        properties: join_lines(&properties, DOC_BLOCK),
        required: required.join(","),
    }
}

/// One `@OA\Property(...)` annotation
///
/// Length and range bounds are skipped when the column reports no size: a
/// `maxLength=0` would reject every non-empty value of an unsized `text`
/// column, and a real without a declared size has no digit budget.
fn doc_property(field: &FieldDescriptor, options: &DocOptions) -> String {
    let (doc_type, format, example) = match field.semantic_type {
        SemanticType::String => ("string", None, "\"Sample\"".to_string()),
        SemanticType::Real => ("number", Some("float"), "20.99".to_string()),
        SemanticType::Integer => ("integer", None, "1".to_string()),
        SemanticType::Timestamp => (
            "string",
            Some("date-time"),
            format!(
                "\"{}\"",
                options
                    .example_timestamp
                    .to_rfc3339_opts(SecondsFormat::Micros, true)
            ),
        ),
        SemanticType::Boolean => ("boolean", None, "false".to_string()),
    };

    let mut attributes = vec![
        format!("property=\"{}\"", field.name),
        format!("type=\"{doc_type}\""),
    ];
    if let Some(format) = format {
        attributes.push(format!("format=\"{format}\""));
    }
    attributes.push(format!("example={example}"));

    if options.include_validation_metadata && field.max_length > 0 {
        match field.semantic_type {
            SemanticType::String => {
                attributes.push("minLength=1".to_string());
                attributes.push(format!("maxLength={}", field.max_length));
            }
            SemanticType::Real => {
                let (minimum, maximum) = real_bounds(field.max_length, field.precision);
                attributes.push(format!("minimum={minimum}"));
                attributes.push(format!("maximum={maximum}"));
            }
            _ => {}
        }
    }

    if field.nullable {
        attributes.push("nullable=true".to_string());
    }

    format!("@OA\\Property({})", attributes.join(", "))
}

/// Smallest positive value and largest value of a `(max_length, precision)` number
///
/// # Examples
///
/// ```
/// # use modforge::scaffold::projection::real_bounds;
/// assert_eq!(real_bounds(10, 2), ("0.01".to_string(), "99999999.99".to_string()));
/// assert_eq!(real_bounds(5, 0), ("1".to_string(), "99999".to_string()));
/// ```
#[must_use]
pub fn real_bounds(max_length: u32, precision: u32) -> (String, String) {
    let integer_digits = max_length.saturating_sub(precision) as usize;
    let precision = precision as usize;

    let integer_part = if integer_digits == 0 {
        "0".to_string()
    } else {
        "9".repeat(integer_digits)
    };

    if precision == 0 {
        return ("1".to_string(), integer_part);
    }

    let minimum = format!("0.{}1", "0".repeat(precision - 1));
    let maximum = format!("{integer_part}.{}", "9".repeat(precision));
    (minimum, maximum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::field_type::{normalize, DefaultValue};
    use crate::schema::RawColumn;
    use chrono::TimeZone;

    fn products() -> Vec<FieldDescriptor> {
        normalize(&[
            RawColumn::new("id", "int", false),
            RawColumn::new("name", "varchar(60)", true),
            RawColumn::new("price", "decimal(10,2)", false),
            RawColumn::new("created_at", "timestamp", true),
            RawColumn::new("deleted_at", "timestamp", true),
        ])
        .unwrap()
    }

    fn options(include_common_fields: bool, include_validation_metadata: bool) -> DocOptions {
        DocOptions {
            include_common_fields,
            include_validation_metadata,
            example_timestamp: Utc.with_ymd_and_hms(2025, 11, 17, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_mutable_fields_skip_common() {
        assert_eq!(mutable_fields(&products()), "'name',\n        'price'");
    }

    #[test]
    fn test_mutable_fields_trailing_common_field() {
        // the last emitted line never carries a separator, even when
        // the catalog's last column is a common field
        let fragment = mutable_fields(&products());
        assert!(!fragment.ends_with(','));
        assert!(!fragment.ends_with('\n'));
    }

    #[test]
    fn test_constructor_views_are_aligned() {
        let fragments = constructor(&products());
        let properties: Vec<_> = fragments.properties.lines().collect();
        let params: Vec<_> = fragments.params.lines().collect();
        let mappings: Vec<_> = fragments.array_fields.lines().collect();

        assert_eq!(properties.len(), 5);
        assert_eq!(params.len(), 5);
        assert_eq!(mappings.len(), 5);

        assert_eq!(properties[0], "public int $id = 0,");
        assert_eq!(properties[1], "        public ?string $name = '',");
        assert_eq!(properties[2], "        public float $price = 0,");
        assert_eq!(properties[4], "        public ?Carbon $deleted_at = null");

        assert_eq!(params[1], "            name: $data['name'] ?? '',");
        assert_eq!(params[4], "            deleted_at: $data['deleted_at'] ?? null");

        assert_eq!(mappings[0], "'id' => $this->id,");
        assert_eq!(mappings[4], "            'deleted_at' => $this->deleted_at");
    }

    #[test]
    fn test_array_fields_include_common() {
        let fragment = array_fields(&products());
        assert!(fragment.starts_with("'id' => $this->id,"));
        assert!(fragment.contains("'created_at' => $this->created_at"));
        assert_eq!(fragment, constructor(&products()).array_fields);
    }

    #[test]
    fn test_boolean_default_literal() {
        let fields = normalize(&[RawColumn::new("active", "tinyint(1)", false)]).unwrap();
        assert_eq!(fields[0].default_value, DefaultValue::Boolean(false));
        assert_eq!(
            constructor(&fields).properties,
            "public bool $active = false"
        );
    }

    #[test]
    fn test_validation_rules_products() {
        let rules = validation_rules(&products());
        assert_eq!(
            rules,
            "'name' => 'nullable|string|min:1|max:60',\n            'price' => 'required|decimal:2'"
        );
    }

    #[test]
    fn test_rule_expression_segments() {
        let fields = normalize(&[
            RawColumn::new("email_address", "varchar(120)", false),
            RawColumn::new("body", "text", false),
            RawColumn::new("stock", "int", true),
            RawColumn::new("published_at", "datetime", false),
            RawColumn::new("active", "bool", false),
            RawColumn::new("mailbox_size", "bigint", false),
        ])
        .unwrap();

        let rules: Vec<_> = fields.iter().map(rule_expression).collect();
        assert_eq!(rules[0], "required|string|min:1|max:120|email");
        assert_eq!(rules[1], "required|string");
        assert_eq!(rules[2], "nullable|integer");
        assert_eq!(rules[3], "required|datetime");
        assert_eq!(rules[4], "required|boolean");
        assert_eq!(rules[5], "required|integer|email");
    }

    #[test]
    fn test_documentation_with_common_fields() {
        let docs = documentation(&products(), &options(true, false));
        let lines: Vec<_> = docs.properties.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "@OA\\Property(property=\"id\", type=\"integer\", example=1),"
        );
        assert_eq!(
            lines[1],
            " *      @OA\\Property(property=\"name\", type=\"string\", example=\"Sample\", nullable=true),"
        );
        assert_eq!(
            lines[4],
            " *      @OA\\Property(property=\"deleted_at\", type=\"string\", format=\"date-time\", example=\"2025-11-17T12:00:00.000000Z\", nullable=true)"
        );
        // no validation metadata, so nothing is required
        assert_eq!(docs.required, "");
    }

    #[test]
    fn test_documentation_with_validation_metadata() {
        let docs = documentation(&products(), &options(false, true));
        let lines: Vec<_> = docs.properties.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "@OA\\Property(property=\"name\", type=\"string\", example=\"Sample\", minLength=1, maxLength=60, nullable=true),"
        );
        assert_eq!(
            lines[1],
            " *      @OA\\Property(property=\"price\", type=\"number\", format=\"float\", example=20.99, minimum=0.01, maximum=99999999.99)"
        );
        assert_eq!(docs.required, "\"price\"");
    }

    #[test]
    fn test_documentation_required_includes_common_when_asked() {
        let docs = documentation(&products(), &options(true, true));
        assert_eq!(docs.required, "\"id\",\"price\"");
    }

    #[test]
    fn test_documentation_omits_bounds_without_size() {
        let fields = normalize(&[
            RawColumn::new("bio", "text", false),
            RawColumn::new("ratio", "double", false),
        ])
        .unwrap();
        let docs = documentation(&fields, &options(false, true));
        assert!(!docs.properties.contains("maxLength"));
        assert!(!docs.properties.contains("minimum"));
        assert_eq!(docs.required, "\"bio\",\"ratio\"");
    }

    #[test]
    fn test_real_bounds() {
        assert_eq!(real_bounds(10, 2), ("0.01".into(), "99999999.99".into()));
        assert_eq!(real_bounds(8, 3), ("0.001".into(), "99999.999".into()));
        assert_eq!(real_bounds(2, 2), ("0.01".into(), "0.99".into()));
        assert_eq!(real_bounds(3, 0), ("1".into(), "999".into()));
    }

    #[test]
    fn test_empty_field_list_renders_empty() {
        let fields: Vec<FieldDescriptor> = Vec::new();
        assert_eq!(mutable_fields(&fields), "");
        assert_eq!(validation_rules(&fields), "");
        assert_eq!(array_fields(&fields), "");
        assert_eq!(constructor(&fields), ConstructorFragments::default());
        assert_eq!(
            documentation(&fields, &options(true, true)),
            Documentation::default()
        );
    }

    #[test]
    fn test_only_common_fields_renders_empty_listings() {
        let fields = normalize(&[
            RawColumn::new("id", "bigint", false),
            RawColumn::new("updated_at", "timestamp", true),
        ])
        .unwrap();
        assert_eq!(mutable_fields(&fields), "");
        assert_eq!(validation_rules(&fields), "");
        assert_eq!(documentation(&fields, &options(false, true)), Documentation::default());
    }
}
