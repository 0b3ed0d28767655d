//! Payload micro-template grammar
//!
//! Generated rules carry Jinja-style templates that the platform's rule
//! engine evaluates when a hub message arrives. This module is the only
//! place those strings are assembled. The accepted grammar is a fixed wire
//! contract:
//!
//! - `{{ expr }}` - interpolation
//! - `{% if cond %}a{% else %}b{% endif %}` - two-way conditional
//! - `{% set name = expr %}` - local binding
//! - `{% with mode_map={"k": "v", ...} %}...{% endwith %}` - lookup table scope
//! - `trigger.payload_json.<field>` / `trigger.payload` - the triggering message
//! - `|float`, `|int`, `|round`, `|string` - conversions
//!
//! Nothing here evaluates a template.

use std::fmt::Write;

/// Parsed JSON body of the triggering MQTT message
pub const PAYLOAD_JSON: &str = "trigger.payload_json";

/// Raw body of the triggering MQTT message
pub const PAYLOAD_RAW: &str = "trigger.payload";

/// Name the lookup table is bound to inside a `with` block
pub const LOOKUP_NAME: &str = "mode_map";

/// `trigger.payload_json.<name>`
pub fn field(name: &str) -> String {
    format!("{PAYLOAD_JSON}.{name}")
}

/// A payload field as a float, with an optional conversion suffix such as `" * 1.8 + 32"`
pub fn float_field(name: &str, conversion: &str) -> String {
    format!("{}|float{conversion}", field(name))
}

/// `{{ expr }}`
pub fn interpolate(expr: &str) -> String {
    format!("{{{{ {expr} }}}}")
}

/// `{% if cond %}then{% else %}otherwise{% endif %}`
pub fn if_else(cond: &str, then: &str, otherwise: &str) -> String {
    format!("{{% if {cond} %}}{then}{{% else %}}{otherwise}{{% endif %}}")
}

/// `{% set name = expr %}`
pub fn set(name: &str, expr: &str) -> String {
    format!("{{% set {name} = {expr} %}}")
}

/// A double-quoted string literal, valid in both Jinja and JSON
///
/// Backslashes and double quotes are escaped; hub labels are free text.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// `{{ trigger.payload_json.idx == N }}`, the condition scoping a rule to one device
pub fn idx_equals(idx: &str) -> String {
    interpolate(&format!("{} == {idx}", field("idx")))
}

/// Wrap `body` in a `with` block binding [`LOOKUP_NAME`] to a string→string table
///
/// Entries keep the given order. Keys and values are quoted as strings, so a
/// numeric code looked up from `nvalue` must be passed through `|string`.
pub fn with_lookup<K, V>(entries: impl IntoIterator<Item = (K, V)>, body: &str) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let table = entries
        .into_iter()
        .map(|(k, v)| format!("{}: {}", quote(k.as_ref()), quote(v.as_ref())))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{% with {LOOKUP_NAME}={{{table}}} %}}{body}{{% endwith %}}")
}

/// `mode_map[<key_expr>]`
pub fn lookup(key_expr: &str) -> String {
    format!("{LOOKUP_NAME}[{key_expr}]")
}

/// Builder for a JSON object payload whose values are template fragments
///
/// Renders as `{"a": <frag>, "b": <frag> }`. The space before the closing
/// brace keeps a trailing `}}` from fusing with it.
#[derive(Debug, Clone, Default)]
pub struct JsonPayload {
    fields: Vec<(String, String)>,
}

impl JsonPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field whose value is emitted verbatim (already a JSON literal or template)
    pub fn raw(mut self, key: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.fields.push((key.into(), fragment.into()));
        self
    }

    /// Add a field whose value is the interpolation of `expr`
    pub fn expr(self, key: impl Into<String>, expr: &str) -> Self {
        self.raw(key, interpolate(expr))
    }

    /// Add a field whose value is the interpolation of `expr` inside string quotes
    pub fn quoted_expr(self, key: impl Into<String>, expr: &str) -> Self {
        self.raw(key, format!("\"{}\"", interpolate(expr)))
    }

    /// Add a plain string value
    pub fn string(self, key: impl Into<String>, value: &str) -> Self {
        self.raw(key, quote(value))
    }

    pub fn build(&self) -> String {
        let mut out = String::from("{");
        for (i, (key, fragment)) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}: {fragment}", quote(key));
        }
        out.push_str(" }");
        out
    }
}
