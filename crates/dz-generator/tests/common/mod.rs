//! Shared helpers for generator integration tests

#![allow(dead_code)]

use std::path::Path;

use minijinja::{context, Environment};
use serde_json::Value;

use dz_catalog::{parse_device_list, CatalogSnapshot};
use dz_core::DeviceFilter;

/// Load a fixture file from `tests/fixtures/`
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

/// Snapshot built from the canned hub responses, as if fetched from a live hub
pub fn fixture_snapshot() -> CatalogSnapshot {
    let list = |filter: DeviceFilter, name: &str| {
        parse_device_list(filter, &load_fixture(name))
            .unwrap_or_else(|e| panic!("Fixture '{}' is not a device list: {}", name, e))
    };

    CatalogSnapshot {
        lights: list(DeviceFilter::Light, "light.json"),
        temperature: list(DeviceFilter::Temp, "temp.json"),
        utility: list(DeviceFilter::Utility, "utility.json"),
        all: list(DeviceFilter::All, "all.json"),
    }
}

/// Render a rule payload the way the platform would for an MQTT trigger
///
/// `payload` is the raw message text; `payload_json` its parsed form, when it parses.
pub fn render_trigger(template: &str, payload: &str) -> String {
    let payload_json: Value = serde_json::from_str(payload).unwrap_or(Value::Null);
    let env = Environment::new();
    env.render_str(
        template,
        context! { trigger => context! { payload => payload, payload_json => payload_json } },
    )
    .unwrap_or_else(|e| panic!("Template failed to render: {}\n{}", e, template))
}

/// Evaluate a `{{ expr }}` rule condition against a message, as the platform would
pub fn condition_holds(condition: &str, payload: &str) -> bool {
    let expr = condition
        .trim()
        .strip_prefix("{{")
        .and_then(|c| c.strip_suffix("}}"))
        .unwrap_or_else(|| panic!("Not a single-expression condition: {}", condition));
    let payload_json: Value = serde_json::from_str(payload).unwrap_or(Value::Null);
    let env = Environment::new();
    env.compile_expression(expr)
        .and_then(|e| {
            e.eval(context! { trigger => context! { payload => payload, payload_json => payload_json } })
        })
        .unwrap_or_else(|e| panic!("Condition failed to evaluate: {}\n{}", e, condition))
        .is_true()
}

/// Render an entity config template against an incoming command
pub fn render_with(template: &str, ctx: minijinja::Value) -> String {
    Environment::new()
        .render_str(template, ctx)
        .unwrap_or_else(|e| panic!("Template failed to render: {}\n{}", e, template))
}

/// Render, then parse the result as JSON
pub fn render_json(template: &str, payload: &str) -> Value {
    let rendered = render_trigger(template, payload);
    serde_json::from_str(&rendered)
        .unwrap_or_else(|e| panic!("Rendered payload is not JSON: {}\n{}", e, rendered))
}
