use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analytics::error::{invalid_argument, AnalyticsError};

/// The two call forms the external client's `set` command accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum SetCommand {
    /// Object-literal form: a whole configuration map applied in one call.
    Bulk(Map<String, Value>),
    /// Positional field name / field value pair.
    Field(Value, Value),
}

impl SetCommand {
    /// Classifies a loosely-typed argument list into a command.
    ///
    /// An empty list is `Ok(None)` (a no-op, not an error). A leading object
    /// literal wins regardless of any further arguments; arrays, null, and
    /// scalars never take that path. Everything else needs at least two
    /// arguments with a string in the first or second position and is
    /// forwarded positionally. Note the second-position string is enough on
    /// its own, so a pair like `(42, "value")` classifies as a field pair.
    pub fn from_args(args: &[Value]) -> Result<Option<SetCommand>, AnalyticsError> {
        let Some(first) = args.first() else {
            return Ok(None);
        };

        if let Value::Object(map) = first {
            return Ok(Some(SetCommand::Bulk(map.clone())));
        }

        let second_is_string = matches!(args.get(1), Some(Value::String(_)));
        if args.len() < 2 || (!first.is_string() && !second_is_string) {
            return Err(invalid_argument(
                "set needs a field name and a field value, or you can pass an object literal",
            ));
        }

        Ok(Some(SetCommand::Field(args[0].clone(), args[1].clone())))
    }
}

/// Payload of a pageview hit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageview {
    pub page: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
}

impl Pageview {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// Payload of a user-timing hit. The value is a duration in milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub category: String,
    pub variable: String,
    pub value: i64,
    #[serde(default)]
    pub label: String,
}

impl Timing {
    pub fn new(category: impl Into<String>, variable: impl Into<String>, value: i64) -> Self {
        Self {
            category: category.into(),
            variable: variable.into(),
            value,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A hit handed to each registered tracker instance: the event-type tag the
/// external client dispatches on, plus its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hit_type", rename_all = "lowercase")]
pub enum Hit {
    Pageview(Pageview),
    Timing(Timing),
}

impl Hit {
    /// The event-type tag as the external client spells it.
    pub fn kind(&self) -> &'static str {
        match self {
            Hit::Pageview(_) => "pageview",
            Hit::Timing(_) => "timing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_args() -> Vec<Value> {
        vec![json!({"currency": "USD", "checkout_step": 2})]
    }

    #[test]
    fn empty_args_classify_as_noop() {
        assert_eq!(SetCommand::from_args(&[]).unwrap(), None);
    }

    #[test]
    fn leading_object_wins_over_trailing_arguments() {
        let mut args = object_args();
        args.push(json!("ignored"));
        let command = SetCommand::from_args(&args).unwrap().unwrap();
        match command {
            SetCommand::Bulk(map) => {
                assert_eq!(map.get("currency"), Some(&json!("USD")));
                assert_eq!(map.len(), 2);
            }
            other => panic!("expected bulk command, got {other:?}"),
        }
    }

    #[test]
    fn array_and_null_do_not_take_the_object_path() {
        let err = SetCommand::from_args(&[json!([1, 2])]).unwrap_err();
        assert_eq!(err.code_str(), "analytics/invalid-argument");
        let err = SetCommand::from_args(&[json!(null), json!(7)]).unwrap_err();
        assert_eq!(err.code_str(), "analytics/invalid-argument");
    }

    #[test]
    fn pair_requires_a_string_in_the_first_two_positions() {
        let command = SetCommand::from_args(&[json!("page"), json!("/cart")])
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            SetCommand::Field(json!("page"), json!("/cart"))
        );

        assert!(SetCommand::from_args(&[json!("page")]).is_err());
        assert!(SetCommand::from_args(&[json!(1), json!(2)]).is_err());
    }

    #[test]
    fn second_position_string_alone_passes_validation() {
        // Mirrors the external client contract: either of the first two
        // positions being a string is accepted.
        let command = SetCommand::from_args(&[json!(42), json!("value")])
            .unwrap()
            .unwrap();
        assert_eq!(command, SetCommand::Field(json!(42), json!("value")));
    }

    #[test]
    fn hit_kind_matches_the_wire_tag() {
        let page = Hit::Pageview(Pageview::new("/home"));
        let timing = Hit::Timing(Timing::new("perf", "load", 250));
        assert_eq!(page.kind(), "pageview");
        assert_eq!(timing.kind(), "timing");

        let encoded = serde_json::to_value(&page).unwrap();
        assert_eq!(encoded.get("hit_type"), Some(&json!("pageview")));
    }

    #[test]
    fn builders_default_optional_fields_to_empty() {
        let view = Pageview::new("/home");
        assert_eq!(view.title, "");
        assert_eq!(view.location, "");

        let timing = Timing::new("perf", "load", 250);
        assert_eq!(timing.label, "");
        assert_eq!(
            Timing::new("perf", "load", 250).with_label("cold").label,
            "cold"
        );
    }
}
