//! Shapes raw form input into the record the scoring endpoint expects.
//!
//! The form already guarantees field presence; the builder only coerces
//! values into their wire types:
//! - numeric metrics become JSON numbers, read from the leading numeric part
//!   of a string (`"12 visits"` is 12, input with no leading number is 0),
//! - yes/no flags become `"Yes"` / `"No"`,
//! - `Converted` becomes `0` / `1`.
//!
//! Declared attributes always come first, in the form's order. Attributes the
//! form does not declare are passed through untouched after them.

use crate::models::{LeadRecord, PredictionRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// How a declared attribute is coerced before it goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text or a dropdown choice, sent as a string.
    Categorical,
    /// Visit and engagement metrics, sent as a number.
    Numeric,
    /// Checkbox flags, sent as `"Yes"` or `"No"`.
    YesNo,
    /// The conversion flag, sent as `0` or `1`.
    Binary,
}

/// A declared form attribute with its wire kind and the form's initial value.
#[derive(Debug, Clone, Copy)]
pub struct LeadField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
}

const fn field(name: &'static str, kind: FieldKind, default: &'static str) -> LeadField {
    LeadField {
        name,
        kind,
        default,
    }
}

/// Every attribute the lead form declares, in declaration order.
pub static LEAD_FIELDS: [LeadField; 35] = [
    field("Lead Origin", FieldKind::Categorical, ""),
    field("Lead Source", FieldKind::Categorical, ""),
    field("Do Not Email", FieldKind::YesNo, "No"),
    field("Do Not Call", FieldKind::YesNo, "No"),
    field("Converted", FieldKind::Binary, "0"),
    field("TotalVisits", FieldKind::Numeric, "0"),
    field("Total Time Spent on Website", FieldKind::Numeric, "0"),
    field("Page Views Per Visit", FieldKind::Numeric, "0"),
    field("Last Activity", FieldKind::Categorical, ""),
    field("Country", FieldKind::Categorical, ""),
    field("Specialization", FieldKind::Categorical, "Select"),
    field(
        "How did you hear about X Education",
        FieldKind::Categorical,
        "Select",
    ),
    field(
        "What is your current occupation",
        FieldKind::Categorical,
        "Unemployed",
    ),
    field(
        "What matters most to you in choosing a course",
        FieldKind::Categorical,
        "Better Career Prospects",
    ),
    field("Search", FieldKind::YesNo, "No"),
    field("Magazine", FieldKind::YesNo, "No"),
    field("Newspaper Article", FieldKind::YesNo, "No"),
    field("X Education Forums", FieldKind::YesNo, "No"),
    field("Newspaper", FieldKind::YesNo, "No"),
    field("Digital Advertisement", FieldKind::YesNo, "No"),
    field("Through Recommendations", FieldKind::YesNo, "No"),
    field(
        "Receive More Updates About Our Courses",
        FieldKind::YesNo,
        "No",
    ),
    field("Tags", FieldKind::Categorical, ""),
    field("Lead Quality", FieldKind::Categorical, "Low in Relevance"),
    field("Update me on Supply Chain Content", FieldKind::YesNo, "No"),
    field("Get updates on DM Content", FieldKind::YesNo, "No"),
    field("Lead Profile", FieldKind::Categorical, "Select"),
    field("City", FieldKind::Categorical, "Select"),
    field(
        "Asymmetrique Activity Index",
        FieldKind::Categorical,
        "02.Medium",
    ),
    field(
        "Asymmetrique Profile Index",
        FieldKind::Categorical,
        "02.Medium",
    ),
    field("Asymmetrique Activity Score", FieldKind::Numeric, "15"),
    field("Asymmetrique Profile Score", FieldKind::Numeric, "15"),
    field(
        "I agree to pay the amount through cheque",
        FieldKind::YesNo,
        "No",
    ),
    field(
        "A free copy of Mastering The Interview",
        FieldKind::YesNo,
        "No",
    ),
    field("Last Notable Activity", FieldKind::Categorical, "Modified"),
];

/// Looks up a declared attribute by its exact name.
pub fn lead_field(name: &str) -> Option<&'static LeadField> {
    LEAD_FIELDS.iter().find(|f| f.name == name)
}

/// Builds a record from raw form input.
///
/// Missing or `null` declared attributes take the form's initial value.
pub fn build_record(raw: &Map<String, Value>) -> LeadRecord {
    let mut attributes = Map::with_capacity(LEAD_FIELDS.len() + raw.len());

    for field in LEAD_FIELDS.iter() {
        let value = match raw.get(field.name) {
            Some(Value::Null) | None => Value::String(field.default.to_string()),
            Some(value) => value.clone(),
        };
        attributes.insert(field.name.to_string(), coerce(field.kind, &value));
    }

    for (name, value) in raw {
        if lead_field(name).is_none() {
            attributes.insert(name.clone(), value.clone());
        }
    }

    LeadRecord::from_attributes(attributes)
}

/// Wraps a record in the envelope the scoring endpoint expects.
pub fn build_request(record: LeadRecord) -> PredictionRequest {
    PredictionRequest { data: record }
}

/// Coerces one value to the wire type of `kind`.
pub fn coerce(kind: FieldKind, value: &Value) -> Value {
    match kind {
        FieldKind::Categorical => match value {
            Value::String(s) => Value::String(s.clone()),
            Value::Null => Value::String(String::new()),
            other => Value::String(other.to_string()),
        },
        FieldKind::Numeric => Value::Number(to_number(value)),
        FieldKind::YesNo => {
            let flag = if truthy(value) { "Yes" } else { "No" };
            Value::String(flag.to_string())
        }
        FieldKind::Binary => Value::Number(Number::from(u8::from(truthy(value)))),
    }
}

fn to_number(value: &Value) -> Number {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => numeric_prefix(s.trim_start()).parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match parsed.filter(|v| v.is_finite()) {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Number::from(v as i64),
        Some(v) => Number::from_f64(v).unwrap_or_else(|| Number::from(0)),
        None => Number::from(0),
    }
}

/// Longest prefix of `s` that reads as a decimal number, with optional sign,
/// fraction and exponent. Empty when `s` does not start with one.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    &s[..end]
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1"
        ),
        _ => false,
    }
}

/// Typed view of the lead form.
///
/// `Default` mirrors the form's initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFormData {
    #[serde(rename = "Lead Origin")]
    pub lead_origin: String,
    #[serde(rename = "Lead Source")]
    pub lead_source: String,
    #[serde(rename = "Do Not Email")]
    pub do_not_email: bool,
    #[serde(rename = "Do Not Call")]
    pub do_not_call: bool,
    #[serde(rename = "Converted")]
    pub converted: bool,
    #[serde(rename = "TotalVisits")]
    pub total_visits: f64,
    #[serde(rename = "Total Time Spent on Website")]
    pub total_time_spent_on_website: f64,
    #[serde(rename = "Page Views Per Visit")]
    pub page_views_per_visit: f64,
    #[serde(rename = "Last Activity")]
    pub last_activity: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Specialization")]
    pub specialization: String,
    #[serde(rename = "How did you hear about X Education")]
    pub how_did_you_hear: String,
    #[serde(rename = "What is your current occupation")]
    pub current_occupation: String,
    #[serde(rename = "What matters most to you in choosing a course")]
    pub what_matters_most: String,
    #[serde(rename = "Search")]
    pub search: bool,
    #[serde(rename = "Magazine")]
    pub magazine: bool,
    #[serde(rename = "Newspaper Article")]
    pub newspaper_article: bool,
    #[serde(rename = "X Education Forums")]
    pub x_education_forums: bool,
    #[serde(rename = "Newspaper")]
    pub newspaper: bool,
    #[serde(rename = "Digital Advertisement")]
    pub digital_advertisement: bool,
    #[serde(rename = "Through Recommendations")]
    pub through_recommendations: bool,
    #[serde(rename = "Receive More Updates About Our Courses")]
    pub receive_more_updates: bool,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Lead Quality")]
    pub lead_quality: String,
    #[serde(rename = "Update me on Supply Chain Content")]
    pub supply_chain_updates: bool,
    #[serde(rename = "Get updates on DM Content")]
    pub dm_content_updates: bool,
    #[serde(rename = "Lead Profile")]
    pub lead_profile: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Asymmetrique Activity Index")]
    pub asymmetrique_activity_index: String,
    #[serde(rename = "Asymmetrique Profile Index")]
    pub asymmetrique_profile_index: String,
    #[serde(rename = "Asymmetrique Activity Score")]
    pub asymmetrique_activity_score: f64,
    #[serde(rename = "Asymmetrique Profile Score")]
    pub asymmetrique_profile_score: f64,
    #[serde(rename = "I agree to pay the amount through cheque")]
    pub pay_through_cheque: bool,
    #[serde(rename = "A free copy of Mastering The Interview")]
    pub free_interview_copy: bool,
    #[serde(rename = "Last Notable Activity")]
    pub last_notable_activity: String,
}

impl Default for LeadFormData {
    fn default() -> Self {
        Self {
            lead_origin: String::new(),
            lead_source: String::new(),
            do_not_email: false,
            do_not_call: false,
            converted: false,
            total_visits: 0.0,
            total_time_spent_on_website: 0.0,
            page_views_per_visit: 0.0,
            last_activity: String::new(),
            country: String::new(),
            specialization: "Select".to_string(),
            how_did_you_hear: "Select".to_string(),
            current_occupation: "Unemployed".to_string(),
            what_matters_most: "Better Career Prospects".to_string(),
            search: false,
            magazine: false,
            newspaper_article: false,
            x_education_forums: false,
            newspaper: false,
            digital_advertisement: false,
            through_recommendations: false,
            receive_more_updates: false,
            tags: String::new(),
            lead_quality: "Low in Relevance".to_string(),
            supply_chain_updates: false,
            dm_content_updates: false,
            lead_profile: "Select".to_string(),
            city: "Select".to_string(),
            asymmetrique_activity_index: "02.Medium".to_string(),
            asymmetrique_profile_index: "02.Medium".to_string(),
            asymmetrique_activity_score: 15.0,
            asymmetrique_profile_score: 15.0,
            pay_through_cheque: false,
            free_interview_copy: false,
            last_notable_activity: "Modified".to_string(),
        }
    }
}

impl From<&LeadFormData> for LeadRecord {
    fn from(form: &LeadFormData) -> Self {
        match serde_json::to_value(form) {
            Ok(Value::Object(raw)) => build_record(&raw),
            // a struct of strings, bools and finite floats always serializes to an object
            _ => build_record(&Map::new()),
        }
    }
}
