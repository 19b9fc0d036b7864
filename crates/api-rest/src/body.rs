//! Decoding of the `POST /patients` body.
//!
//! The body is read as a JSON value and each field is decoded separately, so
//! a request with several bad fields gets one error per field. Decoding errors
//! and constraint violations of the fields that did decode are reported
//! together, in field order. Locations are relative to the body.

use api_shared::{CreatePatientReq, LocItem, SymptomsInput, ValidationErrorItem};
use patients_core::validation::{check_age, check_name, check_symptoms};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use serde_path_to_error::Segment;

const STRING_TYPE_MSG: &str = "Input should be a valid string";
const INT_TYPE_MSG: &str = "Input should be a valid integer";

/// Decodes and checks a create request body.
///
/// # Errors
///
/// Returns every missing, mistyped or out-of-range field.
pub fn decode_create_patient(body: Value) -> Result<CreatePatientReq, Vec<ValidationErrorItem>> {
    let Value::Object(mut fields) = body else {
        return Err(vec![ValidationErrorItem::new(
            Vec::new(),
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )]);
    };

    let mut errors = Vec::new();

    let name = take_field(&mut fields, "name", &mut errors, |value| {
        decode_typed::<String>("name", value, STRING_TYPE_MSG, "string_type")
    });
    if let Some(err) = name.as_deref().and_then(check_name) {
        errors.push(err);
    }

    let age = take_field(&mut fields, "age", &mut errors, decode_age);
    if let Some(err) = age.and_then(check_age) {
        errors.push(err);
    }

    let symptoms = take_field(&mut fields, "symptoms", &mut errors, decode_symptoms);
    if let Some(symptoms) = &symptoms {
        errors.extend(check_symptoms(symptoms));
    }

    match (name, age, symptoms) {
        (Some(name), Some(age), Some(symptoms)) if errors.is_empty() => Ok(CreatePatientReq {
            name,
            age,
            symptoms,
        }),
        _ => Err(errors),
    }
}

fn take_field<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    errors: &mut Vec<ValidationErrorItem>,
    decode: impl FnOnce(Value) -> Result<T, ValidationErrorItem>,
) -> Option<T> {
    let Some(value) = fields.remove(key) else {
        errors.push(ValidationErrorItem::new(vec![key.into()], "Field required", "missing"));
        return None;
    };

    match decode(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

/// Deserializes `value`, locating a failure inside it (e.g. `symptoms.2`).
fn decode_typed<T: DeserializeOwned>(
    field: &str,
    value: Value,
    msg: &str,
    kind: &str,
) -> Result<T, ValidationErrorItem> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let mut loc = vec![LocItem::from(field)];
        loc.extend(err.path().iter().filter_map(|segment| match segment {
            Segment::Seq { index } => Some(LocItem::Index(*index)),
            Segment::Map { key } => Some(LocItem::Key(key.clone())),
            _ => None,
        }));
        ValidationErrorItem::new(loc, msg, kind)
    })
}

/// Integers, integral floats (`28.0`) and numeric strings are accepted.
fn decode_age(value: Value) -> Result<i64, ValidationErrorItem> {
    let error = |msg: &str, kind: &str| ValidationErrorItem::new(vec!["age".into()], msg, kind);

    match value {
        Value::Number(n) => number_to_age(&n).ok_or_else(|| {
            error(
                "Input should be a valid integer, got a number with a fractional part",
                "int_from_float",
            )
        }),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            error(
                "Input should be a valid integer, unable to parse string as an integer",
                "int_parsing",
            )
        }),
        _ => Err(error(INT_TYPE_MSG, "int_type")),
    }
}

fn number_to_age(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        // Beyond i64 is still just "too high" for the range check
        return Some(i64::MAX);
    }
    // Float to int casts saturate
    n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
}

fn decode_symptoms(value: Value) -> Result<SymptomsInput, ValidationErrorItem> {
    match value {
        Value::String(symptom) => Ok(SymptomsInput::One(symptom)),
        list @ Value::Array(_) => {
            decode_typed::<Vec<String>>("symptoms", list, STRING_TYPE_MSG, "string_type")
                .map(SymptomsInput::Many)
        }
        _ => Err(ValidationErrorItem::new(
            vec!["symptoms".into()],
            "Input should be a valid string or a list of strings",
            "string_type",
        )),
    }
}
