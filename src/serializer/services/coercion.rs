//! Coercion of raw values into output field values.

use crate::schema::domain::{
    DynamicMessage, FieldKind, MessageTypeName, OutputValue, ScalarType, ScalarValue, Timestamp,
};
use crate::serializer::{
    adapters::DateComponents,
    domain::{FieldMask, FieldPath, FieldSpec, Value},
    error::{CoercionError, ConversionError, ConversionResult},
    ports::SourceRef,
};
use std::sync::Arc;

/// Recursive entry point used for nested and repeated fields.
pub trait NestedSerializer {
    /// Serializes `source` as `message_type`, recording nested violations
    /// under `path`.
    ///
    /// # Errors
    ///
    /// Returns fatal conversion errors only; violations are accumulated.
    fn serialize_nested(
        &mut self,
        message_type: &MessageTypeName,
        source: SourceRef,
        mask: &FieldMask,
        path: &FieldPath,
    ) -> ConversionResult<DynamicMessage>;
}

/// Converts a field's raw value into its output value.
///
/// Absent required scalars and repeated fields become [`OutputValue::Unset`];
/// absent optional ones take their zero value. Wrappers, timestamps and
/// messages carry absence in their own `None`.
///
/// # Errors
///
/// Returns [`ConversionError::Coercion`] when the value does not fit the
/// kind, and propagates fatal errors from nested conversions.
pub fn coerce(
    raw: Option<Value>,
    spec: &FieldSpec,
    path: &FieldPath,
    mask: &FieldMask,
    nested: &mut dyn NestedSerializer,
) -> ConversionResult<OutputValue> {
    let kind = spec.kind();
    let mismatch = |value: &Value| {
        ConversionError::coercion(
            path.clone(),
            CoercionError::TypeMismatch {
                expected: kind.clone(),
                found: value.type_name(),
            },
        )
    };

    match kind {
        FieldKind::Scalar(scalar) => match raw {
            None if spec.is_required() => Ok(OutputValue::Unset),
            None => Ok(OutputValue::Scalar(scalar.zero())),
            Some(value) => coerce_scalar(value, *scalar, kind)
                .map(OutputValue::Scalar)
                .map_err(|error| ConversionError::coercion(path.clone(), error)),
        },
        FieldKind::Wrapper(scalar) => raw
            .map(|value| coerce_scalar(value, *scalar, kind))
            .transpose()
            .map(OutputValue::Wrapper)
            .map_err(|error| ConversionError::coercion(path.clone(), error)),
        FieldKind::Timestamp => match raw {
            None => Ok(OutputValue::Timestamp(None)),
            Some(Value::DateTime(instant)) => {
                Ok(OutputValue::Timestamp(Some(Timestamp::from_datetime(instant))))
            }
            Some(Value::Date(date)) => Ok(OutputValue::Timestamp(Some(Timestamp::from_date(date)))),
            Some(other) => Err(mismatch(&other)),
        },
        FieldKind::Date(message_type) => match raw {
            None => Ok(OutputValue::Message(None)),
            Some(value) => {
                let date = value.as_date().ok_or_else(|| mismatch(&value))?;
                let source: SourceRef = Arc::new(DateComponents::new(date));
                let message = nested.serialize_nested(message_type, source, mask, path)?;
                Ok(OutputValue::Message(Some(Box::new(message))))
            }
        },
        FieldKind::Message(message_type) => match raw {
            None => Ok(OutputValue::Message(None)),
            Some(Value::Object(source)) => {
                let message = nested.serialize_nested(message_type, source, mask, path)?;
                Ok(OutputValue::Message(Some(Box::new(message))))
            }
            Some(other) => Err(mismatch(&other)),
        },
        FieldKind::Repeated(message_type) => match raw {
            None if spec.is_required() => Ok(OutputValue::Unset),
            None => Ok(OutputValue::Repeated(Vec::new())),
            Some(Value::List(items)) => items
                .into_iter()
                .enumerate()
                .map(|(position, source)| {
                    nested.serialize_nested(message_type, source, mask, &path.index(position))
                })
                .collect::<ConversionResult<Vec<_>>>()
                .map(OutputValue::Repeated),
            Some(other) => Err(mismatch(&other)),
        },
    }
}

/// Converts a raw value into a scalar of the given type.
///
/// # Errors
///
/// Returns [`CoercionError::TypeMismatch`] for incompatible values and
/// [`CoercionError::OutOfRange`] when an integer does not fit.
pub fn coerce_scalar(
    value: Value,
    scalar: ScalarType,
    kind: &FieldKind,
) -> Result<ScalarValue, CoercionError> {
    let mismatch = |found: &'static str| CoercionError::TypeMismatch {
        expected: kind.clone(),
        found,
    };

    match (scalar, value) {
        (ScalarType::Bool, Value::Bool(flag)) => Ok(ScalarValue::Bool(flag)),
        (ScalarType::Int32, Value::Int(number)) => narrow(number, "int32").map(ScalarValue::Int32),
        (ScalarType::Int32, Value::UInt(number)) => narrow(number, "int32").map(ScalarValue::Int32),
        (ScalarType::Int64, Value::Int(number)) => Ok(ScalarValue::Int64(number)),
        (ScalarType::Int64, Value::UInt(number)) => narrow(number, "int64").map(ScalarValue::Int64),
        (ScalarType::UInt32, Value::Int(number)) => narrow(number, "uint32").map(ScalarValue::UInt32),
        (ScalarType::UInt32, Value::UInt(number)) => {
            narrow(number, "uint32").map(ScalarValue::UInt32)
        }
        (ScalarType::UInt64, Value::Int(number)) => narrow(number, "uint64").map(ScalarValue::UInt64),
        (ScalarType::UInt64, Value::UInt(number)) => Ok(ScalarValue::UInt64(number)),
        (ScalarType::Float, Value::Float(number)) => Ok(ScalarValue::Float(to_f32(number))),
        (ScalarType::Double, Value::Float(number)) => Ok(ScalarValue::Double(number)),
        (ScalarType::String, Value::String(text)) => Ok(ScalarValue::String(text)),
        (ScalarType::String, Value::Uuid(id)) => Ok(ScalarValue::String(id.to_string())),
        (ScalarType::String, Value::Date(date)) => Ok(ScalarValue::String(date.to_string())),
        (ScalarType::String, Value::DateTime(instant)) => {
            Ok(ScalarValue::String(instant.to_rfc3339()))
        }
        (ScalarType::Bytes, Value::Bytes(bytes)) => Ok(ScalarValue::Bytes(bytes)),
        (ScalarType::Bytes, Value::String(text)) => Ok(ScalarValue::Bytes(text.into_bytes())),
        (_, other) => Err(mismatch(other.type_name())),
    }
}

fn narrow<S, T>(number: S, target: &'static str) -> Result<T, CoercionError>
where
    S: Copy + ToString,
    T: TryFrom<S>,
{
    T::try_from(number).map_err(|_| CoercionError::OutOfRange {
        value: number.to_string(),
        target,
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "single-precision fields accept the rounding of their wire type"
)]
const fn to_f32(number: f64) -> f32 {
    number as f32
}
