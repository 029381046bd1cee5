//! Value classification.
//!
//! [`FilterValue`] is implemented by every type that may appear as a record field.
//! Its [`kind`](FilterValue::kind) tells the builder how the value contributes to a
//! predicate document: as a scalar leaf, an atomic date-time, a nested record, a
//! sequence, a string-keyed map, or not at all.
//!
//! Implementations are provided for the common scalar, date-time, container and
//! pointer types. Records get theirs from `#[derive(Record)]`.

use bson::{Bson, DateTime, Document, Timestamp, oid::ObjectId};
use std::{
    any::Any,
    collections::{BTreeMap, HashMap, VecDeque},
    marker::PhantomData,
    rc::Rc,
    sync::{
        Arc,
        mpsc::{Receiver, Sender, SyncSender},
    },
};

use crate::record::Record;

/// Routing decision for a single value.
pub enum ValueKind<'a> {
    /// Kinds that never contribute (functions, channels, raw pointers, opaque values).
    /// Carries the kind name used in diagnostics.
    Skip(&'static str),
    /// A date-time, or one level of optional/sequence indirection around one.
    /// Always assigned as an atomic leaf.
    DateTime(Bson),
    /// A nested record.
    Object(&'a dyn Record),
    /// A missing nested record (`None` where a record is expected).
    Absent,
    /// An ordered, growable collection.
    Sequence(Vec<&'a dyn FilterValue>),
    /// A fixed-size array. Walked like a sequence at field level, rejected as a
    /// sequence element.
    Array(Vec<&'a dyn FilterValue>),
    /// A string-keyed map whose values are assigned as literals.
    Map(Vec<(String, Bson)>),
    /// Any other leaf value.
    Scalar(Bson),
}

impl ValueKind<'_> {
    /// Short kind name used in logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Skip(name) => name,
            ValueKind::DateTime(_) => "datetime",
            ValueKind::Object(_) => "object",
            ValueKind::Absent => "absent",
            ValueKind::Sequence(_) => "sequence",
            ValueKind::Array(_) => "array",
            ValueKind::Map(_) => "map",
            ValueKind::Scalar(_) => "scalar",
        }
    }
}

/// Static shape of a type, known without a value at hand.
///
/// Used by wrappers (`Option`, `Vec`) to classify their contents when there is no
/// value to ask, e.g. `None` or an indirection around a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A derived record.
    Record,
    /// A date-time primitive.
    DateTime,
    /// Anything else.
    Other,
}

/// A value that can take part in filter conversion.
pub trait FilterValue {
    /// Classifies this value.
    fn kind(&self) -> ValueKind<'_>;

    /// Returns `true` when the value equals its type's default.
    fn is_default(&self) -> bool;

    /// The value as a plain BSON literal, as it would be stored.
    ///
    /// Used for scalar leaves, map values, scalar sequence elements and `$set`
    /// payloads.
    fn literal(&self) -> Bson;

    /// The static shape of the implementing type.
    fn shape() -> Shape
    where
        Self: Sized,
    {
        Shape::Other
    }
}

macro_rules! scalar_value {
    ($($ty:ty => |$v:ident| $conv:expr),* $(,)?) => {
        $(
            impl FilterValue for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Scalar(self.literal())
                }

                fn is_default(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn literal(&self) -> Bson {
                    let $v = self;
                    $conv
                }
            }
        )*
    };
}

scalar_value! {
    bool => |v| Bson::Boolean(*v),
    i8 => |v| Bson::Int32(i32::from(*v)),
    i16 => |v| Bson::Int32(i32::from(*v)),
    i32 => |v| Bson::Int32(*v),
    i64 => |v| Bson::Int64(*v),
    u8 => |v| Bson::Int32(i32::from(*v)),
    u16 => |v| Bson::Int32(i32::from(*v)),
    u32 => |v| Bson::Int64(i64::from(*v)),
    u64 => |v| i64::try_from(*v).map(Bson::Int64).unwrap_or(Bson::Double(*v as f64)),
    usize => |v| i64::try_from(*v).map(Bson::Int64).unwrap_or(Bson::Double(*v as f64)),
    isize => |v| i64::try_from(*v).map(Bson::Int64).unwrap_or(Bson::Double(*v as f64)),
    f32 => |v| Bson::Double(f64::from(*v)),
    f64 => |v| Bson::Double(*v),
    char => |v| Bson::String(v.to_string()),
    String => |v| Bson::String(v.clone()),
}

impl FilterValue for str {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(self.literal())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        Bson::String(self.to_string())
    }
}

impl FilterValue for ObjectId {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(self.literal())
    }

    fn is_default(&self) -> bool {
        self.bytes() == [0u8; 12]
    }

    fn literal(&self) -> Bson {
        Bson::ObjectId(*self)
    }
}

impl FilterValue for bson::Uuid {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(self.literal())
    }

    fn is_default(&self) -> bool {
        self.bytes() == [0u8; 16]
    }

    fn literal(&self) -> Bson {
        Bson::from(*self)
    }
}

impl FilterValue for uuid::Uuid {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(self.literal())
    }

    fn is_default(&self) -> bool {
        self.is_nil()
    }

    fn literal(&self) -> Bson {
        Bson::from(bson::Uuid::from(*self))
    }
}

impl FilterValue for Timestamp {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(self.literal())
    }

    fn is_default(&self) -> bool {
        self.time == 0 && self.increment == 0
    }

    fn literal(&self) -> Bson {
        Bson::Timestamp(*self)
    }
}

impl FilterValue for Bson {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(self.clone())
    }

    fn is_default(&self) -> bool {
        matches!(self, Bson::Null)
    }

    fn literal(&self) -> Bson {
        self.clone()
    }
}

impl FilterValue for DateTime {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::DateTime(self.literal())
    }

    fn is_default(&self) -> bool {
        self.timestamp_millis() == 0
    }

    fn literal(&self) -> Bson {
        Bson::DateTime(*self)
    }

    fn shape() -> Shape {
        Shape::DateTime
    }
}

impl FilterValue for chrono::DateTime<chrono::Utc> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::DateTime(self.literal())
    }

    fn is_default(&self) -> bool {
        *self == chrono::DateTime::<chrono::Utc>::default()
    }

    fn literal(&self) -> Bson {
        Bson::DateTime(DateTime::from_chrono(*self))
    }

    fn shape() -> Shape {
        Shape::DateTime
    }
}

impl<T: FilterValue> FilterValue for Option<T> {
    fn kind(&self) -> ValueKind<'_> {
        match (self, T::shape()) {
            (Some(value), _) => value.kind(),
            (None, Shape::Record) => ValueKind::Absent,
            (None, Shape::DateTime) => ValueKind::DateTime(Bson::Null),
            (None, Shape::Other) => ValueKind::Scalar(Bson::Null),
        }
    }

    fn is_default(&self) -> bool {
        self.is_none()
    }

    fn literal(&self) -> Bson {
        match self {
            Some(value) => value.literal(),
            None => Bson::Null,
        }
    }

    fn shape() -> Shape {
        T::shape()
    }
}

macro_rules! delegate_value {
    () => {
        fn kind(&self) -> ValueKind<'_> {
            (**self).kind()
        }

        fn is_default(&self) -> bool {
            (**self).is_default()
        }

        fn literal(&self) -> Bson {
            (**self).literal()
        }
    };
}

// Sized targets forward their shape, so `None` around a boxed record stays absent.
// Unsized targets have no static shape and are listed one by one.
macro_rules! pointer_value {
    ($($ptr:ident),*) => {
        $(
            impl<T: FilterValue> FilterValue for $ptr<T> {
                delegate_value!();

                fn shape() -> Shape {
                    T::shape()
                }
            }

            impl<T: FilterValue> FilterValue for $ptr<[T]> {
                delegate_value!();
            }

            impl FilterValue for $ptr<str> {
                delegate_value!();
            }

            impl FilterValue for $ptr<dyn FilterValue> {
                delegate_value!();
            }

            impl FilterValue for $ptr<dyn Any> {
                delegate_value!();
            }

            impl FilterValue for $ptr<dyn Any + Send> {
                delegate_value!();
            }

            impl FilterValue for $ptr<dyn Any + Send + Sync> {
                delegate_value!();
            }
        )*
    };
}

pointer_value!(Box, Rc, Arc);

impl<T: FilterValue> FilterValue for &T {
    delegate_value!();

    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: FilterValue> FilterValue for &[T] {
    delegate_value!();
}

impl FilterValue for &str {
    delegate_value!();
}

impl FilterValue for &dyn FilterValue {
    delegate_value!();
}

impl FilterValue for &(dyn Any + 'static) {
    delegate_value!();
}

impl FilterValue for &(dyn Any + Send + 'static) {
    delegate_value!();
}

impl FilterValue for &(dyn Any + Send + Sync + 'static) {
    delegate_value!();
}

fn elements<'a, T: FilterValue>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a dyn FilterValue>
where
    T: 'a,
{
    items
        .into_iter()
        .map(|item| item as &dyn FilterValue)
        .collect()
}

fn sequence_kind<'a, T: FilterValue + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> ValueKind<'a> {
    match T::shape() {
        Shape::DateTime => ValueKind::DateTime(Bson::Array(
            items.into_iter().map(|item| item.literal()).collect(),
        )),
        _ => ValueKind::Sequence(elements(items)),
    }
}

impl<T: FilterValue> FilterValue for [T] {
    fn kind(&self) -> ValueKind<'_> {
        sequence_kind(self.iter())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        Bson::Array(self.iter().map(FilterValue::literal).collect())
    }
}

impl<T: FilterValue> FilterValue for Vec<T> {
    fn kind(&self) -> ValueKind<'_> {
        sequence_kind(self.iter())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        self.as_slice().literal()
    }
}

impl<T: FilterValue> FilterValue for VecDeque<T> {
    fn kind(&self) -> ValueKind<'_> {
        sequence_kind(self.iter())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        Bson::Array(self.iter().map(FilterValue::literal).collect())
    }
}

impl<T: FilterValue, const N: usize> FilterValue for [T; N] {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Array(elements(self.iter()))
    }

    fn is_default(&self) -> bool {
        self.iter().all(FilterValue::is_default)
    }

    fn literal(&self) -> Bson {
        self.as_slice().literal()
    }
}

fn map_entries<'a, V: FilterValue + 'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a V)>,
) -> Vec<(String, Bson)> {
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), value.literal()))
        .collect()
}

impl<V: FilterValue, S> FilterValue for HashMap<String, V, S> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Map(map_entries(self.iter()))
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        Bson::Document(map_entries(self.iter()).into_iter().collect())
    }
}

impl<V: FilterValue> FilterValue for BTreeMap<String, V> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Map(map_entries(self.iter()))
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        Bson::Document(map_entries(self.iter()).into_iter().collect())
    }
}

impl FilterValue for Document {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn literal(&self) -> Bson {
        Bson::Document(self.clone())
    }
}

macro_rules! skipped_value {
    ($name:literal => $($ty:ty),*) => {
        $(
            impl FilterValue for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Skip($name)
                }

                fn is_default(&self) -> bool {
                    true
                }

                fn literal(&self) -> Bson {
                    Bson::Null
                }
            }
        )*
    };
}

skipped_value!("unit" => ());
skipped_value!("interface" => dyn Any, dyn Any + Send, dyn Any + Send + Sync);

impl<T: ?Sized> FilterValue for PhantomData<T> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Skip("marker")
    }

    fn is_default(&self) -> bool {
        true
    }

    fn literal(&self) -> Bson {
        Bson::Null
    }
}

macro_rules! channel_value {
    ($($ty:ident),*) => {
        $(
            impl<T> FilterValue for $ty<T> {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Skip("channel")
                }

                fn is_default(&self) -> bool {
                    true
                }

                fn literal(&self) -> Bson {
                    Bson::Null
                }
            }
        )*
    };
}

channel_value!(Sender, SyncSender, Receiver);

impl<T: ?Sized> FilterValue for *const T {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Skip("pointer")
    }

    fn is_default(&self) -> bool {
        self.is_null()
    }

    fn literal(&self) -> Bson {
        Bson::Null
    }
}

impl<T: ?Sized> FilterValue for *mut T {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Skip("pointer")
    }

    fn is_default(&self) -> bool {
        self.is_null()
    }

    fn literal(&self) -> Bson {
        Bson::Null
    }
}

macro_rules! function_value {
    ($(($($arg:ident),*)),*) => {
        $(
            impl<R, $($arg),*> FilterValue for fn($($arg),*) -> R {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Skip("function")
                }

                fn is_default(&self) -> bool {
                    false
                }

                fn literal(&self) -> Bson {
                    Bson::Null
                }
            }
        )*
    };
}

function_value!((), (A), (A, B), (A, B, C));
