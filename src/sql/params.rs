//! Typed values that sqlx can bind to a PostgreSQL query built at runtime.

use chrono::NaiveDate;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value bound to a `$n` placeholder.
///
/// NULLs carry their column type: prepared statements are cached per SQL text, so a parameter
/// must report the same type whether or not it holds a value.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    NullBool,
    NullI32,
    NullF64,
    NullDate,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    Text(String),
    Date(NaiveDate),
}

/// Converts a typed request body into bind values, one per non-key column in table order.
pub trait IntoBindRow {
    fn bind_row(&self) -> Vec<BindValue>;
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<i32> for BindValue {
    fn from(n: i32) -> Self {
        BindValue::I32(n)
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::I64(n)
    }
}

impl From<NaiveDate> for BindValue {
    fn from(d: NaiveDate) -> Self {
        BindValue::Date(d)
    }
}

impl From<Option<i32>> for BindValue {
    fn from(v: Option<i32>) -> Self {
        v.map_or(BindValue::NullI32, BindValue::I32)
    }
}

impl From<Option<f64>> for BindValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(BindValue::NullF64, BindValue::F64)
    }
}

impl From<Option<bool>> for BindValue {
    fn from(v: Option<bool>) -> Self {
        v.map_or(BindValue::NullBool, BindValue::Bool)
    }
}

impl From<Option<NaiveDate>> for BindValue {
    fn from(v: Option<NaiveDate>) -> Self {
        v.map_or(BindValue::NullDate, BindValue::Date)
    }
}

impl From<f64> for BindValue {
    fn from(n: f64) -> Self {
        BindValue::F64(n)
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(b)
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindValue::NullBool | BindValue::NullI32 | BindValue::NullF64 | BindValue::NullDate => Ok(IsNull::Yes),
            BindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
            BindValue::I32(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            BindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            BindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf),
            BindValue::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
            BindValue::Date(d) => <NaiveDate as Encode<Postgres>>::encode_by_ref(d, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        match self {
            BindValue::Bool(_) | BindValue::NullBool => Some(<bool as Type<Postgres>>::type_info()),
            BindValue::I32(_) | BindValue::NullI32 => Some(<i32 as Type<Postgres>>::type_info()),
            BindValue::I64(_) => Some(<i64 as Type<Postgres>>::type_info()),
            BindValue::F64(_) | BindValue::NullF64 => Some(<f64 as Type<Postgres>>::type_info()),
            BindValue::Text(_) => Some(<String as Type<Postgres>>::type_info()),
            BindValue::Date(_) | BindValue::NullDate => Some(<NaiveDate as Type<Postgres>>::type_info()),
        }
    }
}

impl Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}
