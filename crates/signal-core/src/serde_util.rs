//! 직렬화 보조 유틸리티.
//!
//! 응답에 포함되는 실수 값이 비유한(NaN/무한대)인 경우에도 직렬화가
//! 실패하지 않도록, 해당 값을 문자열 표현으로 대체하는 serde 헬퍼를
//! 제공합니다. 응답은 계속 완성되며, 상위 계층에서 degraded 플래그로
//! 표시됩니다.

use serde::{Deserialize, Deserializer, Serializer};

/// `f64` 필드용: 비유한 값은 문자열로 직렬화합니다.
pub mod finite_f64 {
    use super::*;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer)
    }
}

/// `Option<f64>` 필드용: 비유한 값은 문자열로 직렬화합니다.
pub mod finite_f64_opt {
    use super::*;
    use serde::Serialize;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) if !v.is_finite() => serializer.serialize_str(&v.to_string()),
            other => other.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Wrapper {
        #[serde(with = "super::finite_f64")]
        value: f64,
        #[serde(with = "super::finite_f64_opt")]
        maybe: Option<f64>,
    }

    #[test]
    fn test_finite_passthrough() {
        let json = serde_json::to_string(&Wrapper {
            value: 1.5,
            maybe: Some(2.5),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":1.5,"maybe":2.5}"#);
    }

    #[test]
    fn test_non_finite_becomes_string() {
        let json = serde_json::to_string(&Wrapper {
            value: f64::NAN,
            maybe: Some(f64::INFINITY),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":"NaN","maybe":"inf"}"#);
    }
}
