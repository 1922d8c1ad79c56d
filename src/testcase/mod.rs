use std::fmt;

use num_bigint::BigInt;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::{SerializeMap, SerializeStruct},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::recovery::{self, DecodeError, InterpolationError, Point};

pub mod source;

use source::InputSource;

const KEYS_FIELD: &str = "keys";

// ############################################
// ################## RECORD ##################
// ############################################

/// Metadata of a test case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keys {
    /// Number of supplied points, informational only
    pub n: usize,
    /// Number of points required to recover the secret
    pub k: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointRecord {
    pub x: i64,
    pub base: u32,
    /// Digits of the y-coordinate, written in `base`
    pub value: String,
}

/// Test case as written in a JSON file:
/// ```json
/// {
///     "keys": { "n": 2, "k": 2 },
///     "1": { "base": "10", "value": "4" },
///     "2": { "base": "2", "value": "111" }
/// }
/// ```
/// Points are kept in the order of the document. Any top level key which is neither `keys`
/// nor an integer is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCaseRecord {
    pub keys: Keys,
    pub points: Vec<PointRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PointEntry {
    #[serde(deserialize_with = "deserialize_base")]
    base: u32,
    value: String,
}

/// The base is usually a string of digits but plain integers are accepted too
fn deserialize_base<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBase {
        Number(u32),
        Text(String),
    }

    match RawBase::deserialize(deserializer)? {
        RawBase::Number(base) => Ok(base),
        RawBase::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid base {text:?}: {e}"))),
    }
}

impl<'de> Deserialize<'de> for TestCaseRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = TestCaseRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object with `keys` and points keyed by their x-coordinate")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut keys: Option<Keys> = None;
                let mut points = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == KEYS_FIELD {
                        if keys.is_some() {
                            return Err(de::Error::duplicate_field(KEYS_FIELD));
                        }
                        keys = Some(map.next_value()?);
                        continue;
                    }
                    let x = key.parse::<i64>().map_err(|_| {
                        de::Error::custom(format!(
                            "unexpected key {key:?}, expected `keys` or an integer x-coordinate"
                        ))
                    })?;
                    let entry: PointEntry = map.next_value()?;
                    points.push(PointRecord {
                        x,
                        base: entry.base,
                        value: entry.value,
                    });
                }
                let keys = keys.ok_or_else(|| de::Error::missing_field(KEYS_FIELD))?;
                Ok(TestCaseRecord { keys, points })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

impl Serialize for TestCaseRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct Entry<'a>(&'a PointRecord);

        impl Serialize for Entry<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut entry = serializer.serialize_struct("PointEntry", 2)?;
                entry.serialize_field("base", &self.0.base.to_string())?;
                entry.serialize_field("value", &self.0.value)?;
                entry.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.points.len() + 1))?;
        map.serialize_entry(KEYS_FIELD, &self.keys)?;
        for point in &self.points {
            map.serialize_entry(&point.x.to_string(), &Entry(point))?;
        }
        map.end()
    }
}

// ###############################################
// ################## TEST CASE ##################
// ###############################################

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed test case: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for x = {x}: {source}")]
    Value { x: i64, source: DecodeError },
}

/// A test case whose points have been decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub n: usize,
    pub k: usize,
    pub points: Vec<Point>,
}

impl TestCase {
    /// Parses a JSON test case and decodes all of its points.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let record: TestCaseRecord = serde_json::from_str(raw)?;
        if record.keys.n != record.points.len() {
            warn!(
                "test case announces {} points but contains {}",
                record.keys.n,
                record.points.len()
            );
        }
        record.try_into()
    }

    /// Recovers the secret from the first `k` points.
    pub fn secret(&self) -> Result<BigInt, InterpolationError> {
        recovery::constant_term(&self.points, self.k)
    }
}

impl TryFrom<TestCaseRecord> for TestCase {
    type Error = ParseError;

    fn try_from(record: TestCaseRecord) -> Result<Self, Self::Error> {
        let points = record
            .points
            .into_iter()
            .map(|point| {
                recovery::decode(&point.value, point.base)
                    .map(|y| Point::new(point.x, y))
                    .map_err(|source| ParseError::Value { x: point.x, source })
            })
            .collect::<Result<Vec<Point>, ParseError>>()?;
        Ok(Self {
            n: record.keys.n,
            k: record.keys.k,
            points,
        })
    }
}

// ##############################################
// ################## PIPELINE ##################
// ##############################################

#[derive(Debug, Error)]
pub enum TestCaseError {
    #[error("{0} not found")]
    MissingInput(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

/// Reads, parses and decodes the test case `name`, then recovers its secret.
/// # Arguments
/// * `source` - The source the raw test case is read from.
/// * `name` - The name of the test case in the source.
/// # Errors
/// * `TestCaseError::MissingInput` - If the source has no input named `name`.
/// * `TestCaseError::Parse` - If the input is not a valid test case.
/// * `TestCaseError::Interpolation` - If the secret cannot be recovered from the points.
/// * `TestCaseError::Unknown` - If the source failed to read the input.
pub fn process(source: &dyn InputSource, name: &str) -> Result<BigInt, TestCaseError> {
    let raw = source
        .read(name)?
        .ok_or_else(|| TestCaseError::MissingInput(name.to_string()))?;
    let test_case = TestCase::parse(&raw)?;
    debug!(
        "test case {name}: using {} of {} points",
        test_case.k,
        test_case.points.len()
    );
    let secret = test_case.secret()?;
    info!("recovered secret of test case {name}");
    Ok(secret)
}

/// Outcome of one test case, displayed as the line reported to the user.
#[derive(Debug)]
pub struct Report {
    /// One based position of the test case
    pub index: usize,
    pub name: String,
    pub outcome: Result<BigInt, TestCaseError>,
}

impl Report {
    pub fn run(source: &dyn InputSource, index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            outcome: process(source, name),
        }
    }

    /// Whether the test case was found but its secret could not be recovered.
    pub fn is_failure(&self) -> bool {
        matches!(
            self.outcome,
            Err(ref e) if !matches!(e, TestCaseError::MissingInput(_))
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret for testcase {}: ", self.index)?;
        match &self.outcome {
            Ok(secret) => write!(f, "{secret}"),
            Err(TestCaseError::MissingInput(name)) => write!(f, "{name} not found"),
            Err(e) => write!(f, "failed: {e}"),
        }
    }
}
