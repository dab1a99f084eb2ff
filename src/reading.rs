/// The value carried by a single datapoint.
///
/// Only `Integer` and `Float` values take part in aggregation. Anything else is
/// forwarded with its reading but never folded into an accumulator.
#[derive(Debug, Clone, PartialEq)]
pub enum DatapointValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DatapointValue {
    /// Returns the value as `f64` if it is numeric.
    #[inline(always)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DatapointValue::Integer(v) => Some(*v as f64),
            DatapointValue::Float(v) => Some(*v),
            DatapointValue::Text(_) => None,
        }
    }
}

impl From<i64> for DatapointValue {
    fn from(value: i64) -> Self {
        DatapointValue::Integer(value)
    }
}

impl From<f64> for DatapointValue {
    fn from(value: f64) -> Self {
        DatapointValue::Float(value)
    }
}

impl From<&str> for DatapointValue {
    fn from(value: &str) -> Self {
        DatapointValue::Text(value.to_owned())
    }
}

/// A named measured quantity within a reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    pub name: String,
    pub value: DatapointValue,
}

impl Datapoint {
    pub fn new(name: impl Into<String>, value: impl Into<DatapointValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A timestamped set of datapoints produced by one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub asset: String,
    pub timestamp: u64,
    pub datapoints: Vec<Datapoint>,
}

impl Reading {
    pub fn new(asset: impl Into<String>, timestamp: u64, datapoints: Vec<Datapoint>) -> Self {
        Self {
            asset: asset.into(),
            timestamp,
            datapoints,
        }
    }

    /// Shorthand for a reading with a single datapoint.
    pub fn single(
        asset: impl Into<String>,
        timestamp: u64,
        name: impl Into<String>,
        value: impl Into<DatapointValue>,
    ) -> Self {
        Self::new(asset, timestamp, vec![Datapoint::new(name, value)])
    }

    /// Looks up a datapoint by name.
    pub fn datapoint(&self, name: &str) -> Option<&DatapointValue> {
        self.datapoints
            .iter()
            .find(|dp| dp.name == name)
            .map(|dp| &dp.value)
    }
}
