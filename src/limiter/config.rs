// self
use crate::{_prelude::*, error::ConfigError};

/// Calendar-free time units a refill window can be expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowUnit {
	/// One nanosecond.
	Nanosecond,
	/// One microsecond.
	Microsecond,
	/// One millisecond.
	Millisecond,
	/// One second.
	Second,
	/// Sixty seconds.
	Minute,
	/// Sixty minutes.
	Hour,
	/// Twenty-four hours.
	Day,
}
impl WindowUnit {
	const LARGEST_FIRST: [WindowUnit; 7] = [
		Self::Day,
		Self::Hour,
		Self::Minute,
		Self::Second,
		Self::Millisecond,
		Self::Microsecond,
		Self::Nanosecond,
	];

	/// Length of a single unit.
	pub const fn as_duration(self) -> Duration {
		Duration::from_nanos(self.as_nanos())
	}

	/// Returns a stable label suitable for config files and log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Nanosecond => "nanosecond",
			Self::Microsecond => "microsecond",
			Self::Millisecond => "millisecond",
			Self::Second => "second",
			Self::Minute => "minute",
			Self::Hour => "hour",
			Self::Day => "day",
		}
	}

	const fn as_nanos(self) -> u64 {
		match self {
			Self::Nanosecond => 1,
			Self::Microsecond => 1_000,
			Self::Millisecond => 1_000_000,
			Self::Second => 1_000_000_000,
			Self::Minute => 60_000_000_000,
			Self::Hour => 3_600_000_000_000,
			Self::Day => 86_400_000_000_000,
		}
	}
}
impl Display for WindowUnit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Validated quota: at most `limit` requests per `window`.
///
/// The window must be non-zero and at most [`ThrottleConfig::MAX_WINDOW`].
///
/// Deserializes from `{ "unit": "second", "magnitude": 1, "limit": 3 }` (`magnitude` defaults
/// to 1) and runs the same validation as [`ThrottleConfig::new`]. Serialization picks the
/// largest unit that divides the window exactly, so values round-trip without loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThrottleConfigRepr", into = "ThrottleConfigRepr")]
pub struct ThrottleConfig {
	window: Duration,
	limit: u32,
}
impl ThrottleConfig {
	/// Longest accepted refill window: 365 days.
	pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 86_400);

	/// Creates a quota of `limit` requests per `window`.
	pub fn new(window: Duration, limit: u32) -> Result<Self, ConfigError> {
		if limit == 0 {
			return Err(ConfigError::NonPositiveLimit { limit: 0 });
		}
		if window.is_zero() {
			return Err(ConfigError::ZeroWindow);
		}
		if window > Self::MAX_WINDOW {
			return Err(ConfigError::WindowTooLong { window, max: Self::MAX_WINDOW });
		}

		Ok(Self { window, limit })
	}

	/// Creates a quota of `limit` requests per single `unit`.
	pub fn per(unit: WindowUnit, limit: u32) -> Result<Self, ConfigError> {
		Self::new(unit.as_duration(), limit)
	}

	/// Creates a quota of `limit` requests per `magnitude` × `unit`.
	pub fn every(unit: WindowUnit, magnitude: u32, limit: u32) -> Result<Self, ConfigError> {
		Self::scaled(unit, magnitude.into(), limit)
	}

	fn scaled(unit: WindowUnit, magnitude: u64, limit: u32) -> Result<Self, ConfigError> {
		let window = unit
			.as_nanos()
			.checked_mul(magnitude)
			.map(Duration::from_nanos)
			.unwrap_or(Duration::MAX);

		Self::new(window, limit)
	}

	/// Refill period.
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Permits available per window.
	pub fn limit(&self) -> u32 {
		self.limit
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ThrottleConfigRepr {
	unit: WindowUnit,
	#[serde(default = "ThrottleConfigRepr::default_magnitude")]
	magnitude: u64,
	limit: i64,
}
impl ThrottleConfigRepr {
	fn default_magnitude() -> u64 {
		1
	}
}
impl TryFrom<ThrottleConfigRepr> for ThrottleConfig {
	type Error = ConfigError;

	fn try_from(repr: ThrottleConfigRepr) -> Result<Self, Self::Error> {
		let limit = u32::try_from(repr.limit)
			.ok()
			.filter(|limit| *limit > 0)
			.ok_or(ConfigError::NonPositiveLimit { limit: repr.limit })?;

		Self::scaled(repr.unit, repr.magnitude, limit)
	}
}
impl From<ThrottleConfig> for ThrottleConfigRepr {
	fn from(config: ThrottleConfig) -> Self {
		// Bounded by `MAX_WINDOW`, so the nanosecond count fits in a `u64`.
		let nanos = config.window.as_nanos() as u64;
		let unit = WindowUnit::LARGEST_FIRST
			.into_iter()
			.find(|unit| nanos % unit.as_nanos() == 0)
			.unwrap_or(WindowUnit::Nanosecond);

		Self { unit, magnitude: nanos / unit.as_nanos(), limit: config.limit.into() }
	}
}
