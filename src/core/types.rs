//! Core type definitions used throughout the codebase

/// Index identifying a city group
///
/// Any integer the command line can parse is a valid index, negative ones
/// included.
pub type GroupIndex = i64;

/// Number of production buildings of one good in one city
pub type BuildingCount = u32;

/// Goods per production cycle (yields, input costs and their sums)
pub type Amount = u64;

/// Signed difference between production and consumption
pub type Net = i64;
