use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::debug;

use crate::error::AggregationError;
use crate::models::context::ResultRow;

/// Output type a summed column is cast to once aggregation is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Integer,
    Float,
}

/// Describes how one table's season rows fold into a single row per entity.
#[derive(Debug)]
pub struct CombineSpec {
    /// Column identifying the entity (player ID or team code).
    pub entity_key: &'static str,
    /// Copied from the entity's first row; assumed not to change between seasons.
    pub identity_columns: &'static [&'static str],
    pub sum_columns: &'static [(&'static str, OutputKind)],
    /// `(total column, per-60 rate column)` pairs derived from the summed totals.
    pub rates: &'static [(&'static str, &'static str)],
    pub average_ice_time: bool,
}

const SEASON: &str = "season";
const TEAM: &str = "team";
const SITUATION: &str = "situation";
const ICE_TIME: &str = "iceTime";
const GAMES_PLAYED: &str = "gamesPlayed";
const AVERAGE_ICE_TIME: &str = "averageIceTime";

/// Collapses every entity's season rows into one row per situation, sorted by team,
/// entity key, then situation.
///
/// Entities seen in a single season keep their rows as-is apart from `season` turning
/// into a string, so the column has one type across the output.
pub fn combine_seasons(
    rows: &[ResultRow],
    spec: &CombineSpec,
) -> Result<Vec<ResultRow>, AggregationError> {
    let mut order: Vec<String> = Vec::new();
    let mut partitions: HashMap<String, Vec<&ResultRow>> = HashMap::new();
    for row in rows {
        let entity = partition_label(row, spec.entity_key)?;
        partitions
            .entry(entity.clone())
            .or_insert_with(|| {
                order.push(entity);
                Vec::new()
            })
            .push(row);
    }

    let mut combined = Vec::with_capacity(order.len());
    for entity in &order {
        combined.extend(combine_entity(entity, &partitions[entity], spec)?);
    }

    for row in &mut combined {
        cast_columns(row, spec);
    }
    combined.sort_by(|a, b| {
        compare_values(a.get(TEAM), b.get(TEAM))
            .then_with(|| compare_values(a.get(spec.entity_key), b.get(spec.entity_key)))
            .then_with(|| compare_values(a.get(SITUATION), b.get(SITUATION)))
    });

    debug!(input = rows.len(), output = combined.len(), "combined seasons");
    Ok(combined)
}

fn combine_entity(
    entity: &str,
    partition: &[&ResultRow],
    spec: &CombineSpec,
) -> Result<Vec<ResultRow>, AggregationError> {
    let mut seasons = BTreeSet::new();
    for row in partition {
        let season = row
            .get(SEASON)
            .and_then(Value::as_i64)
            .ok_or_else(|| missing(entity, SEASON))?;
        seasons.insert(season);
    }

    if seasons.len() == 1 {
        return Ok(partition
            .iter()
            .map(|row| {
                let mut row = (*row).clone();
                if let Some(season) = row.get(SEASON).map(|s| s.to_string()) {
                    row.insert(SEASON.to_string(), Value::String(season));
                }
                row
            })
            .collect());
    }

    let first = partition[0];
    let mut out = ResultRow::new();

    let key = first
        .get(spec.entity_key)
        .ok_or_else(|| missing(entity, spec.entity_key))?;
    out.insert(spec.entity_key.to_string(), key.clone());

    let joined: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
    out.insert(SEASON.to_string(), Value::String(joined.join(",")));

    for column in spec.identity_columns {
        let value = first.get(*column).ok_or_else(|| missing(entity, column))?;
        out.insert(column.to_string(), value.clone());
    }

    for (column, _) in spec.sum_columns {
        out.insert(column.to_string(), sum_column(entity, partition, column)?);
    }

    if !spec.rates.is_empty() {
        let ice_time = numeric(entity, &out, ICE_TIME)?;
        for (total, rate) in spec.rates {
            if ice_time == 0.0 {
                return Err(divide_by_zero(entity, rate));
            }
            let value = 60.0 * numeric(entity, &out, total)? / ice_time;
            out.insert(rate.to_string(), Value::from(value));
        }
    }

    if spec.average_ice_time {
        let ice_time = numeric(entity, &out, ICE_TIME)?;
        let games = numeric(entity, &out, GAMES_PLAYED)?;
        if games == 0.0 {
            return Err(divide_by_zero(entity, AVERAGE_ICE_TIME));
        }
        out.insert(
            AVERAGE_ICE_TIME.to_string(),
            Value::from(round2(ice_time / games)),
        );
    }

    Ok(vec![out])
}

/// Integer columns stay exact while every input is an integer.
fn sum_column(
    entity: &str,
    partition: &[&ResultRow],
    column: &str,
) -> Result<Value, AggregationError> {
    let values: Vec<&Value> = partition
        .iter()
        .map(|row| row.get(column).ok_or_else(|| missing(entity, column)))
        .collect::<Result<_, _>>()?;

    if values.iter().all(|v| v.is_i64()) {
        return Ok(Value::from(values.iter().filter_map(|v| v.as_i64()).sum::<i64>()));
    }

    let mut total = 0.0;
    for v in values {
        total += v.as_f64().ok_or_else(|| missing(entity, column))?;
    }
    Ok(Value::from(total))
}

fn cast_columns(row: &mut ResultRow, spec: &CombineSpec) {
    for (column, kind) in spec.sum_columns {
        let Some(value) = row.get_mut(*column) else {
            continue;
        };
        let cast = match (kind, value.as_i64(), value.as_f64()) {
            (OutputKind::Integer, Some(_), _) => continue,
            (OutputKind::Integer, None, Some(f)) => Value::from(f.round() as i64),
            (OutputKind::Float, _, Some(f)) => Value::from(f),
            (_, _, None) => continue,
        };
        *value = cast;
    }
}

/// Rounds every floating-point cell to two decimals.
pub fn round_floats(rows: &mut [ResultRow]) {
    for row in rows {
        for value in row.values_mut() {
            let rounded = match value {
                Value::Number(n) if n.is_f64() => n.as_f64().map(round2),
                _ => None,
            };
            if let Some(f) = rounded {
                *value = Value::from(f);
            }
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn numeric(entity: &str, row: &ResultRow, column: &str) -> Result<f64, AggregationError> {
    row.get(column)
        .and_then(Value::as_f64)
        .ok_or_else(|| missing(entity, column))
}

fn entity_label(row: &ResultRow, key: &str) -> Result<String, AggregationError> {
    match row.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(missing("unidentified row", key)),
    }
}

/// Rows for one entity in different game situations never fold together.
fn partition_label(row: &ResultRow, key: &str) -> Result<String, AggregationError> {
    let entity = format!("{} {}", key, entity_label(row, key)?);
    Ok(match row.get(SITUATION).and_then(Value::as_str) {
        Some(situation) => format!("{} ({})", entity, situation),
        None => entity,
    })
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn missing(entity: &str, column: &str) -> AggregationError {
    AggregationError::MissingColumn {
        entity: entity.to_string(),
        column: column.to_string(),
    }
}

fn divide_by_zero(entity: &str, column: &str) -> AggregationError {
    AggregationError::DivideByZero {
        entity: entity.to_string(),
        column: column.to_string(),
    }
}
